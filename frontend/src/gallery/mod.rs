pub mod api;
pub mod components;
pub mod hover_preview;
pub mod video_card;
