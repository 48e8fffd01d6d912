pub mod health;
pub mod video;

pub use video::*;
