#[cfg(test)]
pub mod fake_source;
pub mod response_cache;
pub mod video_service;
pub mod youtube_client;
