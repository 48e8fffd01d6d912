use crate::config::CONFIG;
use crate::models::{ErrorResponse, Pagination, VideoSummary, VideosResponse};
use gloo_net::http::Request;
use yew::prelude::*;

pub async fn fetch_videos(page: usize) -> Result<VideosResponse, String> {
    let url = CONFIG.videos_url(page);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.ok() {
        return response
            .json::<VideosResponse>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e));
    }

    let status = response.status();
    match response.text().await {
        Ok(error_text) => match serde_json::from_str::<ErrorResponse>(&error_text) {
            Ok(error_response) => Err(error_response.error),
            Err(_) => Err(format!("Could not load videos ({}): {}", status, error_text)),
        },
        Err(_) => Err(format!("Could not load videos, status: {}", status)),
    }
}

pub async fn load_videos(
    page: usize,
    videos: UseStateHandle<Vec<VideoSummary>>,
    pagination: UseStateHandle<Option<Pagination>>,
    error_message: UseStateHandle<Option<String>>,
    loading: UseStateHandle<bool>,
) {
    match fetch_videos(page).await {
        Ok(response) => {
            log::info!(
                "Loaded {} videos (page {} of {})",
                response.count,
                response.pagination.page,
                response.pagination.total_pages
            );
            videos.set(response.videos);
            pagination.set(Some(response.pagination));
            error_message.set(None);
        }
        Err(e) => {
            videos.set(Vec::new());
            pagination.set(None);
            handle_error(&error_message, e);
        }
    }

    loading.set(false);
}

fn handle_error(error_message: &UseStateHandle<Option<String>>, error: String) {
    error_message.set(Some(error.clone()));
    web_sys::console::error_1(&error.into());
}
