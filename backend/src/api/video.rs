use crate::error::AppError;
use crate::models::VideosResponse;
use crate::services::video_service;
use crate::AppState;
use log::{error, info, warn};
use rocket::serde::json::Json;
use rocket::{get, State};

/// `?page=` is 1-based and read from its leading digits, so `2abc` is page 2.
/// Anything missing, non-numeric or below 1 means page 1.
pub fn requested_page(page: Option<&str>) -> usize {
    page.map(str::trim_start)
        .map(|p| p.find(|c: char| !c.is_ascii_digit()).map_or(p, |end| &p[..end]))
        .and_then(|digits| digits.parse::<usize>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}

#[get("/videos?<page>")]
pub async fn list_videos(
    page: Option<&str>,
    state: &State<AppState>,
) -> Result<Json<VideosResponse>, AppError> {
    let requested = requested_page(page);

    match video_service::list_videos(state.source.as_ref(), &state.config, requested).await {
        Ok(response) => {
            info!(
                "Serving page {}/{} ({} of {} videos)",
                response.pagination.page,
                response.pagination.total_pages,
                response.count,
                response.pagination.total_count
            );
            Ok(Json(response))
        }
        Err(e) => {
            match &e {
                AppError::Configuration => error!("{e}"),
                AppError::Upstream { .. } => warn!("Upstream rejected request: {e}"),
                _ => error!("YouTube API error: {e:?}"),
            }
            Err(e)
        }
    }
}
