use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub id: String,
    pub title: Option<String>,
    pub channel_title: Option<String>,
    pub published_at: Option<String>,
    pub thumbnail_url: Option<String>,
    pub view_count: Option<String>,
    pub like_count: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VideosResponse {
    pub success: bool,
    pub count: usize,
    pub videos: Vec<VideoSummary>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<Value>,
}
