use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A video as served by `GET /videos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedVideo {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub like_count: Option<String>,
    #[serde(skip)]
    pub duration_seconds: u64, // filter key only, never serialized
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl PageResult {
    pub fn empty() -> Self {
        PageResult {
            page: 1,
            total_pages: 1,
            total_count: 0,
            has_next_page: false,
            has_prev_page: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VideosResponse {
    pub success: bool,
    pub count: usize,
    pub videos: Vec<NormalizedVideo>,
    pub pagination: PageResult,
}

impl VideosResponse {
    pub fn new(videos: Vec<NormalizedVideo>, pagination: PageResult) -> Self {
        VideosResponse {
            success: true,
            count: videos.len(),
            videos,
            pagination,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

// Upstream wire shapes. Documentation:
// https://developers.google.com/youtube/v3/docs/search/list
// https://developers.google.com/youtube/v3/docs/videos/list

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchResponse {
    #[serde(default)]
    pub items: Vec<RawSearchResult>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawSearchResult {
    pub id: Option<RawSearchId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchId {
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawVideoListResponse {
    #[serde(default)]
    pub items: Vec<RawVideoDetail>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawVideoDetail {
    pub id: String,
    pub snippet: Option<RawSnippet>,
    pub statistics: Option<RawStatistics>,
    pub content_details: Option<RawContentDetails>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawSnippet {
    pub title: Option<String>,
    pub channel_title: Option<String>,
    pub published_at: Option<String>,
    pub thumbnails: Option<RawThumbnails>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawThumbnails {
    pub default: Option<RawThumbnail>,
    pub medium: Option<RawThumbnail>,
    pub high: Option<RawThumbnail>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawThumbnail {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawStatistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawContentDetails {
    pub duration: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn duration_is_not_serialized() {
        let video = NormalizedVideo {
            id: "abc".to_string(),
            title: Some("Song".to_string()),
            view_count: Some("10".to_string()),
            duration_seconds: 200,
            ..Default::default()
        };

        let value = serde_json::to_value(&video).unwrap();
        assert_eq!(
            value,
            json!({ "id": "abc", "title": "Song", "viewCount": "10" })
        );
    }

    #[test]
    fn detail_tolerates_missing_sections() {
        let detail: RawVideoDetail = serde_json::from_value(json!({
            "id": "xyz",
            "snippet": { "title": "Only a title" }
        }))
        .unwrap();

        assert_eq!(detail.id, "xyz");
        assert!(detail.statistics.is_none());
        assert!(detail.content_details.is_none());
        assert_eq!(
            detail.snippet.and_then(|s| s.title).as_deref(),
            Some("Only a title")
        );
    }

    #[test]
    fn search_response_reads_continuation_token() {
        let page: RawSearchResponse = serde_json::from_value(json!({
            "nextPageToken": "CDIQAA",
            "items": [
                { "id": { "kind": "youtube#video", "videoId": "a1" } },
                { "id": { "kind": "youtube#channel" } }
            ]
        }))
        .unwrap();

        assert_eq!(page.next_page_token.as_deref(), Some("CDIQAA"));
        assert_eq!(page.items.len(), 2);
        assert!(page.items[1].id.as_ref().unwrap().video_id.is_none());
    }
}
