use crate::error::{classify_upstream_reason, AppError};
use crate::models::{
    RawContentDetails, RawSnippet, RawStatistics, RawThumbnail, RawThumbnails, RawVideoDetail,
};
use crate::services::youtube_client::{SearchPage, SearchQuery, VideoSource};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Search { page_token: Option<String> },
    Details { ids: usize },
}

/// Scripted `VideoSource` that records every call it receives.
#[derive(Default)]
pub struct FakeSource {
    pages: Vec<SearchPage>,
    details: HashMap<String, RawVideoDetail>,
    search_failure: Option<(u16, Value)>,
    details_failure: Option<(u16, Value)>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pages(mut self, pages: Vec<SearchPage>) -> Self {
        self.pages = pages;
        self
    }

    pub fn with_details(mut self, details: Vec<RawVideoDetail>) -> Self {
        self.details = details.into_iter().map(|d| (d.id.clone(), d)).collect();
        self
    }

    pub fn failing_search(mut self, status: u16, payload: Value) -> Self {
        self.search_failure = Some((status, payload));
        self
    }

    pub fn failing_details(mut self, status: u16, payload: Value) -> Self {
        self.details_failure = Some((status, payload));
        self
    }

    /// Shared handle, still readable after the source is moved into state.
    pub fn calls(&self) -> Arc<Mutex<Vec<Call>>> {
        self.calls.clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn search_calls(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, Call::Search { .. }))
            .count()
    }
}

fn upstream(status: u16, payload: &Value) -> AppError {
    AppError::Upstream {
        status,
        reason: classify_upstream_reason(payload),
        details: payload.clone(),
    }
}

#[rocket::async_trait]
impl VideoSource for FakeSource {
    async fn search_page(
        &self,
        _api_key: &str,
        _query: &SearchQuery,
        page_token: Option<&str>,
    ) -> Result<SearchPage, AppError> {
        let index = self.search_calls();
        self.record(Call::Search {
            page_token: page_token.map(String::from),
        });

        if let Some((status, payload)) = &self.search_failure {
            return Err(upstream(*status, payload));
        }
        Ok(self.pages.get(index).cloned().unwrap_or_default())
    }

    async fn fetch_details(
        &self,
        _api_key: &str,
        ids: &[String],
    ) -> Result<Vec<RawVideoDetail>, AppError> {
        self.record(Call::Details { ids: ids.len() });

        if let Some((status, payload)) = &self.details_failure {
            return Err(upstream(*status, payload));
        }
        if ids.len() > 50 {
            return Err(AppError::BatchTooLarge(ids.len()));
        }
        Ok(ids
            .iter()
            .filter_map(|id| self.details.get(id).cloned())
            .collect())
    }
}

pub fn page(ids: &[&str], next_page_token: Option<&str>) -> SearchPage {
    SearchPage {
        video_ids: ids.iter().map(|id| id.to_string()).collect(),
        next_page_token: next_page_token.map(String::from),
    }
}

pub fn detail(id: &str, duration: &str, views: Option<&str>) -> RawVideoDetail {
    RawVideoDetail {
        id: id.to_string(),
        snippet: Some(RawSnippet {
            title: Some(format!("Video {id}")),
            channel_title: Some("Channel".to_string()),
            published_at: Some("2024-05-01T10:00:00Z".to_string()),
            thumbnails: Some(RawThumbnails {
                default: Some(RawThumbnail {
                    url: Some(format!("https://i.ytimg.com/vi/{id}/default.jpg")),
                }),
                medium: None,
                high: None,
            }),
        }),
        statistics: Some(RawStatistics {
            view_count: views.map(String::from),
            like_count: Some("1".to_string()),
        }),
        content_details: Some(RawContentDetails {
            duration: Some(duration.to_string()),
        }),
    }
}
