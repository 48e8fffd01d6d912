use crate::config::Config;
use crate::error::{classify_upstream_reason, AppError};
use crate::models::{RawSearchResponse, RawVideoDetail, RawVideoListResponse};
use crate::services::response_cache::ResponseCache;
use log::{debug, warn};
use reqwest::{Client, Url};
use serde_json::{json, Value};

/// search.list `maxResults` ceiling.
pub const MAX_RESULTS_PER_PAGE: usize = 50;
/// videos.list accepts at most this many comma-joined ids.
pub const MAX_IDS_PER_DETAILS_REQUEST: usize = 50;

#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub query: String,
    pub region_code: String,
}

impl SearchQuery {
    pub fn from_config(config: &Config) -> Self {
        SearchQuery {
            query: config.search_query.clone(),
            region_code: config.region_code.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub video_ids: Vec<String>,
    pub next_page_token: Option<String>,
}

/// The two upstream calls the video pipeline is built on.
#[rocket::async_trait]
pub trait VideoSource: Send + Sync {
    async fn search_page(
        &self,
        api_key: &str,
        query: &SearchQuery,
        page_token: Option<&str>,
    ) -> Result<SearchPage, AppError>;

    async fn fetch_details(
        &self,
        api_key: &str,
        ids: &[String],
    ) -> Result<Vec<RawVideoDetail>, AppError>;
}

pub struct YouTubeClient {
    http: Client,
    base_url: String,
    cache: ResponseCache,
}

impl YouTubeClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.upstream_timeout).build()?;
        Ok(YouTubeClient {
            http,
            base_url: config.api_base_url.clone(),
            cache: ResponseCache::new(config.cache_ttl),
        })
    }

    async fn get_json(&self, url: Url) -> Result<Value, AppError> {
        let key = url.to_string();
        if let Some(body) = self.cache.get(&key).await {
            debug!("Cache hit for {}", url.path());
            return Ok(body);
        }

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            let details = response
                .json::<Value>()
                .await
                .unwrap_or_else(|_| json!({}));
            let reason = classify_upstream_reason(&details);
            warn!(
                "YouTube {} answered HTTP {} ({:?})",
                url.path(),
                status.as_u16(),
                reason
            );
            return Err(AppError::Upstream {
                status: status.as_u16(),
                reason,
                details,
            });
        }

        let body = response.json::<Value>().await?;
        self.cache.insert(key, body.clone()).await;
        debug!(
            "Cached {} response ({} entries)",
            url.path(),
            self.cache.len().await
        );
        Ok(body)
    }
}

#[rocket::async_trait]
impl VideoSource for YouTubeClient {
    async fn search_page(
        &self,
        api_key: &str,
        query: &SearchQuery,
        page_token: Option<&str>,
    ) -> Result<SearchPage, AppError> {
        let url = search_url(&self.base_url, api_key, query, page_token)?;
        let body = self.get_json(url).await?;
        parse_search_page(body)
    }

    async fn fetch_details(
        &self,
        api_key: &str,
        ids: &[String],
    ) -> Result<Vec<RawVideoDetail>, AppError> {
        if ids.len() > MAX_IDS_PER_DETAILS_REQUEST {
            return Err(AppError::BatchTooLarge(ids.len()));
        }
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = videos_url(&self.base_url, api_key, ids)?;
        let body = self.get_json(url).await?;
        let list: RawVideoListResponse = serde_json::from_value(body)?;
        Ok(list.items)
    }
}

// Documentation: https://developers.google.com/youtube/v3/docs/search/list
fn search_url(
    base_url: &str,
    api_key: &str,
    query: &SearchQuery,
    page_token: Option<&str>,
) -> Result<Url, AppError> {
    let max_results = MAX_RESULTS_PER_PAGE.to_string();
    let mut params = vec![
        ("part", "snippet"),
        ("type", "video"),
        ("order", "viewCount"),
        ("regionCode", query.region_code.as_str()),
        ("q", query.query.as_str()),
        ("maxResults", max_results.as_str()),
        ("key", api_key),
    ];
    if let Some(token) = page_token {
        params.push(("pageToken", token));
    }

    build_url(base_url, "search", &params)
}

// Documentation: https://developers.google.com/youtube/v3/docs/videos/list
fn videos_url(base_url: &str, api_key: &str, ids: &[String]) -> Result<Url, AppError> {
    let joined = ids.join(",");
    build_url(
        base_url,
        "videos",
        &[
            ("part", "snippet,statistics,contentDetails"),
            ("id", joined.as_str()),
            ("key", api_key),
        ],
    )
}

fn build_url(base_url: &str, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, AppError> {
    Url::parse_with_params(&format!("{base_url}/{endpoint}"), params)
        .map_err(|e| AppError::InvalidBaseUrl(format!("{base_url}: {e}")))
}

fn parse_search_page(body: Value) -> Result<SearchPage, AppError> {
    let response: RawSearchResponse = serde_json::from_value(body)?;
    let video_ids = response
        .items
        .into_iter()
        .filter_map(|item| item.id.and_then(|id| id.video_id))
        .filter(|id| !id.is_empty())
        .collect();

    Ok(SearchPage {
        video_ids,
        next_page_token: response.next_page_token.filter(|t| !t.is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpstreamReason;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers every request with the same canned response and counts hits.
    async fn canned_upstream(
        status: u16,
        body: &'static str,
    ) -> (YouTubeClient, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);

                let mut request = Vec::new();
                let mut chunk = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&chunk[..n]),
                    }
                }

                let response = format!(
                    "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        let config = Config {
            api_base_url: format!("http://{addr}/v3"),
            ..Config::default()
        };
        (YouTubeClient::new(&config).unwrap(), hits)
    }

    const QUOTA_BODY: &str =
        r#"{"error":{"code":403,"errors":[{"reason":"quotaExceeded"}],"message":"quota"}}"#;

    fn query() -> SearchQuery {
        SearchQuery {
            query: "vpop music videos".to_string(),
            region_code: "VN".to_string(),
        }
    }

    fn params(url: &Url) -> HashMap<String, String> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn search_url_carries_fixed_parameters() {
        let url = search_url(
            "https://www.googleapis.com/youtube/v3",
            "k3y",
            &query(),
            None,
        )
        .unwrap();

        assert_eq!(url.path(), "/youtube/v3/search");
        let params = params(&url);
        assert_eq!(params["part"], "snippet");
        assert_eq!(params["type"], "video");
        assert_eq!(params["order"], "viewCount");
        assert_eq!(params["regionCode"], "VN");
        assert_eq!(params["q"], "vpop music videos");
        assert_eq!(params["maxResults"], "50");
        assert_eq!(params["key"], "k3y");
        assert!(!params.contains_key("pageToken"));
    }

    #[test]
    fn search_url_forwards_page_token() {
        let url = search_url("http://localhost/v3", "k", &query(), Some("CDIQAA")).unwrap();
        assert_eq!(params(&url)["pageToken"], "CDIQAA");
    }

    #[test]
    fn videos_url_joins_ids() {
        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let url = videos_url("http://localhost/v3", "k", &ids).unwrap();

        assert_eq!(url.path(), "/v3/videos");
        let params = params(&url);
        assert_eq!(params["id"], "a,b,c");
        assert_eq!(params["part"], "snippet,statistics,contentDetails");
    }

    #[test]
    fn invalid_base_url_is_reported() {
        assert!(matches!(
            search_url("not a url", "k", &query(), None),
            Err(AppError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn search_page_skips_items_without_video_id() {
        let page = parse_search_page(json!({
            "nextPageToken": "next",
            "items": [
                { "id": { "videoId": "v1" } },
                { "id": { "channelId": "c1" } },
                { "id": { "videoId": "" } },
                {},
                { "id": { "videoId": "v2" } }
            ]
        }))
        .unwrap();

        assert_eq!(page.video_ids, vec!["v1", "v2"]);
        assert_eq!(page.next_page_token.as_deref(), Some("next"));
    }

    #[test]
    fn empty_token_ends_pagination() {
        let page = parse_search_page(json!({ "nextPageToken": "", "items": [] })).unwrap();
        assert_eq!(page, SearchPage::default());
    }

    #[tokio::test]
    async fn oversized_batch_is_rejected_before_any_request() {
        let client = YouTubeClient::new(&Config::default()).unwrap();
        let ids: Vec<String> = (0..51).map(|i| format!("id{i}")).collect();

        assert!(matches!(
            client.fetch_details("k", &ids).await,
            Err(AppError::BatchTooLarge(51))
        ));
    }

    #[tokio::test]
    async fn upstream_failure_keeps_status_reason_and_details() {
        let (client, _) = canned_upstream(403, QUOTA_BODY).await;

        match client.search_page("k", &query(), None).await {
            Err(AppError::Upstream {
                status,
                reason,
                details,
            }) => {
                assert_eq!(status, 403);
                assert_eq!(reason, UpstreamReason::QuotaExceeded);
                assert_eq!(details["error"]["code"], 403);
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_becomes_empty_details() {
        let (client, _) = canned_upstream(502, "<html>Bad Gateway</html>").await;

        match client.search_page("k", &query(), None).await {
            Err(AppError::Upstream {
                status,
                reason,
                details,
            }) => {
                assert_eq!(status, 502);
                assert_eq!(reason, UpstreamReason::Generic);
                assert_eq!(details, json!({}));
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_responses_are_not_cached() {
        let (client, hits) = canned_upstream(403, QUOTA_BODY).await;

        assert!(client.search_page("k", &query(), None).await.is_err());
        assert!(client.search_page("k", &query(), None).await.is_err());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn repeated_request_is_served_from_cache() {
        let (client, hits) = canned_upstream(
            200,
            r#"{"nextPageToken":"t1","items":[{"id":{"videoId":"v1"}}]}"#,
        )
        .await;

        let first = client.search_page("k", &query(), None).await.unwrap();
        let second = client.search_page("k", &query(), None).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.video_ids, vec!["v1"]);
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        client.search_page("k", &query(), Some("t1")).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
