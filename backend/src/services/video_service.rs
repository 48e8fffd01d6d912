use crate::config::Config;
use crate::error::AppError;
use crate::models::{NormalizedVideo, PageResult, RawVideoDetail, VideosResponse};
use crate::services::youtube_client::{SearchQuery, VideoSource, MAX_IDS_PER_DETAILS_REQUEST};
use crate::utils::{parse_count, parse_iso8601_duration_to_seconds};
use log::info;
use std::cmp::Reverse;

/// Anything at or below this length is treated as a Short.
pub const SHORTS_MAX_SECONDS: u64 = 60;

/// Walks search pages until the token runs out, a page comes back empty,
/// or `max_pages` calls have been made.
pub async fn collect_video_ids(
    source: &dyn VideoSource,
    api_key: &str,
    query: &SearchQuery,
    max_pages: usize,
) -> Result<Vec<String>, AppError> {
    let mut video_ids = Vec::new();
    let mut page_token: Option<String> = None;

    for page_number in 1..=max_pages {
        let page = source
            .search_page(api_key, query, page_token.as_deref())
            .await?;
        let page_len = page.video_ids.len();
        video_ids.extend(page.video_ids);
        info!("Search page {page_number}: {page_len} ids ({} total)", video_ids.len());

        page_token = page.next_page_token;
        if page_token.is_none() || page_len == 0 {
            break;
        }
    }

    Ok(video_ids)
}

/// Fetches details in batches of at most 50 ids.
pub async fn fetch_all_details(
    source: &dyn VideoSource,
    api_key: &str,
    video_ids: &[String],
) -> Result<Vec<RawVideoDetail>, AppError> {
    let mut details = Vec::with_capacity(video_ids.len());
    for batch in video_ids.chunks(MAX_IDS_PER_DETAILS_REQUEST) {
        details.extend(source.fetch_details(api_key, batch).await?);
    }
    info!(
        "Fetched {} video details in {} batch(es)",
        details.len(),
        video_ids.len().div_ceil(MAX_IDS_PER_DETAILS_REQUEST)
    );
    Ok(details)
}

pub fn normalize(raw: RawVideoDetail) -> NormalizedVideo {
    let duration_seconds = parse_iso8601_duration_to_seconds(
        raw.content_details
            .as_ref()
            .and_then(|c| c.duration.as_deref()),
    );
    let snippet = raw.snippet.unwrap_or_default();
    let statistics = raw.statistics.unwrap_or_default();
    let thumbnail_url = snippet.thumbnails.and_then(|t| {
        [t.high, t.medium, t.default]
            .into_iter()
            .flatten()
            .find_map(|thumbnail| thumbnail.url)
    });

    NormalizedVideo {
        id: raw.id,
        title: snippet.title,
        channel_title: snippet.channel_title,
        published_at: snippet.published_at,
        thumbnail_url,
        view_count: statistics.view_count,
        like_count: statistics.like_count,
        duration_seconds,
    }
}

/// Normalize, drop Shorts, order by views (most first) and cap at `max_videos`.
pub fn aggregate(raw_details: Vec<RawVideoDetail>, max_videos: usize) -> Vec<NormalizedVideo> {
    let mut videos: Vec<NormalizedVideo> = raw_details
        .into_iter()
        .map(normalize)
        .filter(|video| video.duration_seconds > SHORTS_MAX_SECONDS)
        .collect();

    videos.sort_by_key(|video| Reverse(parse_count(video.view_count.as_deref())));
    videos.truncate(max_videos);
    videos
}

pub fn paginate(
    videos: Vec<NormalizedVideo>,
    requested_page: usize,
    page_size: usize,
) -> (Vec<NormalizedVideo>, PageResult) {
    let page_size = page_size.max(1);
    let total_count = videos.len();
    let total_pages = total_count.div_ceil(page_size).max(1);
    let page = requested_page.clamp(1, total_pages);

    let items = videos
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    (
        items,
        PageResult {
            page,
            total_pages,
            total_count,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        },
    )
}

/// The whole `/videos` pipeline: search, details, aggregate, paginate.
pub async fn list_videos(
    source: &dyn VideoSource,
    config: &Config,
    requested_page: usize,
) -> Result<VideosResponse, AppError> {
    let api_key = config.api_key()?;
    let query = SearchQuery::from_config(config);

    let video_ids = collect_video_ids(source, api_key, &query, config.search_pages).await?;
    if video_ids.is_empty() {
        info!("Search returned no videos for {:?}", query.query);
        return Ok(VideosResponse::new(Vec::new(), PageResult::empty()));
    }

    let details = fetch_all_details(source, api_key, &video_ids).await?;
    let videos = aggregate(details, config.max_videos);
    let (items, pagination) = paginate(videos, requested_page, config.videos_per_page);

    Ok(VideosResponse::new(items, pagination))
}
