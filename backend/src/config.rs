use crate::error::AppError;
use crate::services::youtube_client::YouTubeClient;
use crate::AppState;
use anyhow::Result;
use env_logger::Builder;
use log::{info, warn, LevelFilter};
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const API_KEY_PLACEHOLDER: &str = "paste_your_api_key_here";
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub search_query: String,
    pub region_code: String,
    /// Upper bound on search.list calls per request (100 quota units each).
    pub search_pages: usize,
    pub max_videos: usize,
    pub videos_per_page: usize,
    pub cache_ttl: Duration,
    pub upstream_timeout: Duration,
    pub frontend_origin: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            search_query: "vpop music videos".to_string(),
            region_code: "VN".to_string(),
            search_pages: 5,
            max_videos: 100,
            videos_per_page: 25,
            cache_ttl: Duration::from_secs(3600),
            upstream_timeout: Duration::from_secs(30),
            frontend_origin: "http://localhost:8080".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Config {
            api_key: lookup("YOUTUBE_API_KEY"),
            api_base_url: lookup("YOUTUBE_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            search_query: lookup("SEARCH_QUERY").unwrap_or(defaults.search_query),
            region_code: lookup("SEARCH_REGION_CODE").unwrap_or(defaults.region_code),
            search_pages: parse_or(&lookup, "SEARCH_PAGES", defaults.search_pages),
            max_videos: parse_or(&lookup, "MAX_VIDEOS", defaults.max_videos),
            videos_per_page: parse_or(&lookup, "VIDEOS_PER_PAGE", defaults.videos_per_page)
                .max(1),
            cache_ttl: Duration::from_secs(parse_or(
                &lookup,
                "CACHE_TTL_SECS",
                defaults.cache_ttl.as_secs(),
            )),
            upstream_timeout: Duration::from_secs(parse_or(
                &lookup,
                "UPSTREAM_TIMEOUT_SECS",
                defaults.upstream_timeout.as_secs(),
            )),
            frontend_origin: lookup("FRONTEND_ORIGIN").unwrap_or(defaults.frontend_origin),
        }
    }

    /// The credential, unless it is missing or still the `.env` placeholder.
    pub fn api_key(&self) -> Result<&str, AppError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() && key != API_KEY_PLACEHOLDER => Ok(key),
            _ => Err(AppError::Configuration),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring malformed {key}={raw:?}, using default");
            default
        }),
        None => default,
    }
}

pub fn init_logger() {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
    info!("Starting Rocket backend...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

pub fn create_app_state(config: Config) -> Result<AppState> {
    if config.api_key().is_err() {
        warn!("YOUTUBE_API_KEY is not set; /videos will answer with 500 until it is configured.");
    }

    let client = YouTubeClient::new(&config)?;
    info!(
        "YouTube client ready: {} search page(s) per request, cache TTL {}s",
        config.search_pages,
        config.cache_ttl.as_secs()
    );

    Ok(AppState {
        config,
        source: Box::new(client),
    })
}

pub fn create_cors(config: &Config) -> Result<rocket_cors::Cors> {
    let cors = CorsOptions::default()
        .allowed_origins(AllowedOrigins::some_exact(&[config.frontend_origin.as_str()]))
        .allowed_methods(
            vec![Method::Get, Method::Options]
                .into_iter()
                .map(From::from)
                .collect(),
        )
        .allowed_headers(AllowedHeaders::some(&["Accept", "Content-Type"]))
        .to_cors()
        .map_err(|e| anyhow::anyhow!("Failed to create CORS options: {}", e))?;

    Ok(cors)
}
