use crate::models::ErrorResponse;
use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::Response;
use serde_json::Value;
use std::io::Cursor;
use thiserror::Error;

pub const QUOTA_EXCEEDED_MESSAGE: &str =
    "YouTube API quota exceeded. Try again tomorrow or increase quota in Google Cloud Console.";
pub const RATE_LIMITED_MESSAGE: &str =
    "YouTube API rate limit exceeded. Please try again in a few minutes.";
pub const GENERIC_UPSTREAM_MESSAGE: &str = "YouTube API error";
pub const UNEXPECTED_MESSAGE: &str = "Failed to fetch from YouTube API";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamReason {
    QuotaExceeded,
    RateLimitExceeded,
    Generic,
}

impl UpstreamReason {
    pub fn from_reason(reason: Option<&str>) -> Self {
        match reason {
            Some("quotaExceeded") => UpstreamReason::QuotaExceeded,
            Some("rateLimitExceeded") => UpstreamReason::RateLimitExceeded,
            _ => UpstreamReason::Generic,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            UpstreamReason::QuotaExceeded => QUOTA_EXCEEDED_MESSAGE,
            UpstreamReason::RateLimitExceeded => RATE_LIMITED_MESSAGE,
            UpstreamReason::Generic => GENERIC_UPSTREAM_MESSAGE,
        }
    }
}

/// Reads `error.errors[0].reason` from a YouTube error body.
pub fn classify_upstream_reason(payload: &Value) -> UpstreamReason {
    UpstreamReason::from_reason(
        payload
            .pointer("/error/errors/0/reason")
            .and_then(Value::as_str),
    )
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("YOUTUBE_API_KEY is not configured. Add your key to .env")]
    Configuration,

    #[error("{} (HTTP {status})", .reason.message())]
    Upstream {
        status: u16,
        reason: UpstreamReason,
        details: Value,
    },

    #[error("YouTube request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed YouTube response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("details request holds {0} ids, the limit is 50")]
    BatchTooLarge(usize),

    #[error("invalid YouTube API base URL {0}")]
    InvalidBaseUrl(String),
}

impl AppError {
    pub fn status(&self) -> Status {
        match self {
            AppError::Upstream { status, .. } => Status::new(*status),
            _ => Status::InternalServerError,
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            AppError::Configuration => ErrorResponse {
                error: self.to_string(),
                details: None,
            },
            AppError::Upstream {
                reason, details, ..
            } => ErrorResponse {
                error: reason.message().to_string(),
                details: Some(details.clone()),
            },
            AppError::Transport(_)
            | AppError::Decode(_)
            | AppError::BatchTooLarge(_)
            | AppError::InvalidBaseUrl(_) => ErrorResponse {
                error: UNEXPECTED_MESSAGE.to_string(),
                details: None,
            },
        }
    }
}

impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let json = serde_json::to_string(&self.to_error_response())
            .map_err(|_| Status::InternalServerError)?;
        Response::build()
            .status(self.status())
            .header(ContentType::JSON)
            .sized_body(json.len(), Cursor::new(json))
            .ok()
    }
}
