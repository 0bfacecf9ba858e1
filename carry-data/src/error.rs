use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// All errors generated in `carry-data`.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, Error)]
pub enum DataError {
    #[error("failed to fetch page: {0}")]
    Fetch(#[from] FetchError),

    #[error("invalid TimeWindow: start {start} is after end {end}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error(
        "\
        NonConvergence: backfill reached {reached} after {max_pages} pages without \
        covering the requested start {start} \
    "
    )]
    NonConvergence {
        max_pages: usize,
        start: DateTime<Utc>,
        reached: DateTime<Utc>,
    },
}

/// Transport or protocol failure returned by a [`PageFetcher`](crate::fetcher::PageFetcher)
/// for a single page request.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(String),

    #[error("HTTP error status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to build request url: {0}")]
    Url(String),

    #[error("invalid page request: {0}")]
    InvalidRequest(String),

    #[error("failed to deserialise payload: {0}")]
    Deserialise(String),

    #[error("exchange rejected request with code {code}: {message}")]
    Exchange { code: i64, message: String },
}

impl FetchError {
    /// Determine if the source reported that the caller is being rate limited.
    ///
    /// Retrying is left to the caller, the backfill engine never retries.
    #[allow(clippy::match_like_matches_macro)]
    pub fn is_rate_limited(&self) -> bool {
        match self {
            FetchError::Status { status: 403 | 429, .. } => true,
            // Bybit: "Too many visits. Exceeded the API Rate Limit."
            FetchError::Exchange { code: 10006, .. } => true,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => Self::Status {
                status: status.as_u16(),
                body: error.to_string(),
            },
            None if error.is_decode() => Self::Deserialise(error.to_string()),
            None => Self::Request(error.to_string()),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        Self::Deserialise(error.to_string())
    }
}

impl From<url::ParseError> for FetchError {
    fn from(error: url::ParseError) -> Self {
        Self::Url(error.to_string())
    }
}
