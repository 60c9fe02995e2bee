//! Error types for the Yahoo Finance client.

use intrinsic_traits::{SourceError, SourceErrorKind};
use thiserror::Error;

/// Errors that can occur when querying Yahoo Finance.
#[derive(Debug, Error)]
pub enum YahooError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Yahoo answered with an error status or error payload.
    #[error("Yahoo API error: {0}")]
    Api(String),

    /// Session cookie or crumb could not be obtained or was rejected.
    #[error("Yahoo session error: {0}")]
    Session(String),

    /// Too many requests.
    #[error("Yahoo rate limit exceeded")]
    RateLimited,

    /// No data available.
    #[error("No data available for {0}")]
    NoData(String),
}

impl From<YahooError> for SourceError {
    fn from(err: YahooError) -> Self {
        let kind = match &err {
            YahooError::Request(e) if e.is_timeout() => SourceErrorKind::Timeout,
            YahooError::Request(e) if e.is_builder() => SourceErrorKind::Internal,
            YahooError::Request(_) | YahooError::Api(_) | YahooError::Session(_) => {
                SourceErrorKind::Unavailable
            }
            YahooError::Json(_) => SourceErrorKind::Malformed,
            YahooError::RateLimited => SourceErrorKind::RateLimited,
            YahooError::NoData(_) => SourceErrorKind::NoData,
        };
        Self::new(kind, err.to_string())
    }
}
