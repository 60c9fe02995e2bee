//! Error types for the FMP API client.

use intrinsic_traits::{SourceError, SourceErrorKind};
use thiserror::Error;

/// Errors that can occur when using the FMP API.
#[derive(Debug, Error)]
pub enum FmpError {
    /// Missing API key.
    #[error("FMP_API_KEY environment variable not set")]
    MissingApiKey,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error.
    #[error("FMP API error: {0}")]
    Api(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded. Free tier allows 250 requests/day.")]
    RateLimitExceeded,

    /// No data available.
    #[error("No data available for {0}")]
    NoData(String),
}

impl From<FmpError> for SourceError {
    fn from(err: FmpError) -> Self {
        let kind = match &err {
            FmpError::MissingApiKey => SourceErrorKind::MissingCredential,
            FmpError::Request(e) if e.is_timeout() => SourceErrorKind::Timeout,
            FmpError::Request(e) if e.is_builder() => SourceErrorKind::Internal,
            FmpError::Request(_) | FmpError::Api(_) => SourceErrorKind::Unavailable,
            FmpError::Json(_) => SourceErrorKind::Malformed,
            FmpError::RateLimitExceeded => SourceErrorKind::RateLimited,
            FmpError::NoData(_) => SourceErrorKind::NoData,
        };
        Self::new(kind, err.to_string())
    }
}
