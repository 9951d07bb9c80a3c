//! Upstream API client error types.

use std::sync::Arc;

/// Errors from the upstream job-search API client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing API credential; fatal and raised before any network attempt.
    #[error("missing API key: JOBLENS_API_KEY not set")]
    MissingApiKey,

    /// Authentication rejected (invalid credential).
    #[error("authentication failed: credential rejected by upstream")]
    AuthFailed,

    /// Rate limited by the upstream API.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// Other non-2xx HTTP response.
    #[error("HTTP error: {status}")]
    Http { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response body could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { ApiError::Timeout } else { ApiError::Network(Arc::new(err)) }
    }
}
