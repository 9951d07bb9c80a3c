//! Upstream job-search API client.
//!
//! ### Wire contract
//!
//! - HTTP GET to a fixed endpoint with Basic authentication: the API key is
//!   the username, the password is empty.
//! - A Referer header identifies the consuming site.
//! - Query parameters carry locale, pagination, caller context and the
//!   optional search criteria.
//! - Non-2xx responses are errors; the body of a 2xx response is returned
//!   verbatim for caching and parsed downstream.

pub mod error;
pub mod request;
pub mod response;

pub use error::ApiError;
pub use request::{QueryContext, build_query, cache_key, query_string};
pub use response::{RawJob, RawResponse, SearchResponse};

use reqwest::header;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default upstream endpoint; normally overridden from [`joblens_core::AppConfig`].
const DEFAULT_BASE_URL: &str = "https://api.careerstack.io/v1/search";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent for the outbound request itself.
const DEFAULT_USER_AGENT: &str = "joblens/0.1";

/// Upstream API client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API credential, sent as the Basic auth username.
    pub api_key: String,
    /// Upstream endpoint URL.
    pub base_url: String,
    /// Referer header value.
    pub referer: String,
    /// User-agent for the outbound HTTP request.
    pub user_agent: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            referer: String::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    /// Build client configuration from the application config.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingApiKey` when no credential is configured.
    /// This is the fatal configuration error; it fires before any network
    /// attempt.
    pub fn from_app(config: &joblens_core::AppConfig) -> Result<Self, ApiError> {
        let api_key = config.require_api_key().map_err(|_| ApiError::MissingApiKey)?;
        Ok(Self {
            api_key: api_key.to_string(),
            base_url: config.api_base_url.clone(),
            referer: config.referer.clone(),
            user_agent: config.fallback_user_agent.clone(),
            timeout: config.timeout(),
        })
    }
}

/// Authenticated client for the upstream search endpoint.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Create a client, rejecting an empty credential up front.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        if config.api_key.is_empty() {
            return Err(ApiError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(Arc::new(e)))?;

        Ok(Self { http, config })
    }

    /// Issue a search request and return the raw response body.
    ///
    /// The same `pairs` that built the cache key go on the wire, so cached
    /// and fetched responses are keyed identically.
    pub async fn fetch_raw(&self, pairs: &[(String, String)]) -> Result<String, ApiError> {
        let start = Instant::now();

        let http_response = self
            .http
            .get(&self.config.base_url)
            .basic_auth(&self.config.api_key, Some(""))
            .header(header::REFERER, &self.config.referer)
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, &self.config.user_agent)
            .query(pairs)
            .send()
            .await
            .map_err(
                |e| {
                    if e.is_timeout() { ApiError::Timeout } else { ApiError::Network(Arc::new(e)) }
                },
            )?;

        let status = http_response.status();
        tracing::debug!("upstream search response status: {}", status);

        if status == 401 || status == 403 {
            return Err(ApiError::AuthFailed);
        }

        if status == 429 {
            return Err(ApiError::RateLimited);
        }

        if status.is_client_error() || status.is_server_error() {
            return Err(ApiError::Http { status: status.as_u16() });
        }

        let body = http_response
            .text()
            .await
            .map_err(|e| ApiError::Network(Arc::new(e)))?;

        tracing::debug!("upstream search completed in {:?}", start.elapsed());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_rejects_empty_key() {
        let result = ApiClient::new(ApiConfig::default());
        assert!(matches!(result, Err(ApiError::MissingApiKey)));
    }

    #[test]
    fn test_config_from_app_missing_key() {
        let app = joblens_core::AppConfig::default();
        assert!(matches!(ApiConfig::from_app(&app), Err(ApiError::MissingApiKey)));
    }

    #[test]
    fn test_config_from_app_carries_fields() {
        let app = joblens_core::AppConfig {
            api_key: Some("test-key".into()),
            referer: "https://jobs.example".into(),
            ..Default::default()
        };
        let config = ApiConfig::from_app(&app).unwrap();
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.referer, "https://jobs.example");
        assert_eq!(config.timeout, Duration::from_millis(10_000));
    }
}
