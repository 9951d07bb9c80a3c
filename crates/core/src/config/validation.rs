//! Configuration validation rules.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - either TTL is not positive
    /// - `timeout_ms` is below 100ms or above 5 minutes
    /// - `page_size` is 0 or above 100
    /// - `site_origin` is not an http(s) origin
    /// - `fallback_user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.response_ttl_secs <= 0 {
            return Err(ConfigError::Invalid {
                field: "response_ttl_secs".into(),
                reason: "must be positive".into(),
            });
        }
        if self.job_ttl_secs <= 0 {
            return Err(ConfigError::Invalid { field: "job_ttl_secs".into(), reason: "must be positive".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.page_size == 0 || self.page_size > 100 {
            return Err(ConfigError::Invalid { field: "page_size".into(), reason: "must be between 1 and 100".into() });
        }

        if !self.site_origin.starts_with("http://") && !self.site_origin.starts_with("https://") {
            return Err(ConfigError::Invalid {
                field: "site_origin".into(),
                reason: "must be an http(s) origin".into(),
            });
        }

        if self.fallback_user_agent.is_empty() {
            return Err(ConfigError::Invalid {
                field: "fallback_user_agent".into(),
                reason: "must not be empty".into(),
            });
        }

        if self.api_key.is_none() {
            tracing::warn!("api_key is not set; searches will fail at startup of the search service");
        }

        Ok(())
    }
}
