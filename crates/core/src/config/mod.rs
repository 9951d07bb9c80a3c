//! Application configuration with layered loading.
//!
//! Configuration is assembled with figment from three sources:
//!
//! 1. Built-in defaults
//! 2. TOML config file (if JOBLENS_CONFIG_FILE is set)
//! 3. Environment variables (JOBLENS_*)

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration.
///
/// Loading precedence (highest wins): environment variables, then the TOML
/// file, then built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Upstream search API credential, sent as the Basic auth username.
    ///
    /// Set via JOBLENS_API_KEY. Required only when a search is attempted.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Upstream search endpoint.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Referer header value the upstream API expects.
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Locale code passed with every search.
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Client IP reported upstream when no inbound request header is available.
    #[serde(default = "default_fallback_ip")]
    pub fallback_ip: String,

    /// User-agent reported upstream when no inbound request header is available.
    #[serde(default = "default_fallback_user_agent")]
    pub fallback_user_agent: String,

    /// Public origin of this site, used in the sitemap, robots policy and
    /// structured data (no trailing slash).
    #[serde(default = "default_site_origin")]
    pub site_origin: String,

    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Path to the SQLite response cache database.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Expiration window for cached search responses, in seconds.
    #[serde(default = "default_response_ttl_secs")]
    pub response_ttl_secs: i64,

    /// Expiration for in-memory job cache entries, in seconds.
    #[serde(default = "default_job_ttl_secs")]
    pub job_ttl_secs: i64,

    /// Upstream HTTP request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Default listing page size when the caller supplies none.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Advertising slot identifier consumed by the client-side ad loader.
    #[serde(default)]
    pub ad_slot_id: Option<String>,
}

fn default_api_base_url() -> String {
    "https://api.careerstack.io/v1/search".into()
}

fn default_referer() -> String {
    "https://joblens.example".into()
}

fn default_locale() -> String {
    "en_US".into()
}

fn default_fallback_ip() -> String {
    "127.0.0.1".into()
}

fn default_fallback_user_agent() -> String {
    "joblens/0.1".into()
}

fn default_site_origin() -> String {
    "http://localhost:8080".into()
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".into()
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./joblens-cache.sqlite")
}

fn default_response_ttl_secs() -> i64 {
    600
}

fn default_job_ttl_secs() -> i64 {
    900 // 15 minutes
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_page_size() -> u32 {
    20
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: default_api_base_url(),
            referer: default_referer(),
            locale: default_locale(),
            fallback_ip: default_fallback_ip(),
            fallback_user_agent: default_fallback_user_agent(),
            site_origin: default_site_origin(),
            bind_addr: default_bind_addr(),
            db_path: default_db_path(),
            response_ttl_secs: default_response_ttl_secs(),
            job_ttl_secs: default_job_ttl_secs(),
            timeout_ms: default_timeout_ms(),
            page_size: default_page_size(),
            ad_slot_id: None,
        }
    }
}

impl AppConfig {
    /// Upstream timeout as a Duration for use with reqwest.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be read or validation
    /// fails after loading.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("JOBLENS_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("JOBLENS_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let mut config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        while config.site_origin.ends_with('/') {
            config.site_origin.pop();
        }

        config.validate()?;

        Ok(config)
    }

    /// The upstream API credential, or the fatal configuration error.
    ///
    /// Raised before any network attempt; not caught by the search path.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "api_key".into(),
            hint: "Set JOBLENS_API_KEY environment variable".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.db_path, PathBuf::from("./joblens-cache.sqlite"));
        assert_eq!(config.response_ttl_secs, 600);
        assert_eq!(config.job_ttl_secs, 900);
        assert_eq!(config.page_size, 20);
        assert_eq!(config.locale, "en_US");
        assert!(config.ad_slot_id.is_none());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(10_000));
    }

    #[test]
    fn test_require_api_key_missing() {
        let config = AppConfig::default();
        assert!(matches!(config.require_api_key(), Err(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_require_api_key_present() {
        let config = AppConfig { api_key: Some("test-key".into()), ..Default::default() };
        assert_eq!(config.require_api_key().unwrap(), "test-key");
    }
}
