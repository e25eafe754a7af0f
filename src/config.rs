//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Remote record store (all three or none)
//! - `STOREFRONT_API_URL` - Base URL of the record-storage API
//! - `STOREFRONT_PROJECT_ID` - Project identifier sent with every request
//! - `STOREFRONT_PUBLIC_KEY` - Public API key sent with every request
//!
//! ## Optional
//! - `STOREFRONT_HTTP_TIMEOUT_SECS` - Request timeout (default: 30)
//! - `STOREFRONT_PAGE_SIZE` - Row limit for list queries (default: 100)
//! - `STOREFRONT_SIMULATED_LATENCY` - `on` to delay every call (default: off)
//! - `STOREFRONT_LOG` - Log filter, takes precedence over `RUST_LOG`
//!
//! Without `STOREFRONT_API_URL` the storefront runs against a seeded
//! in-memory record store.

use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_PAGE_SIZE: usize = 100;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Hosted record store; `None` selects the in-memory store
    pub remote: Option<RemoteConfig>,
    /// Row limit for `get_all` style queries
    pub page_size: usize,
    /// Artificial delay awaited before each record store call
    pub latency: LatencyConfig,
    /// Log filter directive overriding `RUST_LOG`
    pub log_filter: Option<String>,
}

/// Connection settings for [`HttpRecordStore`](crate::record_store::HttpRecordStore).
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub base_url: Url,
    pub project_id: String,
    pub public_key: String,
    pub timeout: Duration,
}

/// Per-operation artificial delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LatencyConfig {
    pub list: Duration,
    pub query: Duration,
    pub get: Duration,
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl LatencyConfig {
    pub fn none() -> Self {
        Self::default()
    }

    /// Delays mimicking a slow backend during demos.
    pub fn simulated() -> Self {
        Self {
            list: Duration::from_millis(300),
            query: Duration::from_millis(250),
            get: Duration::from_millis(200),
            create: Duration::from_millis(300),
            update: Duration::from_millis(300),
            delete: Duration::from_millis(300),
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            remote: None,
            page_size: DEFAULT_PAGE_SIZE,
            latency: LatencyConfig::none(),
            log_filter: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed, or if the API URL is
    /// set without its credentials.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let remote = match get("STOREFRONT_API_URL") {
            Some(raw) => {
                let base_url = Url::parse(&raw)
                    .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_API_URL".to_string(), e.to_string()))?;
                let require = |key: &str| get(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()));
                let timeout_secs = parse_or(get("STOREFRONT_HTTP_TIMEOUT_SECS"), "STOREFRONT_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?;

                Some(RemoteConfig {
                    base_url,
                    project_id: require("STOREFRONT_PROJECT_ID")?,
                    public_key: require("STOREFRONT_PUBLIC_KEY")?,
                    timeout: Duration::from_secs(timeout_secs),
                })
            }
            None => None,
        };

        let page_size = parse_or(get("STOREFRONT_PAGE_SIZE"), "STOREFRONT_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_PAGE_SIZE".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let latency = match get("STOREFRONT_SIMULATED_LATENCY").as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("off" | "false" | "0") => LatencyConfig::none(),
            Some("on" | "true" | "1") => LatencyConfig::simulated(),
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "STOREFRONT_SIMULATED_LATENCY".to_string(),
                    format!("expected on/off, got {other}"),
                ))
            }
        };

        Ok(Self {
            remote,
            page_size,
            latency,
            log_filter: get("STOREFRONT_LOG"),
        })
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}
