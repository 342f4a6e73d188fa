//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `THIMBLE_API_URL` - Base URL of the backend API (e.g., `https://api.example.com/api`)
//!
//! ## Optional
//! - `THIMBLE_DATA_DIR` - Directory for the local store (default: `.thimble`)
//! - `THIMBLE_HTTP_TIMEOUT_SECS` - HTTP request timeout (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_DATA_DIR: &str = ".thimble";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(&'static str, String),
}

/// Client application configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend API.
    pub api_url: Url,
    /// Directory holding the local store's JSON files.
    pub data_dir: PathBuf,
    /// Timeout applied by the HTTP transport. The reconciliation layer adds
    /// no timeout of its own.
    pub http_timeout: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if a required variable is absent
    /// and `ConfigError::InvalidEnvVar` if a value fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = std::env::var("THIMBLE_API_URL")
            .map_err(|_| ConfigError::MissingEnvVar("THIMBLE_API_URL"))?;
        let api_url = Url::parse(&api_url)
            .map_err(|e| ConfigError::InvalidEnvVar("THIMBLE_API_URL", e.to_string()))?;

        let data_dir = std::env::var("THIMBLE_DATA_DIR")
            .map_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let http_timeout = match std::env::var("THIMBLE_HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                ConfigError::InvalidEnvVar("THIMBLE_HTTP_TIMEOUT_SECS", e.to_string())
            })?,
            Err(_) => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Self {
            api_url,
            data_dir,
            http_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_is_rejected() {
        let err = Url::parse("not a url").expect_err("invalid");
        let err = ConfigError::InvalidEnvVar("THIMBLE_API_URL", err.to_string());
        assert!(err.to_string().contains("THIMBLE_API_URL"));
    }
}
