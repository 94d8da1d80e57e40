//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPFRONT_API_URL` - Base endpoint root of the storefront API
//!   (default: `http://localhost:8080/api`)
//! - `SHOPFRONT_DATA_DIR` - Directory for persisted session state
//!   (default: `$HOME/.shopfront`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default base endpoint root, matching the development server.
const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Directory under the home directory used when `SHOPFRONT_DATA_DIR` is unset.
const DEFAULT_DATA_DIR_NAME: &str = ".shopfront";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Could not determine home directory; set SHOPFRONT_DATA_DIR")]
    NoHomeDirectory,
}

/// Client application configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base endpoint root; all API paths are relative to it.
    pub api_url: Url,
    /// Directory holding the persisted session entries.
    pub data_dir: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `SHOPFRONT_API_URL` is not a valid URL, or
    /// if no data directory can be determined.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_api_url(&get_env_or_default("SHOPFRONT_API_URL", DEFAULT_API_URL))?;

        let data_dir = match get_optional_env("SHOPFRONT_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::home_dir()
                .ok_or(ConfigError::NoHomeDirectory)?
                .join(DEFAULT_DATA_DIR_NAME),
        };

        Ok(Self { api_url, data_dir })
    }

    /// Build a configuration from explicit parts.
    ///
    /// Used by tests and embedders that do not read the environment.
    #[must_use]
    pub const fn new(api_url: Url, data_dir: PathBuf) -> Self {
        Self { api_url, data_dir }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse the API base URL.
fn parse_api_url(value: &str) -> Result<Url, ConfigError> {
    value
        .parse::<Url>()
        .map_err(|e| ConfigError::InvalidEnvVar("SHOPFRONT_API_URL".to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_url_valid() {
        let url = parse_api_url("http://localhost:8080/api").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api");
    }

    #[test]
    fn test_parse_api_url_default_is_valid() {
        assert!(parse_api_url(DEFAULT_API_URL).is_ok());
    }

    #[test]
    fn test_parse_api_url_invalid() {
        let result = parse_api_url("not a url");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_new_from_parts() {
        let config = ClientConfig::new(
            "http://127.0.0.1:9999".parse().unwrap(),
            PathBuf::from("/tmp/shopfront-test"),
        );
        assert_eq!(config.api_url.port(), Some(9999));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/shopfront-test"));
    }
}
