//! Widget configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `CART_API_BASE` - Catalog API base URL (default: `https://api.mercadolibre.com`)
//! - `CART_SITE_ID` - Catalog site used for searches (default: MLB)
//! - `CART_SEARCH_QUERY` - Query for the initial product listing (default: computador)
//! - `CART_STORAGE_KEY` - Key the cart is persisted under (default: cart)
//! - `CART_STORAGE_DIR` - Directory backing the file store (default: .cart)

use std::path::PathBuf;
use std::sync::LazyLock;

use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE: &str = "https://api.mercadolibre.com";
const DEFAULT_SITE_ID: &str = "MLB";
const DEFAULT_SEARCH_QUERY: &str = "computador";
const DEFAULT_STORAGE_KEY: &str = "cart";
const DEFAULT_STORAGE_DIR: &str = ".cart";

/// Parsed form of [`DEFAULT_API_BASE`], built once.
static DEFAULT_API_BASE_URL: LazyLock<Url> =
    LazyLock::new(|| Url::parse(DEFAULT_API_BASE).expect("Invalid default API base"));

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Shopping cart widget configuration.
///
/// Built once by the entry point and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Catalog API base URL
    pub api_base: Url,
    /// Catalog site identifier used in the search path
    pub site_id: String,
    /// Query used to populate the product list at startup
    pub search_query: String,
    /// Key the serialized cart is stored under
    pub storage_key: String,
    /// Directory used by the file-backed store
    pub storage_dir: PathBuf,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE_URL.clone(),
            site_id: DEFAULT_SITE_ID.to_string(),
            search_query: DEFAULT_SEARCH_QUERY.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
        }
    }
}

impl WidgetConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            api_base: parse_api_base(&get_env_or_default("CART_API_BASE", DEFAULT_API_BASE))?,
            site_id: get_non_empty_env("CART_SITE_ID", DEFAULT_SITE_ID)?,
            search_query: get_env_or_default("CART_SEARCH_QUERY", DEFAULT_SEARCH_QUERY),
            storage_key: get_non_empty_env("CART_STORAGE_KEY", DEFAULT_STORAGE_KEY)?,
            storage_dir: PathBuf::from(get_env_or_default("CART_STORAGE_DIR", DEFAULT_STORAGE_DIR)),
        })
    }

    /// Point the widget at a different catalog (mock servers, staging mirrors).
    #[must_use]
    pub fn with_api_base(mut self, api_base: Url) -> Self {
        self.api_base = api_base;
        self
    }

    /// Store the cart under a different key.
    #[must_use]
    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable with a default, rejecting blank values.
fn get_non_empty_env(key: &str, default: &str) -> Result<String, ConfigError> {
    let value = get_env_or_default(key, default);
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be empty".to_string(),
        ));
    }
    Ok(value)
}

/// Parse the catalog base URL, trimming any trailing slash.
fn parse_api_base(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim_end_matches('/'))
        .map_err(|e| ConfigError::InvalidEnvVar("CART_API_BASE".to_string(), e.to_string()))?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            "CART_API_BASE".to_string(),
            "must be an absolute http(s) URL".to_string(),
        ));
    }

    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WidgetConfig::default();
        assert_eq!(config.api_base.as_str(), "https://api.mercadolibre.com/");
        assert_eq!(config.site_id, "MLB");
        assert_eq!(config.search_query, "computador");
        assert_eq!(config.storage_key, "cart");
    }

    #[test]
    fn test_default_api_base_matches_env_parsing() {
        assert_eq!(*DEFAULT_API_BASE_URL, parse_api_base(DEFAULT_API_BASE).unwrap());
    }

    #[test]
    fn test_parse_api_base_trims_trailing_slash() {
        let url = parse_api_base("http://127.0.0.1:8080/api/").unwrap();
        assert_eq!(url.path(), "/api");
    }

    #[test]
    fn test_parse_api_base_rejects_garbage() {
        let err = parse_api_base("not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "CART_API_BASE"));
    }

    #[test]
    fn test_parse_api_base_rejects_non_base() {
        assert!(parse_api_base("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_builders() {
        let config = WidgetConfig::default()
            .with_api_base(Url::parse("http://localhost:9000").unwrap())
            .with_storage_key("test-cart");

        assert_eq!(config.api_base.port(), Some(9000));
        assert_eq!(config.storage_key, "test-cart");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidEnvVar("CART_SITE_ID".to_string(), "must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid environment variable CART_SITE_ID: must not be empty"
        );
    }
}
