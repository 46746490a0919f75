//! DuckDuckGo client configuration

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::DuckDuckGoError;

/// Configuration for the DuckDuckGo Instant Answer client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuckDuckGoConfig {
    /// Root of all API request URLs
    #[serde(default = "default_api_root")]
    pub api_root: String,

    /// Custom HTTP user agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Transport timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_root() -> String {
    "https://api.duckduckgo.com".to_string()
}

fn default_user_agent() -> String {
    "discerning-duck 0.1; (foo)".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for DuckDuckGoConfig {
    fn default() -> Self {
        Self {
            api_root: default_api_root(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl DuckDuckGoConfig {
    /// Create a configuration pointing at a custom API root (e.g. a mock server)
    #[must_use]
    pub fn with_api_root(api_root: impl Into<String>) -> Self {
        Self {
            api_root: api_root.into(),
            ..Default::default()
        }
    }

    /// Create a configuration for testing (short timeout)
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Parse the API root into a URL
    ///
    /// # Errors
    ///
    /// Returns an error if the root is not an absolute http(s) URL that
    /// can carry path segments.
    pub fn api_root_url(&self) -> Result<Url, DuckDuckGoError> {
        let url = Url::parse(&self.api_root).map_err(|e| {
            DuckDuckGoError::ConfigurationError(format!(
                "api_root '{}' is not a valid URL: {e}",
                self.api_root
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(DuckDuckGoError::ConfigurationError(format!(
                "api_root must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if url.cannot_be_a_base() {
            return Err(DuckDuckGoError::ConfigurationError(format!(
                "api_root '{}' cannot carry a path",
                self.api_root
            )));
        }

        Ok(url)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), DuckDuckGoError> {
        self.api_root_url()?;

        if self.user_agent.trim().is_empty() {
            return Err(DuckDuckGoError::ConfigurationError(
                "user_agent must not be empty".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(DuckDuckGoError::ConfigurationError(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
