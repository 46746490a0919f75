//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `discerning-duck.toml` (or an explicit `--config` file), then
//! `DISCERNING_DUCK_*` environment variables such as
//! `DISCERNING_DUCK_DUCKDUCKGO__USER_AGENT`.

use std::path::Path;

use integration_duckduckgo::DuckDuckGoConfig;
use serde::{Deserialize, Serialize};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "discerning-duck";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "DISCERNING_DUCK";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Instant Answer API settings
    #[serde(default)]
    pub duckduckgo: DuckDuckGoConfig,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(CONFIG_FILE_NAME).required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            // Override with environment variables (e.g., DISCERNING_DUCK_DUCKDUCKGO__API_ROOT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
