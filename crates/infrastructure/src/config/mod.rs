//! Application configuration
//!
//! Split into sections:
//! - `geocoder`: widget options (provider, language, limits, behaviour)
//! - `http`: outbound provider requests
//! - `logging`: log format and filter
//!
//! Sources are layered: built-in defaults, then an optional `geocoder.toml`
//! in the working directory, then `GEOCODER_` environment variables using
//! `__` between section and key (e.g. `GEOCODER_HTTP__TIMEOUT_SECS=5`).

mod http;
mod logging;

use std::path::Path;

use application::GeocoderOptions;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use http::HttpAppConfig;
pub use logging::{LogFormat, LoggingConfig};

/// Base name of the optional configuration file
pub const DEFAULT_CONFIG_FILE: &str = "geocoder";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "GEOCODER";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Widget options
    #[serde(default)]
    pub geocoder: GeocoderOptions,

    /// Provider request settings
    #[serde(default)]
    pub http: HttpAppConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from defaults, `geocoder.toml` (if present) and
    /// the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name(DEFAULT_CONFIG_FILE).required(false))
    }

    /// Load configuration from a specific file, then the environment
    ///
    /// The format is inferred from the file extension.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path.as_ref()).required(true))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app: Self = config.try_deserialize()?;
        debug!(provider = %app.geocoder.provider, "Configuration loaded");
        Ok(app)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting, prefixed with its section.
    pub fn validate(&self) -> Result<(), String> {
        self.geocoder
            .validate()
            .map_err(|e| format!("geocoder: {e}"))?;
        self.http
            .to_geocoding_config()
            .validate()
            .map_err(|e| format!("http: {e}"))?;
        Ok(())
    }
}
