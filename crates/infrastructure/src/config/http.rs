//! Outbound HTTP settings for provider requests

use integration_geocoding::GeocodingConfig;
use serde::{Deserialize, Serialize};

/// HTTP configuration for provider requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpAppConfig {
    /// Request timeout in seconds (0 disables the timeout)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User agent sent with every provider request
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Base URL replacing the built-in endpoint of every provider
    ///
    /// Intended for a self-hosted Nominatim or Photon instance.
    #[serde(default)]
    pub endpoint_override: Option<String>,
}

const fn default_timeout() -> u64 {
    10
}

impl Default for HttpAppConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: None,
            endpoint_override: None,
        }
    }
}

impl HttpAppConfig {
    /// Convert to the integration crate's transport configuration
    #[must_use]
    pub fn to_geocoding_config(&self) -> GeocodingConfig {
        let defaults = GeocodingConfig::default();
        GeocodingConfig {
            timeout_secs: self.timeout_secs,
            user_agent: self
                .user_agent
                .clone()
                .filter(|ua| !ua.trim().is_empty())
                .unwrap_or(defaults.user_agent),
            endpoint_override: self.endpoint_override.clone(),
        }
    }
}
