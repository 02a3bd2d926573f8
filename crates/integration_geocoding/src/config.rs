//! Geocoding transport configuration

use serde::{Deserialize, Serialize};

/// Configuration for the geocoding HTTP transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Request timeout in seconds, also bounds callback responses
    /// (0 leaves requests unbounded)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Replaces the built-in endpoint of the selected provider
    ///
    /// Useful for self-hosted Nominatim or Photon instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_override: Option<String>,
}

const fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("geocoder/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            endpoint_override: None,
        }
    }
}

impl GeocodingConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Check if a request timeout is configured
    #[must_use]
    pub const fn timeout_enabled(&self) -> bool {
        self.timeout_secs > 0
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }

        if let Some(endpoint) = &self.endpoint_override {
            url::Url::parse(endpoint)
                .map_err(|e| format!("endpoint_override is not a valid URL: {e}"))?;
        }

        Ok(())
    }
}
