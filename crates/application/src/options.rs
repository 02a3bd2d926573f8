//! Widget options
//!
//! Every field is optional when deserialized; missing fields take the
//! defaults below.

use std::fmt;
use std::sync::Arc;

use domain::{MarkerStyle, ProviderAdapter};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Largest accepted result limit
pub const MAX_LIMIT: u32 = 50;

/// Presentation mode of the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetType {
    /// Compact button that expands into an input
    #[default]
    GlassButton,
    /// Always visible text input
    TextInput,
}

/// Options supplied when constructing the widget
#[derive(Clone, Serialize, Deserialize)]
pub struct GeocoderOptions {
    /// Built-in provider name (default: osm)
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Input placeholder text
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    #[serde(default)]
    pub target_type: TargetType,

    /// Language tag sent to the provider (default: en-US)
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Maximum number of results (default: 5)
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Keep the result list open after a selection
    #[serde(default)]
    pub keep_open: bool,

    /// Only emit the selection event, never move the map or add a marker
    #[serde(default)]
    pub prevent_default: bool,

    /// Query while typing
    #[serde(default)]
    pub auto_complete: bool,

    /// Minimum trimmed length before auto-complete queries (default: 2)
    #[serde(default = "default_auto_complete_min_length")]
    pub auto_complete_min_length: usize,

    /// Debounce delay for auto-complete in milliseconds (default: 200)
    #[serde(default = "default_auto_complete_timeout_ms")]
    pub auto_complete_timeout_ms: u64,

    /// Log raw provider payloads
    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub marker_style: MarkerStyle,

    /// Provider API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Comma separated ISO 3166-1 alpha-2 country filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_codes: Option<String>,
}

fn default_provider() -> String {
    "osm".to_string()
}

fn default_placeholder() -> String {
    "Search for an address".to_string()
}

fn default_lang() -> String {
    "en-US".to_string()
}

const fn default_limit() -> u32 {
    5
}

const fn default_auto_complete_min_length() -> usize {
    2
}

const fn default_auto_complete_timeout_ms() -> u64 {
    200
}

impl Default for GeocoderOptions {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            placeholder: default_placeholder(),
            target_type: TargetType::default(),
            lang: default_lang(),
            limit: default_limit(),
            keep_open: false,
            prevent_default: false,
            auto_complete: false,
            auto_complete_min_length: default_auto_complete_min_length(),
            auto_complete_timeout_ms: default_auto_complete_timeout_ms(),
            debug: false,
            marker_style: MarkerStyle::default(),
            api_key: None,
            country_codes: None,
        }
    }
}

impl fmt::Debug for GeocoderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeocoderOptions")
            .field("provider", &self.provider)
            .field("placeholder", &self.placeholder)
            .field("target_type", &self.target_type)
            .field("lang", &self.lang)
            .field("limit", &self.limit)
            .field("keep_open", &self.keep_open)
            .field("prevent_default", &self.prevent_default)
            .field("auto_complete", &self.auto_complete)
            .field("auto_complete_min_length", &self.auto_complete_min_length)
            .field("auto_complete_timeout_ms", &self.auto_complete_timeout_ms)
            .field("debug", &self.debug)
            .field("marker_style", &self.marker_style)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("country_codes", &self.country_codes)
            .finish()
    }
}

impl GeocoderOptions {
    /// Validate the options
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.provider.trim().is_empty() {
            return Err("provider must not be empty".to_string());
        }

        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(format!("limit must be between 1 and {MAX_LIMIT}"));
        }

        if !self.marker_style.scale.is_finite() || self.marker_style.scale <= 0.0 {
            return Err("marker_style.scale must be a positive number".to_string());
        }

        Ok(())
    }

    /// Auto-complete debounce delay
    #[must_use]
    pub const fn debounce_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.auto_complete_timeout_ms)
    }
}

/// Which provider the widget talks to
#[derive(Clone)]
pub enum ProviderSelector {
    /// A built-in provider, by name
    Named(String),
    /// An application-supplied adapter
    Custom(Arc<dyn ProviderAdapter>),
}

impl fmt::Debug for ProviderSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Custom(adapter) => f.debug_tuple("Custom").field(&adapter.name()).finish(),
        }
    }
}

impl From<&str> for ProviderSelector {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for ProviderSelector {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<Arc<dyn ProviderAdapter>> for ProviderSelector {
    fn from(adapter: Arc<dyn ProviderAdapter>) -> Self {
        Self::Custom(adapter)
    }
}
