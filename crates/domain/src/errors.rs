//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Coordinates are out of range or not finite
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Provider requires an API key but none was configured
    #[error("Provider '{provider}' requires an API key")]
    MissingApiKey { provider: String },

    /// Provider name does not match any built-in provider
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Provider payload does not have the expected envelope
    #[error("Malformed {provider} response: {reason}")]
    MalformedResponse { provider: String, reason: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a missing API key error
    pub fn missing_api_key(provider: impl Into<String>) -> Self {
        Self::MissingApiKey {
            provider: provider.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this error stems from widget configuration
    #[must_use]
    pub const fn is_misconfiguration(&self) -> bool {
        matches!(self, Self::MissingApiKey { .. } | Self::UnknownProvider(_))
    }
}
