//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Provider request could not be carried out
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Selected index is outside the rendered candidate list
    #[error("No candidate at index {index} ({available} available)")]
    InvalidSelection { index: usize, available: usize },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if re-submitting the same query may succeed
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this error stems from widget configuration
    pub const fn is_misconfiguration(&self) -> bool {
        match self {
            Self::Configuration(_) => true,
            Self::Domain(e) => e.is_misconfiguration(),
            _ => false,
        }
    }
}
