//! Geocoding transport error types

use thiserror::Error;

/// Errors that can occur while carrying a geocoding request
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to the geocoding service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request to the geocoding service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to decode the response body
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Callback-wrapped response never invoked the registered callback
    #[error("Callback '{0}' was not invoked by the response")]
    CallbackNotInvoked(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl GeocodingError {
    /// Returns true if re-submitting the same query may succeed
    ///
    /// Informational only, nothing in the widget retries automatically.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::RequestFailed(_) | Self::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(GeocodingError::ConnectionFailed("test".to_string()).is_retryable());
        assert!(GeocodingError::RequestFailed("test".to_string()).is_retryable());
        assert!(GeocodingError::Timeout { timeout_secs: 10 }.is_retryable());
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!GeocodingError::ParseError("test".to_string()).is_retryable());
        assert!(!GeocodingError::ConfigurationError("test".to_string()).is_retryable());
        assert!(!GeocodingError::CallbackNotInvoked("cb".to_string()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = GeocodingError::CallbackNotInvoked("geocoder_cb_1".to_string());
        assert!(err.to_string().contains("geocoder_cb_1"));

        let err = GeocodingError::Timeout { timeout_secs: 10 };
        assert!(err.to_string().contains("10"));
    }
}
