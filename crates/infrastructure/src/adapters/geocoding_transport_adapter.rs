//! Transport adapter - Implements TransportPort using integration_geocoding

use application::error::ApplicationError;
use application::ports::TransportPort;
use async_trait::async_trait;
use domain::RequestSpec;
use integration_geocoding::{GeocodingConfig, GeocodingError, HttpTransport, Transport};
use serde_json::Value;
use tracing::debug;

/// Adapter carrying provider requests over HTTP
#[derive(Debug, Clone)]
pub struct GeocodingTransportAdapter {
    transport: HttpTransport,
}

impl GeocodingTransportAdapter {
    /// Create a new adapter with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn new(config: &GeocodingConfig) -> Result<Self, ApplicationError> {
        let transport = HttpTransport::new(config).map_err(Self::map_error)?;
        Ok(Self { transport })
    }

    /// Create with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_defaults() -> Result<Self, ApplicationError> {
        Self::new(&GeocodingConfig::default())
    }

    /// Callback-wrapped requests still awaiting their response
    #[must_use]
    pub fn pending_callbacks(&self) -> usize {
        self.transport.pending_callbacks()
    }

    /// Map integration geocoding error to application error
    fn map_error(err: GeocodingError) -> ApplicationError {
        match err {
            GeocodingError::ConfigurationError(e) => ApplicationError::Configuration(e),
            other => {
                debug!(retryable = other.is_retryable(), error = %other, "Provider request failed");
                ApplicationError::Transport(other.to_string())
            },
        }
    }
}

#[async_trait]
impl TransportPort for GeocodingTransportAdapter {
    async fn execute(&self, request: &RequestSpec) -> Result<Value, ApplicationError> {
        self.transport.execute(request).await.map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_creation() {
        assert!(GeocodingTransportAdapter::with_defaults().is_ok());
    }

    #[test]
    fn invalid_config_is_a_configuration_error() {
        let config = GeocodingConfig {
            endpoint_override: Some("::not a url::".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            GeocodingTransportAdapter::new(&config),
            Err(ApplicationError::Configuration(_))
        ));
    }

    #[test]
    fn transport_failures_map_to_transport_errors() {
        let mapped = GeocodingTransportAdapter::map_error(GeocodingError::Timeout {
            timeout_secs: 10,
        });
        assert!(matches!(mapped, ApplicationError::Transport(ref m) if m.contains("10 seconds")));
        assert!(mapped.is_retryable());

        let mapped = GeocodingTransportAdapter::map_error(GeocodingError::CallbackNotInvoked(
            "geocoder_cb_1".to_string(),
        ));
        assert!(matches!(mapped, ApplicationError::Transport(_)));
    }

    #[test]
    fn adapter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GeocodingTransportAdapter>();
    }
}
