//! HTTP transport for provider requests

mod callback;

use std::time::Duration;

use async_trait::async_trait;
use domain::{RequestSpec, TransportKind};
use reqwest::{Client, header};
use serde_json::Value;
use tracing::{debug, instrument};

pub use callback::{CallbackRegistry, CallbackSlot};

use crate::{GeocodingConfig, GeocodingError};

/// Carries a [`RequestSpec`] to the provider and returns the raw payload
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute the request and return the decoded JSON body
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, non-success status or an
    /// undecodable body.
    async fn execute(&self, spec: &RequestSpec) -> Result<Value, GeocodingError>;
}

/// reqwest-backed transport supporting direct and callback-wrapped responses
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    callbacks: CallbackRegistry,
    timeout_secs: u64,
}

impl HttpTransport {
    /// Create a new transport with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeocodingError> {
        config
            .validate()
            .map_err(GeocodingError::ConfigurationError)?;

        let mut builder = Client::builder().user_agent(&config.user_agent);
        if config.timeout_enabled() {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            callbacks: CallbackRegistry::new(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Create a new transport with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, GeocodingError> {
        Self::new(&GeocodingConfig::default())
    }

    /// Number of callback requests still waiting for their response
    #[must_use]
    pub fn pending_callbacks(&self) -> usize {
        self.callbacks.pending()
    }

    fn map_error(&self, e: &reqwest::Error) -> GeocodingError {
        if e.is_timeout() {
            GeocodingError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else if e.is_connect() {
            GeocodingError::ConnectionFailed(e.to_string())
        } else {
            GeocodingError::RequestFailed(e.to_string())
        }
    }

    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        accept: &str,
    ) -> Result<reqwest::Response, GeocodingError> {
        let response = self
            .client
            .get(endpoint)
            .query(params)
            .header(header::ACCEPT, accept)
            .send()
            .await
            .map_err(|e| self.map_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
        }
        Ok(response)
    }

    async fn execute_direct(&self, spec: &RequestSpec) -> Result<Value, GeocodingError> {
        let params: Vec<(&str, &str)> = spec
            .params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        let response = self
            .fetch(&spec.endpoint, &params, "application/json")
            .await?;
        response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))
    }

    async fn execute_callback(
        &self,
        spec: &RequestSpec,
        param: &str,
    ) -> Result<Value, GeocodingError> {
        let (slot, settled) = self.callbacks.register();
        let name = slot.name().to_string();

        // The load runs detached so the slot is released even when the
        // caller stops waiting.
        let transport = self.clone();
        let endpoint = spec.endpoint.clone();
        let mut params: Vec<(String, String)> = spec
            .params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        params.push((param.to_string(), name.clone()));

        tokio::spawn(async move {
            let params: Vec<(&str, &str)> = params
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            let script = match transport.fetch(&endpoint, &params, "application/javascript").await
            {
                Ok(response) => response
                    .text()
                    .await
                    .map_err(|e| GeocodingError::ParseError(e.to_string())),
                Err(e) => Err(e),
            };

            match script {
                Ok(body) => slot.settle_script(&body),
                Err(e) => slot.fail(e),
            }
        });

        let outcome = if self.timeout_secs > 0 {
            tokio::time::timeout(Duration::from_secs(self.timeout_secs), settled)
                .await
                .map_err(|_| GeocodingError::Timeout {
                    timeout_secs: self.timeout_secs,
                })?
        } else {
            settled.await
        };

        outcome.map_err(|_| GeocodingError::CallbackNotInvoked(name))?
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, spec), fields(endpoint = %spec.endpoint))]
    async fn execute(&self, spec: &RequestSpec) -> Result<Value, GeocodingError> {
        let payload = match &spec.transport {
            TransportKind::Direct => self.execute_direct(spec).await?,
            TransportKind::Callback { param } => self.execute_callback(spec, param).await?,
        };
        debug!("Provider request settled");
        Ok(payload)
    }
}
