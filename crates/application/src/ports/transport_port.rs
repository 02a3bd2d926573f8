//! Provider transport port
//!
//! Carries a provider request and hands back the raw payload. Whether the
//! request went out directly or through a callback-wrapped response is not
//! visible here.

use async_trait::async_trait;
use domain::RequestSpec;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for executing provider requests
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransportPort: Send + Sync {
    /// Execute `request` and return the decoded payload
    async fn execute(&self, request: &RequestSpec) -> Result<serde_json::Value, ApplicationError>;
}
