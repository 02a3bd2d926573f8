//! Provider resolution port

use std::sync::Arc;

use domain::ProviderAdapter;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for turning a provider name into an adapter
#[cfg_attr(test, automock)]
pub trait ProviderResolverPort: Send + Sync {
    /// Resolve a built-in provider by name
    ///
    /// # Errors
    ///
    /// Returns an error if no provider with that name exists.
    fn resolve(&self, name: &str) -> Result<Arc<dyn ProviderAdapter>, ApplicationError>;
}
