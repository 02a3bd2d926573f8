//! Provider resolver - Implements ProviderResolverPort over the built-in
//! adapters of integration_geocoding

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::ProviderResolverPort;
use domain::ProviderAdapter;
use integration_geocoding::{GeocodingConfig, Provider};
use tracing::debug;

/// Resolves built-in provider names, optionally against a replacement
/// endpoint
#[derive(Debug, Clone, Default)]
pub struct BuiltinProviderResolver {
    endpoint_override: Option<String>,
}

impl BuiltinProviderResolver {
    #[must_use]
    pub fn new(config: &GeocodingConfig) -> Self {
        Self {
            endpoint_override: config.endpoint_override.clone(),
        }
    }

    /// Resolve every provider against `endpoint`
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint_override: Some(endpoint.into()),
        }
    }
}

impl ProviderResolverPort for BuiltinProviderResolver {
    fn resolve(&self, name: &str) -> Result<Arc<dyn ProviderAdapter>, ApplicationError> {
        let provider = Provider::from_name(name)?;
        let provider = match &self.endpoint_override {
            Some(endpoint) => provider.with_endpoint(endpoint.clone()),
            None => provider,
        };
        debug!(
            provider = %provider.name(),
            overridden = self.endpoint_override.is_some(),
            "Provider resolved"
        );
        Ok(Arc::new(provider))
    }
}

#[cfg(test)]
mod tests {
    use domain::{DomainError, GeocodeQuery};

    use super::*;

    #[test]
    fn resolves_builtin_names() {
        let resolver = BuiltinProviderResolver::default();
        for name in ["osm", "mapquest", "photon", "bing", "opencage"] {
            assert_eq!(resolver.resolve(name).unwrap().name(), name);
        }
    }

    #[test]
    fn unknown_name_is_a_domain_error() {
        let result = BuiltinProviderResolver::default().resolve("here");
        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::UnknownProvider(_)))
        ));
    }

    #[test]
    fn endpoint_override_applies() {
        let resolver = BuiltinProviderResolver::with_endpoint("http://localhost:8080/search");
        let provider = resolver.resolve("osm").unwrap();
        let request = provider.build_request(&GeocodeQuery::new("Berlin")).unwrap();
        assert_eq!(request.endpoint, "http://localhost:8080/search");
    }

    #[test]
    fn default_endpoint_without_override() {
        let resolver = BuiltinProviderResolver::new(&GeocodingConfig::default());
        let provider = resolver.resolve("photon").unwrap();
        let request = provider.build_request(&GeocodeQuery::new("Berlin")).unwrap();
        assert_eq!(request.endpoint, "https://photon.komoot.io/api/");
    }
}
