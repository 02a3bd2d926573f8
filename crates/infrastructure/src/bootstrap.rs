//! Wiring of the query controller from configuration

use std::sync::Arc;

use application::{ApplicationError, MapViewPort, QueryController};
use tracing::info;

use crate::adapters::{BuiltinProviderResolver, GeocodingTransportAdapter};
use crate::config::AppConfig;

/// Build a controller for `map` from the loaded configuration
///
/// # Errors
///
/// Returns an error if the configuration is invalid or names an unknown
/// provider.
pub fn build_controller(
    config: &AppConfig,
    map: Arc<dyn MapViewPort>,
) -> Result<QueryController, ApplicationError> {
    config.validate().map_err(ApplicationError::Configuration)?;

    let http = config.http.to_geocoding_config();
    let transport = Arc::new(GeocodingTransportAdapter::new(&http)?);
    let resolver = Arc::new(BuiltinProviderResolver::new(&http));

    let controller = QueryController::new(config.geocoder.clone(), map, transport, resolver)?;
    info!(
        provider = %controller.provider_name(),
        target_type = ?config.geocoder.target_type,
        "Geocoder ready"
    );
    Ok(controller)
}
