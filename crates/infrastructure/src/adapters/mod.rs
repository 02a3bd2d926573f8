//! Adapters implementing the application ports

mod geocoding_transport_adapter;
mod provider_resolver_adapter;

pub use geocoding_transport_adapter::GeocodingTransportAdapter;
pub use provider_resolver_adapter::BuiltinProviderResolver;
