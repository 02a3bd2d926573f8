//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod map_view_port;
mod provider_resolver_port;
mod transport_port;

pub use map_view_port::{ClickHandler, ListenerHandle, MapViewPort};
#[cfg(test)]
pub use provider_resolver_port::MockProviderResolverPort;
pub use provider_resolver_port::ProviderResolverPort;
#[cfg(test)]
pub use transport_port::MockTransportPort;
pub use transport_port::TransportPort;
