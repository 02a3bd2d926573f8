//! Domain layer for the geocoder
//!
//! Contains the normalized address model, geographic value objects, the
//! provider adapter contract and domain errors. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod geocoding;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use geocoding::{GeocodeQuery, ProviderAdapter, RequestSpec, TransportKind};
pub use value_objects::*;
