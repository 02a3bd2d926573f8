#![forbid(unsafe_code)]
//! Geocoding provider integration
//!
//! Provides adapters for five public geocoding services and the transport
//! that carries their requests.
//!
//! # Architecture
//!
//! Every service is described by a pure [`ProviderAdapter`] implementation
//! that builds a [`RequestSpec`] and normalizes the raw JSON answer into
//! [`AddressCandidate`]s. [`Provider`] is the tagged union over the built-in
//! adapters plus any custom adapter. [`HttpTransport`] executes request
//! specs, either directly or through a callback-wrapped (JSONP) response.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::{GeocodeQuery, ProviderAdapter};
//! use integration_geocoding::{GeocodingConfig, HttpTransport, Provider, Transport};
//!
//! let provider = Provider::from_name("photon")?;
//! let transport = HttpTransport::new(&GeocodingConfig::default())?;
//!
//! let spec = provider.build_request(&GeocodeQuery::new("Berlin").with_limit(3))?;
//! let raw = transport.execute(&spec).await?;
//! for candidate in provider.normalize(&raw)? {
//!     println!("{} ({})", candidate.original.formatted, candidate.coordinate);
//! }
//! ```
//!
//! [`ProviderAdapter`]: domain::ProviderAdapter
//! [`RequestSpec`]: domain::RequestSpec
//! [`AddressCandidate`]: domain::AddressCandidate

mod config;
mod error;
mod providers;
mod transport;

pub use config::GeocodingConfig;
pub use error::GeocodingError;
pub use providers::{
    BingAdapter, MapQuestAdapter, NominatimAdapter, OpenCageAdapter, PhotonAdapter, Provider,
    ProviderKind,
};
pub use transport::{CallbackRegistry, CallbackSlot, HttpTransport, Transport};
