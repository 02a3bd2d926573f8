//! Application layer - Use cases and orchestration
//!
//! Contains the query controller that drives the geocoder widget, the
//! address display template and the port definitions the controller talks
//! through. Adapters in the infrastructure layer implement the ports.

pub mod error;
pub mod options;
pub mod overlay;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use options::{GeocoderOptions, ProviderSelector, TargetType};
pub use overlay::{FeatureSource, OverlayLayer};
pub use ports::*;
pub use services::*;
