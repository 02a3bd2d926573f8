//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports on top of `integration_geocoding`,
//! loads the layered application configuration and installs logging.

pub mod adapters;
pub mod bootstrap;
pub mod config;
pub mod telemetry;

pub use adapters::{BuiltinProviderResolver, GeocodingTransportAdapter};
pub use bootstrap::build_controller;
pub use config::{AppConfig, HttpAppConfig, LogFormat, LoggingConfig};
pub use telemetry::{TelemetryError, init_logging};
