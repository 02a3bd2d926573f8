//! Domain entities - Objects with identity and lifecycle

mod address_candidate;
mod feature;

pub use address_candidate::{Address, AddressCandidate, OriginalPlace};
pub use feature::{LayerId, MarkerStyle, PointFeature};
