//! Value Objects - Immutable, identity-less domain primitives

mod bounding_box;
mod coordinate;
mod projection;

pub use bounding_box::BoundingBox;
pub use coordinate::{Coordinate, InvalidCoordinates};
pub use projection::{Extent, MapCoordinate, Projection};
