//! Geographic bounding box value object

use serde::{Deserialize, Serialize};

use super::coordinate::InvalidCoordinates;

/// A WGS84 bounding box with named edges
///
/// Providers disagree on edge order, so the box is only ever built through
/// named fields and never from a bare array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Southern edge (minimum latitude)
    pub south: f64,
    /// Western edge (minimum longitude)
    pub west: f64,
    /// Northern edge (maximum latitude)
    pub north: f64,
    /// Eastern edge (maximum longitude)
    pub east: f64,
}

impl BoundingBox {
    /// Create a bounding box, rejecting non-finite or inverted latitudes
    ///
    /// `west > east` is accepted, it describes a box crossing the antimeridian.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if any edge is not finite, out of range,
    /// or `south > north`
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Result<Self, InvalidCoordinates> {
        let finite = [south, west, north, east].iter().all(|v| v.is_finite());
        let lat_ok = (-90.0..=90.0).contains(&south) && (-90.0..=90.0).contains(&north);
        let lon_ok = (-180.0..=180.0).contains(&west) && (-180.0..=180.0).contains(&east);
        if !finite || !lat_ok || !lon_ok || south > north {
            return Err(InvalidCoordinates);
        }
        Ok(Self {
            south,
            west,
            north,
            east,
        })
    }

    /// The box as `[south, west, north, east]`
    #[must_use]
    pub const fn to_swne(&self) -> [f64; 4] {
        [self.south, self.west, self.north, self.east]
    }
}
