//! Geographic coordinate value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// A WGS84 position in canonical (longitude, latitude) order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
}

/// Error type for invalid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCoordinates;

impl fmt::Display for InvalidCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid coordinates: longitude must be a finite value in -180 to 180, latitude in -90 to 90"
        )
    }
}

impl std::error::Error for InvalidCoordinates {}

impl Coordinate {
    /// Create a new coordinate with validation
    ///
    /// Arguments are taken in canonical order: longitude first.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if either value is not finite or
    /// out of range
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, InvalidCoordinates> {
        if !longitude.is_finite()
            || !latitude.is_finite()
            || !(-180.0..=180.0).contains(&longitude)
            || !(-90.0..=90.0).contains(&latitude)
        {
            return Err(InvalidCoordinates);
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Create a coordinate from a `[latitude, longitude]` pair
    ///
    /// Some providers report points latitude first.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` on out-of-range or non-finite values
    pub fn from_lat_lon(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        Self::new(longitude, latitude)
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// The coordinate as a `[lon, lat]` pair
    #[must_use]
    pub const fn to_lon_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.longitude, self.latitude)
    }
}
