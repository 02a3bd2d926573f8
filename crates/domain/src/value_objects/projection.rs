//! Map projections used by the host map view
//!
//! Only the two projections a web map view realistically runs in are
//! supported: geographic WGS84 and spherical Web Mercator.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

use super::{BoundingBox, Coordinate};

/// Earth radius used by spherical Web Mercator, in meters
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Latitude beyond which Web Mercator is clamped
const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_779_806_59;

/// Projection of the host map view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Projection {
    /// Geographic coordinates (EPSG:4326)
    #[serde(rename = "EPSG:4326")]
    Wgs84,
    /// Spherical Web Mercator (EPSG:3857)
    #[default]
    #[serde(rename = "EPSG:3857")]
    WebMercator,
}

/// A position in map projection units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapCoordinate {
    pub x: f64,
    pub y: f64,
}

/// A rectangle in map projection units, `[min_x, min_y, max_x, max_y]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    /// Center point of the extent
    #[must_use]
    pub fn center(&self) -> MapCoordinate {
        MapCoordinate {
            x: f64::midpoint(self.min_x, self.max_x),
            y: f64::midpoint(self.min_y, self.max_y),
        }
    }
}

impl Projection {
    /// EPSG code string for this projection
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Wgs84 => "EPSG:4326",
            Self::WebMercator => "EPSG:3857",
        }
    }

    /// Project a WGS84 coordinate into map units
    #[must_use]
    pub fn project(&self, coordinate: Coordinate) -> MapCoordinate {
        self.project_lon_lat(coordinate.longitude(), coordinate.latitude())
    }

    /// Project a WGS84 bounding box into a map extent
    ///
    /// A box crossing the antimeridian (`west > east`) is unwrapped eastwards,
    /// so its extent reaches past 180 degrees instead of spanning the globe.
    #[must_use]
    pub fn project_extent(&self, bbox: BoundingBox) -> Extent {
        let east = if bbox.west > bbox.east {
            bbox.east + 360.0
        } else {
            bbox.east
        };
        let sw = self.project_lon_lat(bbox.west, bbox.south);
        let ne = self.project_lon_lat(east, bbox.north);

        Extent {
            min_x: sw.x.min(ne.x),
            min_y: sw.y.min(ne.y),
            max_x: sw.x.max(ne.x),
            max_y: sw.y.max(ne.y),
        }
    }

    fn project_lon_lat(&self, lon: f64, lat: f64) -> MapCoordinate {
        match self {
            Self::Wgs84 => MapCoordinate { x: lon, y: lat },
            Self::WebMercator => {
                let lat = lat.clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE);
                MapCoordinate {
                    x: EARTH_RADIUS_M * lon.to_radians(),
                    y: EARTH_RADIUS_M * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln(),
                }
            },
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wgs84_is_identity() {
        let coord = Coordinate::new(13.405, 52.52).expect("valid");
        let projected = Projection::Wgs84.project(coord);
        assert!((projected.x - 13.405).abs() < f64::EPSILON);
        assert!((projected.y - 52.52).abs() < f64::EPSILON);
    }

    #[test]
    fn web_mercator_origin() {
        let coord = Coordinate::new(0.0, 0.0).expect("valid");
        let projected = Projection::WebMercator.project(coord);
        assert!(projected.x.abs() < 1e-6);
        assert!(projected.y.abs() < 1e-6);
    }

    #[test]
    fn web_mercator_known_point() {
        // Berlin, values as produced by ol/proj fromLonLat
        let coord = Coordinate::new(13.405, 52.52).expect("valid");
        let projected = Projection::WebMercator.project(coord);
        assert!((projected.x - 1_492_237.8).abs() < 1.0);
        assert!((projected.y - 6_894_699.8).abs() < 1.0);
    }

    #[test]
    fn web_mercator_clamps_poles() {
        let coord = Coordinate::new(0.0, 90.0).expect("valid");
        let projected = Projection::WebMercator.project(coord);
        assert!(projected.y.is_finite());
    }

    #[test]
    fn extent_is_ordered() {
        let bbox = BoundingBox::new(52.3, 13.0, 52.7, 13.8).expect("valid");
        let extent = Projection::WebMercator.project_extent(bbox);
        assert!(extent.min_x < extent.max_x);
        assert!(extent.min_y < extent.max_y);
    }

    #[test]
    fn antimeridian_extent_stays_narrow() {
        // Fiji
        let bbox = BoundingBox::new(-20.0, 177.0, -12.0, -178.0).expect("valid");

        let extent = Projection::Wgs84.project_extent(bbox);
        assert!((extent.min_x - 177.0).abs() < 1e-9);
        assert!((extent.max_x - 182.0).abs() < 1e-9);

        let extent = Projection::WebMercator.project_extent(bbox);
        let width_m = extent.max_x - extent.min_x;
        let five_degrees_m = EARTH_RADIUS_M * 5.0_f64.to_radians();
        assert!((width_m - five_degrees_m).abs() < 1.0);
    }

    #[test]
    fn projection_codes() {
        assert_eq!(Projection::Wgs84.to_string(), "EPSG:4326");
        assert_eq!(Projection::WebMercator.code(), "EPSG:3857");
        assert_eq!(
            serde_json::to_string(&Projection::WebMercator).expect("serialize"),
            "\"EPSG:3857\""
        );
    }
}
