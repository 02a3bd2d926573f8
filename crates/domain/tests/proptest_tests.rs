//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::value_objects::{BoundingBox, Coordinate, Projection};
use proptest::prelude::*;

// ============================================================================
// Coordinate Property Tests
// ============================================================================

mod coordinate_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_roundtrip_axes(
            lon in -180.0f64..=180.0f64,
            lat in -90.0f64..=90.0f64
        ) {
            let coord = Coordinate::new(lon, lat).unwrap();
            prop_assert!((coord.longitude() - lon).abs() < f64::EPSILON);
            prop_assert!((coord.latitude() - lat).abs() < f64::EPSILON);
            prop_assert_eq!(coord.to_lon_lat(), [lon, lat]);
        }

        #[test]
        fn lat_lon_constructor_matches_canonical(
            lon in -180.0f64..=180.0f64,
            lat in -90.0f64..=90.0f64
        ) {
            let canonical = Coordinate::new(lon, lat).unwrap();
            let swapped = Coordinate::from_lat_lon(lat, lon).unwrap();
            prop_assert_eq!(canonical, swapped);
        }

        #[test]
        fn invalid_latitude_rejected(
            lon in -180.0f64..=180.0f64,
            lat in prop_oneof![
                (-1000.0f64..-90.1f64),
                (90.1f64..1000.0f64)
            ]
        ) {
            prop_assert!(Coordinate::new(lon, lat).is_err());
        }
    }
}

// ============================================================================
// Projection Property Tests
// ============================================================================

mod projection_tests {
    use super::*;

    proptest! {
        #[test]
        fn mercator_output_is_finite(
            lon in -180.0f64..=180.0f64,
            lat in -90.0f64..=90.0f64
        ) {
            let coord = Coordinate::new(lon, lat).unwrap();
            let projected = Projection::WebMercator.project(coord);
            prop_assert!(projected.x.is_finite());
            prop_assert!(projected.y.is_finite());
        }

        #[test]
        fn mercator_preserves_ordering(
            lon_a in -180.0f64..=180.0f64,
            lon_b in -180.0f64..=180.0f64,
            lat in -85.0f64..=85.0f64
        ) {
            let a = Projection::WebMercator.project(Coordinate::new(lon_a, lat).unwrap());
            let b = Projection::WebMercator.project(Coordinate::new(lon_b, lat).unwrap());
            prop_assert_eq!(lon_a < lon_b, a.x < b.x);
        }

        #[test]
        fn projected_extent_contains_its_center(
            south in -80.0f64..0.0f64,
            north in 0.0f64..80.0f64,
            west in -180.0f64..0.0f64,
            east in 0.0f64..180.0f64
        ) {
            let bbox = BoundingBox::new(south, west, north, east).unwrap();
            for projection in [Projection::Wgs84, Projection::WebMercator] {
                let extent = projection.project_extent(bbox);
                let center = extent.center();
                prop_assert!(extent.min_x <= center.x && center.x <= extent.max_x);
                prop_assert!(extent.min_y <= center.y && center.y <= extent.max_y);
            }
        }

        #[test]
        fn antimeridian_extent_is_as_wide_as_the_box(
            south in -80.0f64..0.0f64,
            north in 0.0f64..80.0f64,
            west in 1.0f64..180.0f64,
            east in -180.0f64..-1.0f64
        ) {
            let bbox = BoundingBox::new(south, west, north, east).unwrap();
            let extent = Projection::Wgs84.project_extent(bbox);
            let width = 360.0 - (west - east);
            prop_assert!(((extent.max_x - extent.min_x) - width).abs() < 1e-9);
            prop_assert!((extent.min_x - west).abs() < 1e-9);
        }
    }
}
