//! Map features created for chosen addresses

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::MapCoordinate;

/// Default marker icon used when no custom style is configured
pub const DEFAULT_MARKER_SRC: &str =
    "//cdn.rawgit.com/jonataswalker/map-utils/master/images/marker.png";

/// Icon style applied to chosen-address markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Icon image source
    #[serde(default = "default_marker_src")]
    pub icon_src: String,
    /// Icon scale factor
    #[serde(default = "default_marker_scale")]
    pub scale: f64,
}

fn default_marker_src() -> String {
    DEFAULT_MARKER_SRC.to_string()
}

const fn default_marker_scale() -> f64 {
    0.7
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            icon_src: default_marker_src(),
            scale: default_marker_scale(),
        }
    }
}

/// Identity of a map layer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(String);

impl LayerId {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A point marker placed on the overlay layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointFeature {
    pub id: String,
    /// Position in map projection units
    pub coordinate: MapCoordinate,
    pub style: MarkerStyle,
}
