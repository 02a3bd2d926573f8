//! Normalized geocoding result

use serde::{Deserialize, Serialize};

use crate::value_objects::{BoundingBox, Coordinate};

/// Structured address fields of a candidate
///
/// Every field is optional. A field absent from the provider payload stays
/// `None`; adapters never synthesize values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub road: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Address {
    /// Check whether all fields are absent or blank
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [
            &self.name,
            &self.road,
            &self.house_number,
            &self.postcode,
            &self.city,
            &self.state,
            &self.country,
        ]
        .iter()
        .all(|field| field.as_deref().is_none_or(|v| v.trim().is_empty()))
    }
}

/// The provider's own rendition of a result, preserved verbatim
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OriginalPlace {
    /// Provider display string
    pub formatted: String,
    /// Raw structured payload
    pub details: serde_json::Value,
}

/// One normalized geocoding result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressCandidate {
    /// Position in canonical (lon, lat) order
    pub coordinate: Coordinate,
    /// Present only when the provider supplied one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    pub address: Address,
    pub original: OriginalPlace,
}

impl AddressCandidate {
    /// Create a candidate without bounding box
    #[must_use]
    pub const fn new(coordinate: Coordinate, address: Address, original: OriginalPlace) -> Self {
        Self {
            coordinate,
            bounding_box: None,
            address,
            original,
        }
    }

    /// Attach a bounding box
    #[must_use]
    pub const fn with_bounding_box(mut self, bbox: Option<BoundingBox>) -> Self {
        self.bounding_box = bbox;
        self
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.coordinate.longitude()
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.coordinate.latitude()
    }
}
