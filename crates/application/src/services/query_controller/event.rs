//! The `addresschosen` event

use chrono::{DateTime, Utc};
use domain::{Address, AddressCandidate, Extent, MapCoordinate, OriginalPlace, PointFeature};
use serde::Serialize;

/// Address payload of a selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChosenAddress {
    /// Escaped HTML display text
    pub formatted: String,
    /// Normalized address fields
    pub details: Address,
    /// Provider's own rendition
    pub original: OriginalPlace,
}

/// Emitted once per candidate selection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressChosen {
    pub address: ChosenAddress,
    /// Candidate position in map projection units
    pub coordinate: MapCoordinate,
    /// Candidate bounding box in map projection units
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<Extent>,
    /// Marker added to the overlay layer; absent with `prevent_default`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature: Option<PointFeature>,
    /// The selected candidate as normalized
    pub place: AddressCandidate,
    pub chosen_at: DateTime<Utc>,
}
