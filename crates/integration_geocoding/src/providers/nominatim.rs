//! OpenStreetMap Nominatim adapter

use domain::{
    Address, AddressCandidate, BoundingBox, Coordinate, DomainError, GeocodeQuery, OriginalPlace,
    ProviderAdapter, RequestSpec,
};
use serde_json::{Map, Value};

use super::{DEFAULT_LIMIT, first_text, lenient_f64, result_records, skip_record, text, text_or_empty};

const NAME: &str = "osm";
const ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";
const DEFAULT_LANGUAGE: &str = "en-US";

pub(crate) mod api {
    use serde::Deserialize;
    use serde_json::{Map, Value};

    /// One record of the Nominatim `format=json` answer
    ///
    /// Shared by every Nominatim deployment, MapQuest included.
    #[derive(Debug, Deserialize)]
    pub struct Place {
        pub lat: Option<Value>,
        pub lon: Option<Value>,
        pub display_name: Option<String>,
        /// `[south, north, west, east]` as strings
        #[serde(default)]
        pub boundingbox: Option<Vec<Value>>,
        #[serde(default)]
        pub address: Map<String, Value>,
    }
}

/// Adapter for the public Nominatim search API
#[derive(Debug, Clone)]
pub struct NominatimAdapter {
    endpoint: String,
}

impl Default for NominatimAdapter {
    fn default() -> Self {
        Self {
            endpoint: ENDPOINT.to_string(),
        }
    }
}

impl NominatimAdapter {
    /// Use a self-hosted Nominatim instance
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Build a Nominatim-style search request against `endpoint`
pub(crate) fn search_request(endpoint: &str, query: &GeocodeQuery) -> RequestSpec {
    RequestSpec::direct(endpoint)
        .param("q", &query.text)
        .param("format", "json")
        .param("addressdetails", 1)
        .param("limit", query.limit.unwrap_or(DEFAULT_LIMIT))
        .param_opt("countrycodes", query.country_codes())
        .param(
            "accept-language",
            query
                .language
                .as_deref()
                .filter(|l| !l.trim().is_empty())
                .unwrap_or(DEFAULT_LANGUAGE),
        )
}

/// Normalize a Nominatim-style array of places
///
/// `address_of` maps the raw place onto the unified address fields.
pub(crate) fn normalize_places(
    provider: &str,
    raw: &Value,
    address_of: fn(&api::Place) -> Address,
) -> Result<Vec<AddressCandidate>, DomainError> {
    let records = result_records(provider, raw, None)?;
    let mut candidates = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let Ok(place) = serde_json::from_value::<api::Place>(record.clone()) else {
            skip_record(provider, index, "not an object");
            continue;
        };

        let coordinate = match (lenient_f64(place.lon.as_ref()), lenient_f64(place.lat.as_ref())) {
            (Some(lon), Some(lat)) => Coordinate::new(lon, lat).ok(),
            _ => None,
        };
        let Some(coordinate) = coordinate else {
            skip_record(provider, index, "missing or invalid lat/lon");
            continue;
        };

        let candidate = AddressCandidate::new(
            coordinate,
            address_of(&place),
            OriginalPlace {
                formatted: place.display_name.clone().unwrap_or_default(),
                details: Value::Object(place.address.clone()),
            },
        )
        .with_bounding_box(place.boundingbox.as_deref().and_then(bounding_box));

        candidates.push(candidate);
    }

    Ok(candidates)
}

fn bounding_box(values: &[Value]) -> Option<BoundingBox> {
    let [south, north, west, east] = values else {
        return None;
    };
    BoundingBox::new(
        lenient_f64(Some(south))?,
        lenient_f64(Some(west))?,
        lenient_f64(Some(north))?,
        lenient_f64(Some(east))?,
    )
    .ok()
}

fn osm_address(place: &api::Place) -> Address {
    let fields: &Map<String, Value> = &place.address;
    Address {
        name: place.display_name.clone(),
        road: text_or_empty(fields, "road"),
        house_number: text_or_empty(fields, "house_number"),
        postcode: text(fields, "postcode"),
        city: first_text(fields, &["city", "town", "village"]),
        state: text(fields, "state"),
        country: text(fields, "country"),
    }
}

impl ProviderAdapter for NominatimAdapter {
    fn name(&self) -> &str {
        NAME
    }

    fn build_request(&self, query: &GeocodeQuery) -> Result<RequestSpec, DomainError> {
        Ok(search_request(&self.endpoint, query))
    }

    fn normalize(&self, raw: &Value) -> Result<Vec<AddressCandidate>, DomainError> {
        normalize_places(NAME, raw, osm_address)
    }
}
