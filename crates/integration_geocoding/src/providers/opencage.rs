//! OpenCage geocoder adapter

use domain::{
    Address, AddressCandidate, BoundingBox, Coordinate, DomainError, GeocodeQuery, OriginalPlace,
    ProviderAdapter, RequestSpec,
};
use serde_json::Value;

use super::{DEFAULT_LIMIT, first_text, lenient_f64, result_records, skip_record, text, text_or_empty};

const NAME: &str = "opencage";
const ENDPOINT: &str = "https://api.opencagedata.com/geocode/v1/json";

mod api {
    use serde::Deserialize;
    use serde_json::{Map, Value};

    #[derive(Debug, Deserialize)]
    pub struct Place {
        pub geometry: Option<LatLng>,
        pub bounds: Option<Bounds>,
        #[serde(default)]
        pub formatted: String,
        #[serde(default)]
        pub components: Map<String, Value>,
    }

    #[derive(Debug, Deserialize)]
    pub struct LatLng {
        pub lat: Option<Value>,
        pub lng: Option<Value>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Bounds {
        pub northeast: LatLng,
        pub southwest: LatLng,
    }
}

/// Adapter for the OpenCage geocoding API
#[derive(Debug, Clone)]
pub struct OpenCageAdapter {
    endpoint: String,
}

impl Default for OpenCageAdapter {
    fn default() -> Self {
        Self {
            endpoint: ENDPOINT.to_string(),
        }
    }
}

impl OpenCageAdapter {
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

fn lat_lng(point: &api::LatLng) -> Option<(f64, f64)> {
    Some((lenient_f64(point.lat.as_ref())?, lenient_f64(point.lng.as_ref())?))
}

fn bounding_box(bounds: &api::Bounds) -> Option<BoundingBox> {
    let (north, east) = lat_lng(&bounds.northeast)?;
    let (south, west) = lat_lng(&bounds.southwest)?;
    BoundingBox::new(south, west, north, east).ok()
}

impl ProviderAdapter for OpenCageAdapter {
    fn name(&self) -> &str {
        NAME
    }

    fn requires_api_key(&self) -> bool {
        true
    }

    fn build_request(&self, query: &GeocodeQuery) -> Result<RequestSpec, DomainError> {
        let key = query
            .api_key()
            .ok_or_else(|| DomainError::missing_api_key(NAME))?;
        Ok(RequestSpec::direct(&self.endpoint)
            .param("q", &query.text)
            .param("key", key)
            .param("limit", query.limit.unwrap_or(DEFAULT_LIMIT))
            .param_opt("countrycode", query.country_codes())
            .param_opt(
                "language",
                query.language.as_deref().filter(|l| !l.trim().is_empty()),
            )
            .param("no_annotations", 1))
    }

    fn normalize(&self, raw: &Value) -> Result<Vec<AddressCandidate>, DomainError> {
        let records = result_records(NAME, raw, Some("results"))?;
        let mut candidates = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let Ok(result) = serde_json::from_value::<api::Place>(record.clone()) else {
                skip_record(NAME, index, "not a result");
                continue;
            };

            let coordinate = result
                .geometry
                .as_ref()
                .and_then(lat_lng)
                .and_then(|(lat, lng)| Coordinate::from_lat_lon(lat, lng).ok());
            let Some(coordinate) = coordinate else {
                skip_record(NAME, index, "missing or invalid geometry");
                continue;
            };

            let fields = &result.components;
            let address = Address {
                name: text_or_empty(fields, "house_number"),
                road: text_or_empty(fields, "road"),
                postcode: text(fields, "postcode"),
                city: first_text(fields, &["city", "town"]),
                state: text(fields, "state"),
                country: text(fields, "country"),
                ..Default::default()
            };
            let original = OriginalPlace {
                formatted: result.formatted.clone(),
                details: Value::Object(fields.clone()),
            };

            candidates.push(
                AddressCandidate::new(coordinate, address, original)
                    .with_bounding_box(result.bounds.as_ref().and_then(bounding_box)),
            );
        }

        Ok(candidates)
    }
}
