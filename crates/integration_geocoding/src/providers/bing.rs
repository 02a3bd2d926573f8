//! Bing Maps Locations adapter
//!
//! Bing only answers cross-origin requests through a callback-wrapped
//! response, so requests are marked for the callback transport.

use domain::{
    Address, AddressCandidate, BoundingBox, Coordinate, DomainError, GeocodeQuery, OriginalPlace,
    ProviderAdapter, RequestSpec,
};
use serde_json::Value;

use super::{DEFAULT_LIMIT, lenient_f64, result_records, skip_record, text};

const NAME: &str = "bing";
const ENDPOINT: &str = "https://dev.virtualearth.net/REST/v1/Locations";
const CALLBACK_PARAM: &str = "jsonp";

mod api {
    use serde::Deserialize;
    use serde_json::{Map, Value};

    #[derive(Debug, Deserialize)]
    pub struct Resource {
        pub name: Option<String>,
        pub point: Option<Point>,
        /// `[south, west, north, east]`
        #[serde(default)]
        pub bbox: Vec<Value>,
        #[serde(default)]
        pub address: Map<String, Value>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Point {
        /// `[lat, lon]`, reversed relative to GeoJSON
        #[serde(default)]
        pub coordinates: Vec<Value>,
    }
}

/// Adapter for the Bing Maps REST Locations API
#[derive(Debug, Clone)]
pub struct BingAdapter {
    endpoint: String,
}

impl Default for BingAdapter {
    fn default() -> Self {
        Self {
            endpoint: ENDPOINT.to_string(),
        }
    }
}

impl BingAdapter {
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

fn bounding_box(values: &[Value]) -> Option<BoundingBox> {
    let [south, west, north, east] = values else {
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

impl ProviderAdapter for BingAdapter {
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
        Ok(RequestSpec::callback(&self.endpoint, CALLBACK_PARAM)
            .param("query", &query.text)
            .param("key", key)
            .param("includeNeighborhood", 0)
            .param("maxResults", query.limit.unwrap_or(DEFAULT_LIMIT)))
    }

    fn normalize(&self, raw: &Value) -> Result<Vec<AddressCandidate>, DomainError> {
        let sets = result_records(NAME, raw, Some("resourceSets"))?;
        let Some(first_set) = sets.first() else {
            return Ok(Vec::new());
        };
        let records = result_records(NAME, first_set, Some("resources"))?;
        let mut candidates = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let Ok(resource) = serde_json::from_value::<api::Resource>(record.clone()) else {
                skip_record(NAME, index, "not a resource");
                continue;
            };

            let coordinate = resource.point.as_ref().and_then(|p| match p.coordinates.as_slice() {
                [lat, lon, ..] => {
                    Coordinate::from_lat_lon(lenient_f64(Some(lat))?, lenient_f64(Some(lon))?).ok()
                },
                _ => None,
            });
            let Some(coordinate) = coordinate else {
                skip_record(NAME, index, "missing or invalid point");
                continue;
            };

            let fields = &resource.address;
            let address = Address {
                name: resource.name.clone(),
                road: text(fields, "addressLine"),
                postcode: text(fields, "postalCode"),
                city: text(fields, "locality"),
                state: text(fields, "adminDistrict"),
                country: text(fields, "countryRegion"),
                ..Default::default()
            };
            let original = OriginalPlace {
                formatted: text(fields, "formattedAddress").unwrap_or_default(),
                details: Value::Object(fields.clone()),
            };

            candidates.push(
                AddressCandidate::new(coordinate, address, original)
                    .with_bounding_box(bounding_box(&resource.bbox)),
            );
        }

        Ok(candidates)
    }
}
