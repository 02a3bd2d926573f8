//! Photon (komoot) adapter

use domain::{
    Address, AddressCandidate, BoundingBox, Coordinate, DomainError, GeocodeQuery, OriginalPlace,
    ProviderAdapter, RequestSpec,
};
use serde_json::Value;

use super::{DEFAULT_LIMIT, lenient_f64, result_records, skip_record, text};

const NAME: &str = "photon";
const ENDPOINT: &str = "https://photon.komoot.io/api/";
const LANGUAGES: [&str; 4] = ["de", "it", "fr", "en"];
const FALLBACK_LANGUAGE: &str = "en";

mod api {
    use serde::Deserialize;
    use serde_json::{Map, Value};

    /// One GeoJSON feature of the Photon answer
    #[derive(Debug, Deserialize)]
    pub struct Feature {
        pub geometry: Option<Geometry>,
        #[serde(default)]
        pub properties: Map<String, Value>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Geometry {
        /// `[lon, lat]`
        #[serde(default)]
        pub coordinates: Vec<Value>,
    }
}

/// Adapter for the Photon search API
#[derive(Debug, Clone)]
pub struct PhotonAdapter {
    endpoint: String,
}

impl Default for PhotonAdapter {
    fn default() -> Self {
        Self {
            endpoint: ENDPOINT.to_string(),
        }
    }
}

impl PhotonAdapter {
    /// Use a self-hosted Photon instance
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Photon only knows a handful of languages; anything else maps to `en`
fn photon_language(tag: Option<&str>) -> &'static str {
    let primary = tag
        .and_then(|t| t.split(['-', '_']).next())
        .map(str::to_lowercase)
        .unwrap_or_default();
    LANGUAGES
        .into_iter()
        .find(|lang| *lang == primary)
        .unwrap_or(FALLBACK_LANGUAGE)
}

/// Photon `extent` is `[west, north, east, south]`
fn bounding_box(properties: &serde_json::Map<String, Value>) -> Option<BoundingBox> {
    let extent = properties.get("extent")?.as_array()?;
    let [west, north, east, south] = extent.as_slice() else {
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

impl ProviderAdapter for PhotonAdapter {
    fn name(&self) -> &str {
        NAME
    }

    fn build_request(&self, query: &GeocodeQuery) -> Result<RequestSpec, DomainError> {
        Ok(RequestSpec::direct(&self.endpoint)
            .param("q", &query.text)
            .param("limit", query.limit.unwrap_or(DEFAULT_LIMIT))
            .param("lang", photon_language(query.language.as_deref())))
    }

    fn normalize(&self, raw: &Value) -> Result<Vec<AddressCandidate>, DomainError> {
        let records = result_records(NAME, raw, Some("features"))?;
        let mut candidates = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let Ok(feature) = serde_json::from_value::<api::Feature>(record.clone()) else {
                skip_record(NAME, index, "not a feature");
                continue;
            };

            let coordinate = feature.geometry.as_ref().and_then(|g| match g.coordinates.as_slice() {
                [lon, lat, ..] => Coordinate::new(lenient_f64(Some(lon))?, lenient_f64(Some(lat))?).ok(),
                _ => None,
            });
            let Some(coordinate) = coordinate else {
                skip_record(NAME, index, "missing or invalid coordinates");
                continue;
            };

            let props = &feature.properties;
            let address = Address {
                name: text(props, "name"),
                postcode: text(props, "postcode"),
                city: text(props, "city"),
                state: text(props, "state"),
                country: text(props, "country"),
                ..Default::default()
            };
            let original = OriginalPlace {
                formatted: text(props, "name").unwrap_or_default(),
                details: Value::Object(props.clone()),
            };

            candidates.push(
                AddressCandidate::new(coordinate, address, original)
                    .with_bounding_box(bounding_box(props)),
            );
        }

        Ok(candidates)
    }
}
