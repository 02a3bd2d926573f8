//! MapQuest Open Nominatim adapter

use domain::{Address, AddressCandidate, DomainError, GeocodeQuery, ProviderAdapter, RequestSpec};
use serde_json::Value;

use super::nominatim::{api, normalize_places, search_request};
use super::{first_text, text, text_or_empty};

const NAME: &str = "mapquest";
const ENDPOINT: &str = "https://open.mapquestapi.com/nominatim/v1/search.php";

/// Adapter for MapQuest's hosted Nominatim
///
/// Same wire format as OSM Nominatim, but requests carry an API key.
#[derive(Debug, Clone)]
pub struct MapQuestAdapter {
    endpoint: String,
}

impl Default for MapQuestAdapter {
    fn default() -> Self {
        Self {
            endpoint: ENDPOINT.to_string(),
        }
    }
}

impl MapQuestAdapter {
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

fn mapquest_address(place: &api::Place) -> Address {
    let fields = &place.address;
    Address {
        name: text_or_empty(fields, "neighbourhood"),
        road: text_or_empty(fields, "road"),
        house_number: text(fields, "house_number"),
        postcode: text(fields, "postcode"),
        city: first_text(fields, &["city", "town"]),
        state: text(fields, "state"),
        country: text(fields, "country"),
    }
}

impl ProviderAdapter for MapQuestAdapter {
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
        Ok(search_request(&self.endpoint, query).param("key", key))
    }

    fn normalize(&self, raw: &Value) -> Result<Vec<AddressCandidate>, DomainError> {
        normalize_places(NAME, raw, mapquest_address)
    }
}
