//! Built-in provider adapters and the provider tagged union

mod bing;
mod mapquest;
mod nominatim;
mod opencage;
mod photon;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use domain::{AddressCandidate, DomainError, GeocodeQuery, ProviderAdapter, RequestSpec};
use serde_json::{Map, Value};
use tracing::debug;

pub use bing::BingAdapter;
pub use mapquest::MapQuestAdapter;
pub use nominatim::NominatimAdapter;
pub use opencage::OpenCageAdapter;
pub use photon::PhotonAdapter;

/// Result limit used when the query does not set one
pub(crate) const DEFAULT_LIMIT: u32 = 10;

/// Names of the built-in providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Osm,
    MapQuest,
    Photon,
    Bing,
    OpenCage,
}

impl ProviderKind {
    /// All built-in providers, in display order
    pub const ALL: [Self; 5] = [
        Self::Osm,
        Self::MapQuest,
        Self::Photon,
        Self::Bing,
        Self::OpenCage,
    ];

    /// Configuration name of the provider
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Osm => "osm",
            Self::MapQuest => "mapquest",
            Self::Photon => "photon",
            Self::Bing => "bing",
            Self::OpenCage => "opencage",
        }
    }

    /// Whether the provider rejects requests without an API key
    #[must_use]
    pub const fn requires_api_key(&self) -> bool {
        matches!(self, Self::MapQuest | Self::Bing | Self::OpenCage)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "osm" | "nominatim" => Ok(Self::Osm),
            "mapquest" => Ok(Self::MapQuest),
            "photon" => Ok(Self::Photon),
            "bing" => Ok(Self::Bing),
            "opencage" => Ok(Self::OpenCage),
            other => Err(DomainError::UnknownProvider(other.to_string())),
        }
    }
}

/// Any geocoding provider the widget can talk to
///
/// The five built-in services plus an application-supplied adapter. All
/// variants are driven through the same [`ProviderAdapter`] contract.
#[derive(Debug, Clone)]
pub enum Provider {
    Osm(NominatimAdapter),
    MapQuest(MapQuestAdapter),
    Photon(PhotonAdapter),
    Bing(BingAdapter),
    OpenCage(OpenCageAdapter),
    Custom(Arc<dyn ProviderAdapter>),
}

impl Provider {
    /// Built-in provider with its public endpoint
    #[must_use]
    pub fn builtin(kind: ProviderKind) -> Self {
        match kind {
            ProviderKind::Osm => Self::Osm(NominatimAdapter::default()),
            ProviderKind::MapQuest => Self::MapQuest(MapQuestAdapter::default()),
            ProviderKind::Photon => Self::Photon(PhotonAdapter::default()),
            ProviderKind::Bing => Self::Bing(BingAdapter::default()),
            ProviderKind::OpenCage => Self::OpenCage(OpenCageAdapter::default()),
        }
    }

    /// Resolve a built-in provider by name
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownProvider` if no built-in matches.
    pub fn from_name(name: &str) -> Result<Self, DomainError> {
        name.parse().map(Self::builtin)
    }

    /// Wrap an application-supplied adapter
    #[must_use]
    pub fn custom(adapter: Arc<dyn ProviderAdapter>) -> Self {
        Self::Custom(adapter)
    }

    /// Point a built-in provider at a different endpoint
    ///
    /// Custom adapters are returned unchanged.
    #[must_use]
    pub fn with_endpoint(self, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        match self {
            Self::Osm(a) => Self::Osm(a.with_endpoint(endpoint)),
            Self::MapQuest(a) => Self::MapQuest(a.with_endpoint(endpoint)),
            Self::Photon(a) => Self::Photon(a.with_endpoint(endpoint)),
            Self::Bing(a) => Self::Bing(a.with_endpoint(endpoint)),
            Self::OpenCage(a) => Self::OpenCage(a.with_endpoint(endpoint)),
            Self::Custom(a) => Self::Custom(a),
        }
    }

    /// Built-in kind, `None` for custom adapters
    #[must_use]
    pub const fn kind(&self) -> Option<ProviderKind> {
        match self {
            Self::Osm(_) => Some(ProviderKind::Osm),
            Self::MapQuest(_) => Some(ProviderKind::MapQuest),
            Self::Photon(_) => Some(ProviderKind::Photon),
            Self::Bing(_) => Some(ProviderKind::Bing),
            Self::OpenCage(_) => Some(ProviderKind::OpenCage),
            Self::Custom(_) => None,
        }
    }

    fn adapter(&self) -> &dyn ProviderAdapter {
        match self {
            Self::Osm(a) => a,
            Self::MapQuest(a) => a,
            Self::Photon(a) => a,
            Self::Bing(a) => a,
            Self::OpenCage(a) => a,
            Self::Custom(a) => a.as_ref(),
        }
    }
}

impl ProviderAdapter for Provider {
    fn name(&self) -> &str {
        self.adapter().name()
    }

    fn requires_api_key(&self) -> bool {
        self.adapter().requires_api_key()
    }

    fn build_request(&self, query: &GeocodeQuery) -> Result<RequestSpec, DomainError> {
        self.adapter().build_request(query)
    }

    fn normalize(&self, raw: &Value) -> Result<Vec<AddressCandidate>, DomainError> {
        self.adapter().normalize(raw)
    }
}

// ============================================================================
// Payload helpers shared by the adapters
// ============================================================================

/// Locate the array of result records inside `raw`
///
/// With `key = None` the payload itself must be the array.
pub(crate) fn result_records<'a>(
    provider: &str,
    raw: &'a Value,
    key: Option<&str>,
) -> Result<&'a [Value], DomainError> {
    let container = match key {
        Some(key) => raw
            .get(key)
            .ok_or_else(|| DomainError::malformed(provider, format!("missing '{key}'")))?,
        None => raw,
    };
    container
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| DomainError::malformed(provider, "result container is not an array"))
}

/// Numeric value, accepting numbers encoded as strings
pub(crate) fn lenient_f64(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// String value of `key`, accepting numbers as well
pub(crate) fn text(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First non-empty string among `keys`
pub(crate) fn first_text(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| text(object, key))
        .find(|value| !value.is_empty())
}

/// String value of `key`, or an empty string when absent
pub(crate) fn text_or_empty(object: &Map<String, Value>, key: &str) -> Option<String> {
    Some(text(object, key).unwrap_or_default())
}

/// Note a record that was dropped during normalization
pub(crate) fn skip_record(provider: &str, index: usize, reason: &str) {
    debug!(provider = %provider, index, reason = %reason, "Skipping provider record");
}
