//! Provider adapter contract
//!
//! An adapter translates between the unified query/result model and one
//! upstream geocoding API. Adapters are pure: building a request and
//! normalizing a response never touch the network.

use std::collections::BTreeMap;
use std::fmt;

use crate::entities::AddressCandidate;
use crate::errors::DomainError;

/// A geocoding query as issued by the widget
#[derive(Clone, Default)]
pub struct GeocodeQuery {
    /// Free-text address query (already trimmed)
    pub text: String,
    /// Language tag, e.g. "en-US"
    pub language: Option<String>,
    /// Maximum number of results
    pub limit: Option<u32>,
    /// Comma separated ISO 3166-1 alpha-2 country filter
    pub country_codes: Option<String>,
    /// Provider API key
    pub api_key: Option<String>,
}

impl GeocodeQuery {
    /// Create a query with only the text set
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_country_codes(mut self, codes: impl Into<String>) -> Self {
        self.country_codes = Some(codes.into());
        self
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Non-empty API key, if any
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// Non-empty country filter, if any
    #[must_use]
    pub fn country_codes(&self) -> Option<&str> {
        self.country_codes.as_deref().filter(|c| !c.trim().is_empty())
    }
}

impl fmt::Debug for GeocodeQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeocodeQuery")
            .field("text", &self.text)
            .field("language", &self.language)
            .field("limit", &self.limit)
            .field("country_codes", &self.country_codes)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// How a request has to be carried to the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportKind {
    /// Plain request/response returning JSON
    Direct,
    /// Callback-wrapped response; `param` names the query parameter that
    /// carries the callback name
    Callback { param: String },
}

/// Description of one outbound provider request
#[derive(Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub endpoint: String,
    pub params: BTreeMap<String, String>,
    pub transport: TransportKind,
}

impl RequestSpec {
    /// Create a direct request to `endpoint`
    #[must_use]
    pub fn direct(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: BTreeMap::new(),
            transport: TransportKind::Direct,
        }
    }

    /// Create a callback-transport request to `endpoint`
    #[must_use]
    pub fn callback(endpoint: impl Into<String>, param: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: BTreeMap::new(),
            transport: TransportKind::Callback {
                param: param.into(),
            },
        }
    }

    /// Add a query parameter
    #[must_use]
    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.params.insert(name.to_string(), value.to_string());
        self
    }

    /// Add a query parameter only when a value is present
    #[must_use]
    pub fn param_opt(self, name: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.param(name, v),
            None => self,
        }
    }

    /// Look up a query parameter
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

impl fmt::Debug for RequestSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: BTreeMap<&str, &str> = self
            .params
            .iter()
            .map(|(k, v)| {
                if k == "key" {
                    (k.as_str(), "[REDACTED]")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect();
        f.debug_struct("RequestSpec")
            .field("endpoint", &self.endpoint)
            .field("params", &params)
            .field("transport", &self.transport)
            .finish()
    }
}

/// Translation layer between the unified model and one geocoding API
///
/// Implemented once per built-in service; applications may supply their
/// own implementation in place of a built-in one.
pub trait ProviderAdapter: Send + Sync + fmt::Debug {
    /// Short provider name used in logs and errors
    fn name(&self) -> &str;

    /// Whether requests are rejected without an API key
    fn requires_api_key(&self) -> bool {
        false
    }

    /// Describe the outbound request for `query`
    ///
    /// Provider defaults apply only to fields the query leaves unset.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingApiKey` when a key is required but absent.
    fn build_request(&self, query: &GeocodeQuery) -> Result<RequestSpec, DomainError>;

    /// Normalize a raw provider payload into candidates, preserving order
    ///
    /// An empty result set is `Ok(vec![])`. Records without usable
    /// coordinates are skipped.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedResponse` when the result envelope
    /// itself is missing or has the wrong shape.
    fn normalize(&self, raw: &serde_json::Value) -> Result<Vec<AddressCandidate>, DomainError>;
}
