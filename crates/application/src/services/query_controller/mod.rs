//! Query controller
//!
//! Drives the geocoder widget: input and debounce handling, query dispatch
//! with dedupe and stale-response suppression, candidate selection and the
//! one-shot outside-click subscription.
//!
//! State lives behind a single mutex that is never held across an await.
//! Every dispatch, reset and collapse bumps a generation counter; a
//! response whose generation is no longer current is discarded.

mod event;
mod state;

use std::fmt;
use std::sync::{Arc, OnceLock, Weak};
use std::time::Duration;

use domain::{GeocodeQuery, MapCoordinate, PointFeature, ProviderAdapter};
use parking_lot::Mutex;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, trace, warn};
use uuid::Uuid;

pub use event::{AddressChosen, ChosenAddress};
pub use state::{Phase, QueryState, ResultNotice};

use crate::error::ApplicationError;
use crate::options::{GeocoderOptions, ProviderSelector, TargetType};
use crate::overlay::{FeatureSource, OverlayLayer};
use crate::ports::{ListenerHandle, MapViewPort, ProviderResolverPort, TransportPort};
use crate::services::address_template::render_html;

/// Duration of the fit-to-extent transition
pub const FIT_DURATION: Duration = Duration::from_millis(500);

/// Duration of the fly-to-point transition
pub const FLY_TO_DURATION: Duration = Duration::from_millis(500);

/// Resolution used when flying to a point without bounding box
pub const FLY_TO_RESOLUTION: f64 = 2.388_657_133_911_758;

const FEATURE_PREFIX: &str = "geocoder-ft-";
const EVENT_CAPACITY: usize = 16;

/// How a dispatched query ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Same text as the last query while its results are still shown
    Skipped,
    /// Candidates rendered
    Results(usize),
    /// Provider answered with zero results
    Empty,
    /// Transport or payload failure, notice rendered
    Failed,
    /// Superseded by a newer query, reset or collapse; nothing rendered
    Stale,
}

/// The geocoder widget's state machine
///
/// Cheap to clone; clones drive the same widget.
#[derive(Clone)]
pub struct QueryController {
    inner: Arc<Inner>,
}

struct Inner {
    options: GeocoderOptions,
    map: Arc<dyn MapViewPort>,
    transport: Arc<dyn TransportPort>,
    resolver: Arc<dyn ProviderResolverPort>,
    overlay: OnceLock<OverlayLayer>,
    events: broadcast::Sender<AddressChosen>,
    session: Mutex<Session>,
}

struct Session {
    state: QueryState,
    provider: Arc<dyn ProviderAdapter>,
    api_key: Option<SecretString>,
    /// Trimmed text at the last auto-complete attempt
    autocomplete_text: String,
    debounce: Option<JoinHandle<()>>,
    outside_click: Option<ListenerHandle>,
}

impl fmt::Debug for QueryController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.inner.session.lock();
        f.debug_struct("QueryController")
            .field("provider", &session.provider.name())
            .field("phase", &session.state.phase())
            .field("options", &self.inner.options)
            .finish_non_exhaustive()
    }
}

impl QueryController {
    /// Create a controller for the provider named in `options`
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid or the provider name is
    /// unknown.
    pub fn new(
        options: GeocoderOptions,
        map: Arc<dyn MapViewPort>,
        transport: Arc<dyn TransportPort>,
        resolver: Arc<dyn ProviderResolverPort>,
    ) -> Result<Self, ApplicationError> {
        let selector = ProviderSelector::Named(options.provider.clone());
        Self::with_provider(options, selector, map, transport, resolver)
    }

    /// Create a controller for an explicit provider selector
    ///
    /// The selector takes precedence over `options.provider`; a custom
    /// adapter is installed as is.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid or a provider name is
    /// unknown.
    pub fn with_provider(
        options: GeocoderOptions,
        selector: impl Into<ProviderSelector>,
        map: Arc<dyn MapViewPort>,
        transport: Arc<dyn TransportPort>,
        resolver: Arc<dyn ProviderResolverPort>,
    ) -> Result<Self, ApplicationError> {
        options.validate().map_err(ApplicationError::Configuration)?;
        let provider = match selector.into() {
            ProviderSelector::Named(name) => resolver.resolve(&name)?,
            ProviderSelector::Custom(adapter) => adapter,
        };
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        debug!(provider = %provider.name(), "Geocoder controller created");

        Ok(Self {
            inner: Arc::new(Inner {
                session: Mutex::new(Session {
                    state: QueryState::default(),
                    provider,
                    api_key: options.api_key.clone(),
                    autocomplete_text: String::new(),
                    debounce: None,
                    outside_click: None,
                }),
                options,
                map,
                transport,
                resolver,
                overlay: OnceLock::new(),
                events,
            }),
        })
    }

    // ------------------------------------------------------------------------
    // Exposed operations
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn options(&self) -> &GeocoderOptions {
        &self.inner.options
    }

    /// Snapshot of the current widget state
    #[must_use]
    pub fn state(&self) -> QueryState {
        self.inner.session.lock().state.clone()
    }

    /// Name of the active provider
    #[must_use]
    pub fn provider_name(&self) -> String {
        self.inner.session.lock().provider.name().to_string()
    }

    /// Subscribe to `addresschosen` events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AddressChosen> {
        self.inner.events.subscribe()
    }

    /// The overlay layer hosting chosen-address markers
    #[must_use]
    pub fn layer(&self) -> OverlayLayer {
        self.overlay().clone()
    }

    /// The overlay layer's feature source
    #[must_use]
    pub fn source(&self) -> FeatureSource {
        self.overlay().source().clone()
    }

    /// Switch to another provider
    ///
    /// The last query is forgotten and a response still in flight from the
    /// previous provider is discarded when it arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if a provider name is unknown; the active provider
    /// is kept in that case.
    pub fn set_provider(
        &self,
        selector: impl Into<ProviderSelector>,
    ) -> Result<(), ApplicationError> {
        let provider = match selector.into() {
            ProviderSelector::Named(name) => self.inner.resolver.resolve(&name)?,
            ProviderSelector::Custom(adapter) => adapter,
        };
        info!(provider = %provider.name(), "Provider changed");

        let mut session = self.inner.session.lock();
        session.provider = provider;
        session.state.last_query.clear();
        session.state.pending = false;
        session.state.bump_generation();
        Ok(())
    }

    /// Replace the provider API key
    pub fn set_provider_key(&self, key: impl Into<String>) {
        self.inner.session.lock().api_key = Some(SecretString::from(key.into()));
    }

    // ------------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------------

    /// Handle a change of the input text
    ///
    /// With auto-complete enabled this (re)starts the debounce timer; the
    /// query fires once input has been quiet for the configured delay.
    pub fn input_changed(&self, text: &str) {
        let trimmed = text.trim().to_string();
        let options = &self.inner.options;

        let mut session = self.inner.session.lock();
        session.state.input = text.to_string();
        session.state.clear_visible = !trimmed.is_empty();

        if !options.auto_complete || trimmed == session.autocomplete_text {
            return;
        }
        session.autocomplete_text.clone_from(&trimmed);

        if let Some(previous) = session.debounce.take() {
            previous.abort();
        }

        let deadline = tokio::time::Instant::now() + options.debounce_delay();
        let min_length = options.auto_complete_min_length;
        let weak = Arc::downgrade(&self.inner);

        session.debounce = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if trimmed.chars().count() < min_length {
                trace!(query = %trimmed, "Input below auto-complete minimum");
                return;
            }
            // Detached so a later keystroke cannot cancel a request in flight
            if let Some(controller) = Self::upgrade(&weak) {
                tokio::spawn(async move {
                    if let Err(e) = controller.query(&trimmed).await {
                        warn!(error = %e, "Auto-complete query rejected");
                    }
                });
            }
        }));
    }

    /// Dispatch the current input immediately, bypassing the debounce
    ///
    /// # Errors
    ///
    /// Returns an error on misconfiguration, see [`Self::query`].
    pub async fn submit(&self) -> Result<QueryOutcome, ApplicationError> {
        let text = self.inner.session.lock().state.input.trim().to_string();
        self.query(&text).await
    }

    /// Dispatch a query
    ///
    /// Transport and payload failures settle into [`Phase::Failed`] and are
    /// reported as [`QueryOutcome::Failed`], not as an error.
    ///
    /// # Errors
    ///
    /// Returns an error before any network I/O when the provider rejects the
    /// request, e.g. because a required API key is missing.
    #[instrument(skip(self), fields(provider = tracing::field::Empty))]
    pub async fn query(&self, text: &str) -> Result<QueryOutcome, ApplicationError> {
        let text = text.trim();

        let (provider, request, generation) = {
            let mut session = self.inner.session.lock();
            let provider = Arc::clone(&session.provider);
            tracing::Span::current().record("provider", provider.name());

            let query = self.geocode_query(text, session.api_key.as_ref());
            let request = provider.build_request(&query)?;

            let state = &mut session.state;
            if state.last_query == text && state.has_results() {
                debug!("Query unchanged while results are shown");
                return Ok(QueryOutcome::Skipped);
            }
            state.last_query = text.to_string();
            state.clear_results();
            state.pending = true;
            (provider, request, state.bump_generation())
        };

        debug!(generation, "Dispatching query");
        let response = self.inner.transport.execute(&request).await;

        let outcome = {
            let mut session = self.inner.session.lock();
            let state = &mut session.state;
            if state.generation != generation {
                debug!(generation, current = state.generation, "Discarding stale response");
                return Ok(QueryOutcome::Stale);
            }
            state.pending = false;

            let normalized = response.and_then(|raw| {
                self.log_payload(provider.name(), &raw);
                provider.normalize(&raw).map_err(ApplicationError::from)
            });
            match normalized {
                Ok(candidates) if candidates.is_empty() => {
                    state.notice = Some(ResultNotice::NoResults);
                    QueryOutcome::Empty
                },
                Ok(candidates) => {
                    let count = candidates.len();
                    state.candidates = candidates;
                    QueryOutcome::Results(count)
                },
                Err(e) => {
                    warn!(error = %e, "Query failed");
                    state.notice = Some(ResultNotice::ConnectivityError);
                    QueryOutcome::Failed
                },
            }
        };

        if matches!(outcome, QueryOutcome::Results(_)) {
            self.arm_outside_click();
        }
        debug!(?outcome, "Query settled");
        Ok(outcome)
    }

    // ------------------------------------------------------------------------
    // Visibility
    // ------------------------------------------------------------------------

    /// Glass-button press: expand when collapsed, collapse when expanded
    ///
    /// Returns whether the widget is expanded afterwards. Does nothing in
    /// text-input mode.
    pub fn toggle(&self) -> bool {
        if self.inner.options.target_type != TargetType::GlassButton {
            return false;
        }
        let expanded = self.inner.session.lock().state.expanded;
        if expanded {
            self.collapse();
            false
        } else {
            self.expand();
            true
        }
    }

    fn expand(&self) {
        self.inner.session.lock().state.expanded = true;
        self.arm_outside_click();
    }

    fn collapse(&self) {
        {
            let mut session = self.inner.session.lock();
            let state = &mut session.state;
            state.input.clear();
            state.clear_visible = false;
            state.expanded = false;
            state.pending = false;
            state.clear_results();
            state.bump_generation();
        }
        self.revoke_outside_click();
    }

    /// Clear the rendered results
    ///
    /// With `collapse` in glass-button mode the widget is collapsed as well.
    pub fn clear_results(&self, collapse: bool) {
        if collapse && self.inner.options.target_type == TargetType::GlassButton {
            self.collapse();
            return;
        }
        self.inner.session.lock().state.clear_results();
        if collapse {
            self.revoke_outside_click();
        }
    }

    /// Explicit clear action
    ///
    /// Blanks the input and forgets the last query. A response still in
    /// flight is discarded when it arrives.
    pub fn reset(&self) {
        let debounce = {
            let mut session = self.inner.session.lock();
            let state = &mut session.state;
            state.input.clear();
            state.last_query.clear();
            state.clear_visible = false;
            state.pending = false;
            state.clear_results();
            state.bump_generation();
            session.autocomplete_text.clear();
            session.debounce.take()
        };
        if let Some(task) = debounce {
            task.abort();
        }
        self.revoke_outside_click();
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    /// Choose the candidate at `index` of the rendered list
    ///
    /// # Errors
    ///
    /// Returns `InvalidSelection` if no candidate is rendered at `index`.
    pub fn select(&self, index: usize) -> Result<AddressChosen, ApplicationError> {
        let candidate = {
            let session = self.inner.session.lock();
            let candidates = &session.state.candidates;
            candidates
                .get(index)
                .cloned()
                .ok_or(ApplicationError::InvalidSelection {
                    index,
                    available: candidates.len(),
                })?
        };

        let options = &self.inner.options;
        let map = &self.inner.map;
        let projection = map.projection();
        let coordinate = projection.project(candidate.coordinate);
        let bounding_box = candidate
            .bounding_box
            .map(|bbox| projection.project_extent(bbox));

        let address = ChosenAddress {
            formatted: render_html(&candidate.address),
            details: candidate.address.clone(),
            original: candidate.original.clone(),
        };

        if !options.keep_open {
            self.clear_results(true);
        }

        let feature = if options.prevent_default {
            None
        } else {
            match bounding_box {
                Some(extent) => map.fit_extent(extent, FIT_DURATION),
                None => map.animate_to(coordinate, FLY_TO_RESOLUTION, FLY_TO_DURATION),
            }
            Some(self.create_feature(coordinate))
        };

        let event = AddressChosen {
            address,
            coordinate,
            bounding_box,
            feature,
            place: candidate,
            chosen_at: chrono::Utc::now(),
        };

        info!(
            index,
            formatted = %event.place.original.formatted,
            "Address chosen"
        );
        // No subscribers is fine
        let _ = self.inner.events.send(event.clone());
        Ok(event)
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn upgrade(weak: &Weak<Inner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    fn overlay(&self) -> &OverlayLayer {
        self.inner.overlay.get_or_init(OverlayLayer::new)
    }

    fn geocode_query(&self, text: &str, api_key: Option<&SecretString>) -> GeocodeQuery {
        let options = &self.inner.options;
        GeocodeQuery {
            text: text.to_string(),
            language: Some(options.lang.clone()).filter(|l| !l.trim().is_empty()),
            limit: Some(options.limit),
            country_codes: options.country_codes.clone(),
            api_key: api_key.map(|k| k.expose_secret().to_string()),
        }
    }

    fn log_payload(&self, provider: &str, raw: &Value) {
        if self.inner.options.debug {
            info!(provider = %provider, payload = %raw, "Provider payload");
        } else {
            trace!(provider = %provider, payload = %raw, "Provider payload");
        }
    }

    fn create_feature(&self, coordinate: MapCoordinate) -> PointFeature {
        let layer = self.overlay();
        if !self.inner.map.has_layer(layer.id()) {
            self.inner.map.add_layer(layer);
        }

        let feature = PointFeature {
            id: format!("{FEATURE_PREFIX}{}", Uuid::new_v4().simple()),
            coordinate,
            style: self.inner.options.marker_style.clone(),
        };
        layer.source().add_feature(feature.clone());
        feature
    }

    /// Subscribe to the next map click unless already subscribed
    fn arm_outside_click(&self) {
        let mut session = self.inner.session.lock();
        if session.outside_click.is_some() {
            return;
        }
        let weak = Arc::downgrade(&self.inner);
        let handle = self.inner.map.listen_click_once(Box::new(move || {
            if let Some(controller) = Self::upgrade(&weak) {
                controller.outside_clicked();
            }
        }));
        session.outside_click = Some(handle);
    }

    fn outside_clicked(&self) {
        // The map already dropped the fired subscription
        self.inner.session.lock().outside_click = None;
        debug!("Click outside the widget");
        self.clear_results(true);
    }

    fn revoke_outside_click(&self) {
        let handle = self.inner.session.lock().outside_click.take();
        if let Some(handle) = handle {
            self.inner.map.unlisten_click(handle);
        }
    }
}
