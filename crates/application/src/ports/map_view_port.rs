//! Map view port
//!
//! The slice of the host map the widget needs: its projection, layer
//! attachment, camera movement and a one-shot click subscription for
//! clicks outside the widget.

use std::time::Duration;

use domain::{Extent, LayerId, MapCoordinate, Projection};

use crate::overlay::OverlayLayer;

/// Callback run when the map is clicked
pub type ClickHandler = Box<dyn FnOnce() + Send + 'static>;

/// Subscription handle returned by [`MapViewPort::listen_click_once`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

impl ListenerHandle {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.0
    }
}

/// Port for the host map view
pub trait MapViewPort: Send + Sync {
    /// Projection the view renders in
    fn projection(&self) -> Projection;

    /// Whether a layer with this identity is attached
    fn has_layer(&self, layer: &LayerId) -> bool;

    /// Attach a layer
    fn add_layer(&self, layer: &OverlayLayer);

    /// Fit the viewport to `extent` with an animated transition
    fn fit_extent(&self, extent: Extent, duration: Duration);

    /// Animate the camera to `center` at `resolution` map units per pixel
    fn animate_to(&self, center: MapCoordinate, resolution: f64, duration: Duration);

    /// Run `handler` on the next map click, then forget it
    ///
    /// The handler must not be invoked from within this call.
    fn listen_click_once(&self, handler: ClickHandler) -> ListenerHandle;

    /// Drop a subscription that has not fired yet
    fn unlisten_click(&self, handle: ListenerHandle);
}
