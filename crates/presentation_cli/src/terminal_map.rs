//! Map view for the terminal
//!
//! Nothing is drawn: camera moves are logged and remembered, layers are
//! tracked by identity and the one-shot click subscription can be fired
//! by hand.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use application::{ClickHandler, ListenerHandle, MapViewPort, OverlayLayer};
use domain::{Extent, LayerId, MapCoordinate, Projection};
use parking_lot::Mutex;
use tracing::{debug, info};

/// Last camera movement requested by the widget
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMove {
    Fit(Extent),
    FlyTo { center: MapCoordinate, resolution: f64 },
}

pub struct TerminalMap {
    projection: Projection,
    layers: Mutex<Vec<LayerId>>,
    camera: Mutex<Option<CameraMove>>,
    listeners: Mutex<HashMap<u64, ClickHandler>>,
    next_listener: AtomicU64,
}

impl std::fmt::Debug for TerminalMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalMap")
            .field("projection", &self.projection)
            .field("layers", &self.layers.lock().len())
            .field("camera", &self.camera())
            .field("listeners", &self.listeners.lock().len())
            .finish_non_exhaustive()
    }
}

impl TerminalMap {
    #[must_use]
    pub fn new(projection: Projection) -> Self {
        Self {
            projection,
            layers: Mutex::new(Vec::new()),
            camera: Mutex::new(None),
            listeners: Mutex::new(HashMap::new()),
            next_listener: AtomicU64::new(1),
        }
    }

    /// Simulate a click on the map; returns how many subscriptions fired
    pub fn click(&self) -> usize {
        let handlers: Vec<ClickHandler> = self.listeners.lock().drain().map(|(_, h)| h).collect();
        let fired = handlers.len();
        for handler in handlers {
            handler();
        }
        fired
    }

    #[must_use]
    pub fn camera(&self) -> Option<CameraMove> {
        *self.camera.lock()
    }

    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.lock().len()
    }
}

impl MapViewPort for TerminalMap {
    fn projection(&self) -> Projection {
        self.projection
    }

    fn has_layer(&self, layer: &LayerId) -> bool {
        self.layers.lock().contains(layer)
    }

    fn add_layer(&self, layer: &OverlayLayer) {
        debug!(layer = %layer.id(), "Layer attached");
        self.layers.lock().push(layer.id().clone());
    }

    fn fit_extent(&self, extent: Extent, duration: Duration) {
        info!(
            min_x = extent.min_x,
            min_y = extent.min_y,
            max_x = extent.max_x,
            max_y = extent.max_y,
            duration_ms = duration.as_millis(),
            "Fit view to extent"
        );
        *self.camera.lock() = Some(CameraMove::Fit(extent));
    }

    fn animate_to(&self, center: MapCoordinate, resolution: f64, duration: Duration) {
        info!(
            x = center.x,
            y = center.y,
            resolution,
            duration_ms = duration.as_millis(),
            "Fly to point"
        );
        *self.camera.lock() = Some(CameraMove::FlyTo { center, resolution });
    }

    fn listen_click_once(&self, handler: ClickHandler) -> ListenerHandle {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().insert(id, handler);
        ListenerHandle::new(id)
    }

    fn unlisten_click(&self, handle: ListenerHandle) {
        self.listeners.lock().remove(&handle.id());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[test]
    fn click_fires_each_subscription_once() {
        let map = TerminalMap::new(Projection::WebMercator);
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        map.listen_click_once(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        assert_eq!(map.click(), 1);
        assert_eq!(map.click(), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unlisten_drops_subscription() {
        let map = TerminalMap::new(Projection::Wgs84);
        let handle = map.listen_click_once(Box::new(|| {}));
        map.unlisten_click(handle);
        assert_eq!(map.click(), 0);
    }

    #[test]
    fn layers_are_tracked_by_identity() {
        let map = TerminalMap::new(Projection::WebMercator);
        let layer = OverlayLayer::new();
        assert!(!map.has_layer(layer.id()));
        map.add_layer(&layer);
        assert!(map.has_layer(layer.id()));
        assert_eq!(map.layer_count(), 1);
    }

    #[test]
    fn camera_remembers_last_move() {
        let map = TerminalMap::new(Projection::Wgs84);
        assert!(map.camera().is_none());
        let center = MapCoordinate { x: 1.0, y: 2.0 };
        map.animate_to(center, 2.0, Duration::from_millis(500));
        assert_eq!(
            map.camera(),
            Some(CameraMove::FlyTo {
                center,
                resolution: 2.0
            })
        );
    }
}
