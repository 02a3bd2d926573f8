//! The widget's overlay layer
//!
//! The layer and its feature source are shared handles: the map view and
//! the controller see the same features.

use std::sync::Arc;

use domain::{LayerId, PointFeature};
use parking_lot::RwLock;
use uuid::Uuid;

const LAYER_PREFIX: &str = "geocoder-layer-";

/// Features hosted by the overlay layer
#[derive(Debug, Clone, Default)]
pub struct FeatureSource {
    features: Arc<RwLock<Vec<PointFeature>>>,
}

impl FeatureSource {
    pub fn add_feature(&self, feature: PointFeature) {
        self.features.write().push(feature);
    }

    /// Snapshot of the current features, oldest first
    #[must_use]
    pub fn features(&self) -> Vec<PointFeature> {
        self.features.read().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.read().is_empty()
    }

    pub fn clear(&self) {
        self.features.write().clear();
    }
}

/// Vector layer that hosts the chosen-address markers
#[derive(Debug, Clone)]
pub struct OverlayLayer {
    id: LayerId,
    source: FeatureSource,
}

impl OverlayLayer {
    /// Create an empty layer with a unique name
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: LayerId::new(format!("{LAYER_PREFIX}{}", Uuid::new_v4().simple())),
            source: FeatureSource::default(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> &LayerId {
        &self.id
    }

    #[must_use]
    pub const fn source(&self) -> &FeatureSource {
        &self.source
    }
}

impl Default for OverlayLayer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{MapCoordinate, MarkerStyle};

    fn feature(id: &str) -> PointFeature {
        PointFeature {
            id: id.to_string(),
            coordinate: MapCoordinate { x: 1.0, y: 2.0 },
            style: MarkerStyle::default(),
        }
    }

    #[test]
    fn layer_names_are_unique() {
        let a = OverlayLayer::new();
        let b = OverlayLayer::new();
        assert_ne!(a.id(), b.id());
        assert!(a.id().as_str().starts_with(LAYER_PREFIX));
    }

    #[test]
    fn clones_share_the_source() {
        let layer = OverlayLayer::new();
        let shared = layer.clone();
        layer.source().add_feature(feature("a"));
        assert_eq!(shared.source().len(), 1);
        assert_eq!(shared.source().features()[0].id, "a");

        shared.source().clear();
        assert!(layer.source().is_empty());
    }
}
