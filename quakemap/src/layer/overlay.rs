//! Data overlays drawn above the base layer.

use std::fmt;

use geojson::{Feature, FeatureCollection};
use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::Notify;

use crate::render::Marker;
use crate::style::Color;

/// Data layers drawn over the base layer. Each one is toggled independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OverlayKind {
    /// Seismic event markers.
    Earthquakes,
    /// Tectonic plate boundary lines.
    TectonicPlates,
}

impl OverlayKind {
    /// All overlays in switcher order.
    pub const ALL: [OverlayKind; 2] = [OverlayKind::Earthquakes, OverlayKind::TectonicPlates];

    /// Name shown in the layer switcher.
    pub fn label(self) -> &'static str {
        match self {
            OverlayKind::Earthquakes => "Earthquakes",
            OverlayKind::TectonicPlates => "Tectonic Plates",
        }
    }
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Layer of event markers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLayer {
    markers: Vec<Marker>,
}

impl EventLayer {
    /// Creates a layer with the given markers.
    pub fn new(markers: Vec<Marker>) -> Self {
        Self { markers }
    }

    /// Markers in feed order.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Number of markers.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether the layer has no markers.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// Stroke of plate boundary lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineStyle {
    /// Line color.
    pub color: Color,
    /// Line width in pixels.
    pub weight: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::ORANGE,
            weight: 2.0,
        }
    }
}

/// Loading state of an asynchronously populated overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OverlayStatus {
    /// Data has not arrived yet.
    Pending,
    /// Data arrived.
    Loaded {
        /// Number of features in the layer.
        features: usize,
    },
    /// Data could not be loaded. The layer stays empty.
    Failed {
        /// Why loading failed.
        reason: String,
    },
}

#[derive(Debug)]
struct PlateState {
    features: Vec<Feature>,
    status: OverlayStatus,
}

/// Layer of tectonic plate boundaries.
///
/// The layer exists from the start and is filled in place once its feed resolves. Features are
/// drawn as they come, without per-feature transformation.
#[derive(Debug)]
pub struct PlateBoundaryLayer {
    state: RwLock<PlateState>,
    style: LineStyle,
    settled: Notify,
}

impl Default for PlateBoundaryLayer {
    fn default() -> Self {
        Self::new(LineStyle::default())
    }
}

impl PlateBoundaryLayer {
    /// Creates an empty, pending layer.
    pub fn new(style: LineStyle) -> Self {
        Self {
            state: RwLock::new(PlateState {
                features: Vec::new(),
                status: OverlayStatus::Pending,
            }),
            style,
            settled: Notify::new(),
        }
    }

    /// Line style.
    pub fn style(&self) -> LineStyle {
        self.style
    }

    /// Fills the layer with the loaded boundaries.
    pub fn populate(&self, collection: FeatureCollection) {
        {
            let mut state = self.state.write();
            state.status = OverlayStatus::Loaded {
                features: collection.features.len(),
            };
            state.features = collection.features;
        }
        self.settled.notify_waiters();
    }

    /// Marks the layer as failed. Any previously loaded features are kept.
    pub fn mark_failed(&self, reason: impl Into<String>) {
        self.state.write().status = OverlayStatus::Failed {
            reason: reason.into(),
        };
        self.settled.notify_waiters();
    }

    /// Waits until the layer is no longer [`OverlayStatus::Pending`].
    ///
    /// Any number of callers may wait at the same time. If nothing ever populates the layer or
    /// marks it as failed, this never returns.
    pub async fn settled(&self) {
        loop {
            // Registered before the check so that a notification in between is not lost.
            let notified = self.settled.notified();
            if self.status() != OverlayStatus::Pending {
                return;
            }
            notified.await;
        }
    }

    /// Current loading state.
    pub fn status(&self) -> OverlayStatus {
        self.state.read().status.clone()
    }

    /// Number of boundary features.
    pub fn len(&self) -> usize {
        self.state.read().features.len()
    }

    /// Whether the layer has no features.
    pub fn is_empty(&self) -> bool {
        self.state.read().features.is_empty()
    }

    /// Copy of the boundary features.
    pub fn features(&self) -> Vec<Feature> {
        self.state.read().features.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLATES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"Name": "AF-AN", "PlateA": "AF", "PlateB": "AN"},
                "geometry": {"type": "LineString", "coordinates": [[-0.4, -54.8], [0.0, -54.5]]}
            },
            {
                "type": "Feature",
                "properties": {"Name": "AN-AF"},
                "geometry": {"type": "LineString", "coordinates": [[1.0, -54.0], [2.0, -53.0]]}
            }
        ]
    }"#;

    #[test]
    fn populates_in_place() {
        let layer = PlateBoundaryLayer::default();
        assert_eq!(layer.status(), OverlayStatus::Pending);
        assert!(layer.is_empty());

        layer.populate(PLATES.parse().unwrap());
        assert_eq!(layer.status(), OverlayStatus::Loaded { features: 2 });
        assert_eq!(layer.len(), 2);
        assert_eq!(layer.style().color, Color::ORANGE);
    }

    #[test]
    fn failure_leaves_layer_empty() {
        let layer = PlateBoundaryLayer::default();
        layer.mark_failed("connection refused");

        assert!(layer.is_empty());
        assert_eq!(
            layer.status(),
            OverlayStatus::Failed {
                reason: "connection refused".to_string()
            }
        );
    }

    #[tokio::test]
    async fn every_waiter_sees_the_layer_settle() {
        let layer = PlateBoundaryLayer::default();
        let fill = async {
            tokio::task::yield_now().await;
            layer.populate(PLATES.parse().unwrap());
        };

        tokio::join!(layer.settled(), layer.settled(), fill);
        assert_eq!(layer.status(), OverlayStatus::Loaded { features: 2 });

        // Already settled: returns at once.
        layer.mark_failed("gone");
        layer.settled().await;
    }

    #[test]
    fn overlay_labels() {
        assert_eq!(OverlayKind::TectonicPlates.to_string(), "Tectonic Plates");
        assert!(EventLayer::default().is_empty());
    }
}
