//! Serializable description of what the map currently shows.

use geojson::Feature;
use serde::Serialize;

use super::controls::{LayerSwitcher, ScaleControl};
use super::legend::Legend;
use crate::layer::{BaseLayer, LineStyle, OverlayKind, OverlayStatus};
use crate::render::{LatLon, Marker};

/// Everything a host map widget needs to draw the current state of a
/// [`MapSession`](super::MapSession).
#[derive(Debug, Clone, Serialize)]
pub struct MapSnapshot {
    /// Viewport center.
    pub center: LatLon,
    /// Viewport zoom level.
    pub zoom: u32,
    /// Base layer being shown.
    pub base_layer: BaseLayer,
    /// Layer switcher state.
    pub layer_switcher: LayerSwitcher,
    /// State of each overlay.
    pub overlays: Vec<OverlaySnapshot>,
    /// Event markers, empty if the overlay is hidden.
    pub markers: Vec<Marker>,
    /// Plate boundaries, empty if the overlay is hidden or not loaded.
    pub plate_boundaries: Vec<Feature>,
    /// Stroke of plate boundaries.
    pub plate_style: LineStyle,
    /// Depth legend.
    pub legend: Legend,
    /// Legend as HTML.
    pub legend_html: String,
    /// Scale bar.
    pub scale: ScaleControl,
}

/// State of one overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlaySnapshot {
    /// Which overlay.
    pub kind: OverlayKind,
    /// Switcher label.
    pub label: &'static str,
    /// Whether it is shown.
    pub visible: bool,
    /// Loading state.
    pub status: OverlayStatus,
}

impl MapSnapshot {
    /// Serializes the snapshot as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
