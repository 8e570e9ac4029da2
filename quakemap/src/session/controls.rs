//! Map controls that hold UI state.

use serde::Serialize;

use crate::layer::{BaseLayerKind, OverlayKind};

/// Screen corner a control is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Corner {
    /// Top left corner.
    TopLeft,
    /// Top right corner.
    TopRight,
    /// Bottom left corner.
    BottomLeft,
    /// Bottom right corner.
    BottomRight,
}

/// Distance scale bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScaleControl {
    /// Where the bar is shown.
    pub position: Corner,
    /// Show kilometers/meters.
    pub metric: bool,
    /// Show miles/feet.
    pub imperial: bool,
    /// Maximum bar width in pixels.
    pub max_width: u32,
}

impl Default for ScaleControl {
    fn default() -> Self {
        Self {
            position: Corner::BottomLeft,
            metric: true,
            imperial: true,
            max_width: 100,
        }
    }
}

/// Layer switcher state: a single selected base layer and a set of visible overlays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerSwitcher {
    /// Where the switcher is shown.
    pub position: Corner,
    /// Whether the switcher starts collapsed into an icon.
    pub collapsed: bool,
    active_base: BaseLayerKind,
    visible_overlays: Vec<OverlayKind>,
}

impl LayerSwitcher {
    /// Creates a switcher with the given base layer and all overlays visible.
    pub fn new(active_base: BaseLayerKind) -> Self {
        Self {
            position: Corner::TopRight,
            collapsed: true,
            active_base,
            visible_overlays: OverlayKind::ALL.to_vec(),
        }
    }

    /// Currently shown base layer.
    pub fn active_base(&self) -> BaseLayerKind {
        self.active_base
    }

    /// Shows the given base layer instead of the current one. Returns the previous one.
    pub fn select_base(&mut self, kind: BaseLayerKind) -> BaseLayerKind {
        std::mem::replace(&mut self.active_base, kind)
    }

    /// Whether the overlay is shown.
    pub fn is_visible(&self, kind: OverlayKind) -> bool {
        self.visible_overlays.contains(&kind)
    }

    /// Shows or hides the overlay. Other overlays are not affected.
    pub fn set_visible(&mut self, kind: OverlayKind, visible: bool) {
        self.visible_overlays.retain(|k| *k != kind);
        if visible {
            self.visible_overlays.push(kind);
            self.visible_overlays
                .sort_by_key(|k| OverlayKind::ALL.iter().position(|o| o == k));
        }
    }

    /// Flips the overlay visibility. Returns the new state.
    pub fn toggle(&mut self, kind: OverlayKind) -> bool {
        let visible = !self.is_visible(kind);
        self.set_visible(kind, visible);
        visible
    }

    /// Visible overlays in switcher order.
    pub fn visible_overlays(&self) -> &[OverlayKind] {
        &self.visible_overlays
    }
}
