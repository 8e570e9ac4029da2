//! Background map layers.

use std::fmt;

use serde::Serialize;

use super::tiles::TileSource;

const OSM: TileSource = TileSource {
    url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
    subdomains: &["a", "b", "c"],
    max_zoom: 18,
    attribution: Some("&copy; OpenStreetMap contributors"),
};

const GOOGLE_SATELLITE: TileSource = TileSource {
    url_template: "https://{s}.google.com/vt/lyrs=s&x={x}&y={y}&z={z}",
    subdomains: &["mt0", "mt1", "mt2", "mt3"],
    max_zoom: 20,
    attribution: None,
};

const GOOGLE_TERRAIN: TileSource = TileSource {
    url_template: "https://{s}.google.com/vt/lyrs=p&x={x}&y={y}&z={z}",
    subdomains: &["mt0", "mt1", "mt2", "mt3"],
    max_zoom: 20,
    attribution: None,
};

const ESRI_LIGHT_GRAY: TileSource = TileSource {
    url_template: "https://server.arcgisonline.com/ArcGIS/rest/services/Canvas/World_Light_Gray_Base/MapServer/tile/{z}/{y}/{x}",
    subdomains: &[],
    max_zoom: 16,
    attribution: Some("Tiles &copy; Esri, DeLorme, NAVTEQ"),
};

/// Background map choices. Exactly one is shown at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BaseLayerKind {
    /// OpenStreetMap street map.
    Street,
    /// Satellite imagery.
    Satellite,
    /// Terrain relief.
    Terrain,
    /// Light gray canvas.
    Grayscale,
}

impl BaseLayerKind {
    /// All base layers in switcher order.
    pub const ALL: [BaseLayerKind; 4] = [
        BaseLayerKind::Street,
        BaseLayerKind::Satellite,
        BaseLayerKind::Terrain,
        BaseLayerKind::Grayscale,
    ];

    /// Name shown in the layer switcher.
    pub fn label(self) -> &'static str {
        match self {
            BaseLayerKind::Street => "Street",
            BaseLayerKind::Satellite => "Satellite",
            BaseLayerKind::Terrain => "Terrain",
            BaseLayerKind::Grayscale => "Grayscale",
        }
    }

    /// Tile source of the layer.
    pub fn tile_source(self) -> TileSource {
        match self {
            BaseLayerKind::Street => OSM,
            BaseLayerKind::Satellite => GOOGLE_SATELLITE,
            BaseLayerKind::Terrain => GOOGLE_TERRAIN,
            BaseLayerKind::Grayscale => ESRI_LIGHT_GRAY,
        }
    }
}

impl fmt::Display for BaseLayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raster tile background layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseLayer {
    /// Which background this is.
    pub kind: BaseLayerKind,
    /// Where tiles come from.
    pub source: TileSource,
}

impl BaseLayer {
    /// Creates the layer of the given kind.
    pub fn new(kind: BaseLayerKind) -> Self {
        Self {
            kind,
            source: kind.tile_source(),
        }
    }
}
