//! Build-time configuration of the map.
//!
//! There is no runtime configuration surface. The defaults below are what the map is built
//! with; tests and embedders may construct the structs with other values.

use crate::layer::base::BaseLayerKind;
use crate::render::LatLon;

/// USGS feed of all events of the past month.
pub const EVENTS_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_month.geojson";

/// PB2002 plate boundaries.
pub const PLATES_FEED_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";

/// Initial map center (Houston, TX).
pub const DEFAULT_CENTER: LatLon = LatLon::new(29.749907, -95.358421);

/// Initial zoom level.
pub const DEFAULT_ZOOM: u32 = 5;

/// Locations of the two feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedUrls {
    /// Seismic events GeoJSON feed.
    pub events: String,
    /// Tectonic plate boundaries GeoJSON feed.
    pub plates: String,
}

impl Default for FeedUrls {
    fn default() -> Self {
        Self {
            events: EVENTS_FEED_URL.to_string(),
            plates: PLATES_FEED_URL.to_string(),
        }
    }
}

/// Initial state of a map session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    /// Center of the initial viewport.
    pub center: LatLon,
    /// Zoom level of the initial viewport.
    pub zoom: u32,
    /// Base layer selected on load.
    pub base_layer: BaseLayerKind,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            base_layer: BaseLayerKind::Street,
        }
    }
}
