//! The composed map and its loading.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use super::controls::{LayerSwitcher, ScaleControl};
use super::legend::Legend;
use super::snapshot::{MapSnapshot, OverlaySnapshot};
use crate::config::{FeedUrls, MapConfig};
use crate::error::QuakeMapError;
use crate::feed::loader::{fetch_events, fetch_plate_boundaries, FeedLoader};
use crate::layer::{
    BaseLayer, BaseLayerKind, EventLayer, OverlayKind, OverlayStatus, PlateBoundaryLayer,
    TileIndex,
};
use crate::normalize::normalize;
use crate::render::{render, LatLon, Marker};

/// Composed map: base layers, overlays and controls.
///
/// The session owns every layer handle. The plate boundary overlay is shared with the task that
/// loads it, which only ever writes into that layer.
pub struct MapSession {
    config: MapConfig,
    base_layers: Vec<BaseLayer>,
    switcher: Mutex<LayerSwitcher>,
    events: EventLayer,
    plates: Arc<PlateBoundaryLayer>,
    legend: Legend,
    scale: ScaleControl,
    plate_task: Mutex<Option<JoinHandle<()>>>,
}

/// Composes the map from rendered markers and a (possibly still empty) plate boundary layer.
pub fn build_map(
    markers: Vec<Marker>,
    plate_boundaries: Arc<PlateBoundaryLayer>,
    config: MapConfig,
) -> MapSession {
    log::info!(
        "Composing map with {} markers at {:?}, zoom {}",
        markers.len(),
        config.center,
        config.zoom
    );

    MapSession {
        config,
        base_layers: BaseLayerKind::ALL.into_iter().map(BaseLayer::new).collect(),
        switcher: Mutex::new(LayerSwitcher::new(config.base_layer)),
        events: EventLayer::new(markers),
        plates: plate_boundaries,
        legend: Legend::depth(),
        scale: ScaleControl::default(),
        plate_task: Mutex::new(None),
    }
}

/// Loads both feeds and composes the map.
///
/// The two feeds are requested independently. The session is returned as soon as the events are
/// rendered; plate boundaries fill their overlay whenever they arrive (see
/// [`MapSession::wait_for_overlays`]). A failure of the events feed is returned as an error. A
/// failure of the plate feed only leaves that overlay empty. Nothing is retried.
pub async fn launch(
    loader: Arc<dyn FeedLoader>,
    feeds: FeedUrls,
    config: MapConfig,
) -> Result<MapSession, QuakeMapError> {
    let plates = Arc::new(PlateBoundaryLayer::default());
    let plate_task = tokio::spawn(load_plate_boundaries(
        loader.clone(),
        feeds.plates,
        plates.clone(),
    ));

    let collection = fetch_events(loader.as_ref(), &feeds.events).await?;
    let normalized = normalize(&collection.features);
    let markers = render(&normalized.records);

    let session = build_map(markers, plates, config);
    *session.plate_task.lock() = Some(plate_task);

    Ok(session)
}

async fn load_plate_boundaries(
    loader: Arc<dyn FeedLoader>,
    url: String,
    layer: Arc<PlateBoundaryLayer>,
) {
    match fetch_plate_boundaries(loader.as_ref(), &url).await {
        Ok(collection) => layer.populate(collection),
        Err(err) => {
            log::warn!("Plate boundaries are not available: {err}");
            layer.mark_failed(err.to_string());
        }
    }
}

impl MapSession {
    /// Initial configuration.
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Viewport center.
    pub fn center(&self) -> LatLon {
        self.config.center
    }

    /// Viewport zoom level.
    pub fn zoom(&self) -> u32 {
        self.config.zoom
    }

    /// All registered base layers.
    pub fn base_layers(&self) -> &[BaseLayer] {
        &self.base_layers
    }

    /// Base layer currently shown.
    pub fn active_base_layer(&self) -> &BaseLayer {
        let kind = self.switcher.lock().active_base();
        self.base_layer(kind)
    }

    fn base_layer(&self, kind: BaseLayerKind) -> &BaseLayer {
        self.base_layers
            .iter()
            .find(|layer| layer.kind == kind)
            .unwrap_or(&self.base_layers[0])
    }

    /// Url of a tile of the active base layer.
    pub fn tile_url(&self, index: TileIndex) -> Result<String, QuakeMapError> {
        Ok(self.active_base_layer().source.tile_url(index)?)
    }

    /// Switches to another base layer, hiding the current one.
    pub fn select_base_layer(&self, kind: BaseLayerKind) {
        let previous = self.switcher.lock().select_base(kind);
        log::debug!("Base layer switched from {previous} to {kind}");
    }

    /// Whether the overlay is shown.
    pub fn is_overlay_visible(&self, kind: OverlayKind) -> bool {
        self.switcher.lock().is_visible(kind)
    }

    /// Shows or hides an overlay.
    pub fn set_overlay_visible(&self, kind: OverlayKind, visible: bool) {
        self.switcher.lock().set_visible(kind, visible);
    }

    /// Flips an overlay's visibility. Returns the new state.
    pub fn toggle_overlay(&self, kind: OverlayKind) -> bool {
        self.switcher.lock().toggle(kind)
    }

    /// Event marker overlay.
    pub fn events(&self) -> &EventLayer {
        &self.events
    }

    /// Plate boundary overlay.
    pub fn plates(&self) -> &PlateBoundaryLayer {
        &self.plates
    }

    /// Loading state of an overlay.
    pub fn overlay_status(&self, kind: OverlayKind) -> OverlayStatus {
        match kind {
            OverlayKind::Earthquakes => OverlayStatus::Loaded {
                features: self.events.len(),
            },
            OverlayKind::TectonicPlates => self.plates.status(),
        }
    }

    /// Depth legend.
    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    /// Scale bar.
    pub fn scale(&self) -> &ScaleControl {
        &self.scale
    }

    /// Waits until the plate boundary overlay has been populated or has failed.
    ///
    /// Safe to call from several places at once; every caller returns once the overlay has
    /// settled. For a session composed with [`build_map`], whoever owns the plate layer must
    /// eventually populate it or mark it as failed.
    pub async fn wait_for_overlays(&self) {
        let task = self.plate_task.lock().take();
        if let Some(task) = task {
            if let Err(err) = task.await {
                log::error!("Plate boundary task did not complete: {err}");
                self.plates.mark_failed(err.to_string());
            }
        }
        self.plates.settled().await;
    }

    /// Description of the currently shown map.
    pub fn snapshot(&self) -> MapSnapshot {
        let switcher = self.switcher.lock().clone();

        let overlays = OverlayKind::ALL
            .into_iter()
            .map(|kind| OverlaySnapshot {
                kind,
                label: kind.label(),
                visible: switcher.is_visible(kind),
                status: self.overlay_status(kind),
            })
            .collect();

        let markers = if switcher.is_visible(OverlayKind::Earthquakes) {
            self.events.markers().to_vec()
        } else {
            Vec::new()
        };
        let plate_boundaries = if switcher.is_visible(OverlayKind::TectonicPlates) {
            self.plates.features()
        } else {
            Vec::new()
        };

        MapSnapshot {
            center: self.center(),
            zoom: self.zoom(),
            base_layer: self.base_layer(switcher.active_base()).clone(),
            layer_switcher: switcher,
            overlays,
            markers,
            plate_boundaries,
            plate_style: self.plates.style(),
            legend: self.legend.clone(),
            legend_html: self.legend.to_html(),
            scale: self.scale,
        }
    }
}
