use std::collections::HashMap;
use std::sync::Arc;

use approx::assert_relative_eq;
use bytes::Bytes;
use quakemap::feed::loader::fetch_events;
use quakemap::layer::{BaseLayerKind, OverlayKind, OverlayStatus};
use quakemap::style::DEPTH_BUCKETS;
use quakemap::{
    build_map, launch, normalize, render, FeedLoader, FeedUrls, FetchError, LatLon, MapConfig,
    QuakeMapError,
};
use tokio::sync::Notify;

const EVENTS_URL: &str = "test://events";
const PLATES_URL: &str = "test://plates";

const EVENTS: &str = include_str!("data/events.geojson");
const MIXED_EVENTS: &str = r#"{"features": [
    {"id": "good1", "properties": {"mag": 3.0}, "geometry": {"coordinates": [10.0, 20.0, 5.0]}},
    {"id": 7, "properties": null, "geometry": {"coordinates": [11.0, 21.0, 45.0]}},
    {"id": "bad", "properties": {"mag": "2.5"}, "geometry": {"coordinates": [12.0, 22.0, 5.0]}},
    {"id": "bad", "properties": {"mag": 1.0}, "geometry": {"coordinates": [13.0, null, 5.0]}},
    {"id": "good2", "properties": {"mag": 4.0}, "geometry": {"coordinates": [14.0, 24.0, 95.0]}}
]}"#;
const PLATES: &str = include_str!("data/plates.geojson");

/// Serves canned bodies. Unknown urls fail like an unreachable server. Gated urls wait for
/// their gate to be opened.
#[derive(Default)]
struct CannedLoader {
    bodies: HashMap<&'static str, &'static str>,
    gates: HashMap<&'static str, Arc<Notify>>,
}

impl CannedLoader {
    fn with(mut self, url: &'static str, body: &'static str) -> Self {
        self.bodies.insert(url, body);
        self
    }

    fn gated(mut self, url: &'static str, gate: Arc<Notify>) -> Self {
        self.gates.insert(url, gate);
        self
    }
}

#[async_trait::async_trait]
impl FeedLoader for CannedLoader {
    async fn load(&self, url: &str) -> Result<Bytes, FetchError> {
        if let Some(gate) = self.gates.get(url) {
            gate.notified().await;
        }

        self.bodies
            .get(url)
            .copied()
            .map(|body| Bytes::from_static(body.as_bytes()))
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 503,
            })
    }
}

fn feeds() -> FeedUrls {
    FeedUrls {
        events: EVENTS_URL.to_string(),
        plates: PLATES_URL.to_string(),
    }
}

#[tokio::test]
async fn normalizes_and_renders_feed() {
    let loader = CannedLoader::default().with(EVENTS_URL, EVENTS);
    let collection = fetch_events(&loader, EVENTS_URL).await.unwrap();
    assert_eq!(collection.features.len(), 4);

    let normalized = normalize(&collection.features);
    assert_eq!(normalized.records.len(), 3);
    assert_eq!(normalized.skipped, 1);

    let ids: Vec<_> = normalized
        .records
        .iter()
        .map(|r| r.id.as_deref().unwrap())
        .collect();
    assert_eq!(ids, ["tx2023abcd", "us7000deep", "nc0000time"]);

    let markers = render(&normalized.records);
    assert_eq!(markers.len(), 3);

    let shallow = &markers[0];
    assert_eq!(shallow.position, LatLon::new(29.7, -95.3));
    assert_relative_eq!(shallow.style.radius, 12500.0);
    assert_eq!(shallow.style.fill_color, DEPTH_BUCKETS[1].color);

    let deep = &markers[1];
    assert_eq!(deep.position, LatLon::new(0.0, 0.0));
    assert_relative_eq!(deep.style.radius, 30000.0);
    assert_eq!(deep.style.fill_color, DEPTH_BUCKETS[5].color);

    let bad_time = &markers[2];
    assert_eq!(bad_time.style.fill_color, DEPTH_BUCKETS[0].color);
    let text = bad_time.popup.text();
    assert!(text.contains("Time: unknown"), "{text}");
    assert!(text.contains("Updated: Invalid Date"), "{text}");
}

#[tokio::test]
async fn badly_typed_records_are_skipped_not_fatal() {
    let loader = CannedLoader::default()
        .with(EVENTS_URL, MIXED_EVENTS)
        .with(PLATES_URL, PLATES);

    let session = launch(Arc::new(loader), feeds(), MapConfig::default())
        .await
        .unwrap();

    let markers = session.events().markers();
    let ids: Vec<_> = markers.iter().map(|m| m.id.as_deref().unwrap()).collect();
    assert_eq!(ids, ["good1", "7", "good2"]);

    let no_magnitude = &markers[1];
    assert_relative_eq!(no_magnitude.style.radius, 0.0);
    assert_eq!(no_magnitude.style.fill_color, DEPTH_BUCKETS[2].color);
    assert!(no_magnitude.popup.text().contains("Magnitude: unknown"));
}

#[tokio::test]
async fn composes_full_map() {
    let loader = CannedLoader::default()
        .with(EVENTS_URL, EVENTS)
        .with(PLATES_URL, PLATES);

    let session = launch(Arc::new(loader), feeds(), MapConfig::default())
        .await
        .unwrap();
    session.wait_for_overlays().await;

    assert_eq!(session.events().len(), 3);
    assert_eq!(session.plates().len(), 3);
    assert_eq!(
        session.overlay_status(OverlayKind::TectonicPlates),
        OverlayStatus::Loaded { features: 3 }
    );

    let snapshot = session.snapshot();
    assert_eq!(snapshot.base_layer.kind, BaseLayerKind::Street);
    assert_eq!(snapshot.markers.len(), 3);
    assert_eq!(snapshot.plate_boundaries.len(), 3);
    assert_eq!(snapshot.legend.entries().len(), 6);
    assert_eq!(snapshot.zoom, 5);

    let json: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
    assert_eq!(json["markers"][0]["style"]["fill_color"], "#adff2f");
    assert_eq!(json["markers"][0]["position"]["lat"], 29.7);
    assert_eq!(json["overlays"][1]["status"]["state"], "loaded");
    assert_eq!(json["scale"]["position"], "bottomleft");
}

#[tokio::test]
async fn plate_failure_is_not_fatal() {
    let loader = CannedLoader::default().with(EVENTS_URL, EVENTS);

    let session = launch(Arc::new(loader), feeds(), MapConfig::default())
        .await
        .unwrap();
    session.wait_for_overlays().await;

    assert_eq!(session.events().len(), 3);
    assert!(session.plates().is_empty());
    assert!(matches!(
        session.plates().status(),
        OverlayStatus::Failed { .. }
    ));
    assert!(session.is_overlay_visible(OverlayKind::TectonicPlates));

    session.select_base_layer(BaseLayerKind::Satellite);
    assert_eq!(session.active_base_layer().kind, BaseLayerKind::Satellite);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.markers.len(), 3);
    assert!(snapshot.plate_boundaries.is_empty());
}

#[tokio::test]
async fn events_failure_is_fatal() {
    let loader = CannedLoader::default().with(PLATES_URL, PLATES);

    let result = launch(Arc::new(loader), feeds(), MapConfig::default()).await;
    assert!(matches!(
        result,
        Err(QuakeMapError::Fetch(FetchError::Status { status: 503, .. }))
    ));
}

#[tokio::test]
async fn map_is_usable_before_plates_arrive() {
    let gate = Arc::new(Notify::new());
    let loader = CannedLoader::default()
        .with(EVENTS_URL, EVENTS)
        .with(PLATES_URL, PLATES)
        .gated(PLATES_URL, gate.clone());

    let session = launch(Arc::new(loader), feeds(), MapConfig::default())
        .await
        .unwrap();

    assert_eq!(session.events().len(), 3);
    assert_eq!(session.plates().status(), OverlayStatus::Pending);
    assert!(session.snapshot().plate_boundaries.is_empty());

    gate.notify_one();
    session.wait_for_overlays().await;

    assert_eq!(session.plates().len(), 3);
    assert_eq!(session.snapshot().plate_boundaries.len(), 3);
}

#[test]
fn empty_event_set_keeps_legend() {
    let session = build_map(Vec::new(), Default::default(), MapConfig::default());
    let labels: Vec<_> = session
        .legend()
        .entries()
        .iter()
        .map(|entry| entry.range_label)
        .collect();
    assert_eq!(labels, ["-10-10", "10-30", "30-50", "50-70", "70-90", "90+"]);
    assert!(session.snapshot().markers.is_empty());
}

#[tokio::test]
async fn hidden_overlays_are_left_out_of_snapshot() {
    let loader = CannedLoader::default()
        .with(EVENTS_URL, EVENTS)
        .with(PLATES_URL, PLATES);
    let session = launch(Arc::new(loader), feeds(), MapConfig::default())
        .await
        .unwrap();
    session.wait_for_overlays().await;

    session.set_overlay_visible(OverlayKind::Earthquakes, false);
    let snapshot = session.snapshot();
    assert!(snapshot.markers.is_empty());
    assert_eq!(snapshot.plate_boundaries.len(), 3);

    assert!(session.toggle_overlay(OverlayKind::Earthquakes));
    assert!(!session.toggle_overlay(OverlayKind::TectonicPlates));
    let snapshot = session.snapshot();
    assert_eq!(snapshot.markers.len(), 3);
    assert!(snapshot.plate_boundaries.is_empty());
}
