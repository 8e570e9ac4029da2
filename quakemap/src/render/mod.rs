//! Conversion of event records into map markers.

use serde::Serialize;

use crate::normalize::EventRecord;
use crate::style::{style_for, StyleSpec};

mod popup;
pub mod time_format;

pub use popup::{Popup, PopupBuilder, UNKNOWN_LOCATION};

/// Geographic position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl LatLon {
    /// Creates a new position.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Filled circle representing one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Event id, if the feed had one.
    pub id: Option<String>,
    /// Circle center.
    pub position: LatLon,
    /// Circle appearance.
    pub style: StyleSpec,
    /// Info popup shown on click.
    pub popup: Popup,
}

impl Marker {
    /// Marker for the record.
    pub fn for_record(record: &EventRecord) -> Self {
        Self {
            id: record.id.clone(),
            position: LatLon::new(record.latitude, record.longitude),
            style: style_for(record),
            popup: Popup::for_record(record),
        }
    }
}

/// Renders one marker per record, in the same order.
pub fn render(records: &[EventRecord]) -> Vec<Marker> {
    let markers: Vec<Marker> = records.iter().map(Marker::for_record).collect();
    log::debug!("Rendered {} markers", markers.len());
    markers
}
