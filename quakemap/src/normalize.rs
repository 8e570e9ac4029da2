//! Conversion of raw feed features into event records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::feed::RawFeature;

/// Text shown for a time value that is missing entirely.
pub const INVALID_DATE: &str = "Invalid Date";

/// Point in time of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    /// Successfully parsed instant.
    Valid(DateTime<Utc>),
    /// Value that is not an epoch-millisecond integer. Keeps the literal value, if there was
    /// one, for display.
    Invalid(Option<String>),
}

impl Timestamp {
    /// Parses an epoch-millisecond JSON value.
    ///
    /// Integral floats such as `1.7e12` are accepted; strings, fractions and out of range
    /// values are not.
    pub fn from_epoch_millis(value: Option<&Value>) -> Self {
        let Some(value) = value else {
            return Self::Invalid(None);
        };

        let millis = value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|v| v.fract() == 0.0 && v.abs() < i64::MAX as f64)
                .map(|v| v as i64)
        });

        match millis.and_then(DateTime::<Utc>::from_timestamp_millis) {
            Some(instant) => Self::Valid(instant),
            None => Self::Invalid(Some(literal(value))),
        }
    }

    /// Parsed instant, if valid.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Valid(instant) => Some(*instant),
            Self::Invalid(_) => None,
        }
    }

    /// Whether the value was parsed.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => INVALID_DATE.to_string(),
        other => other.to_string(),
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(instant) => write!(f, "{}", instant.timestamp_millis()),
            Self::Invalid(Some(raw)) => f.write_str(raw),
            Self::Invalid(None) => f.write_str(INVALID_DATE),
        }
    }
}

/// Normalized seismic event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    /// Feed id of the event, if present.
    pub id: Option<String>,
    /// Event title. Empty if the feed did not provide one.
    pub title: String,
    /// Origin time.
    pub timestamp: Timestamp,
    /// Time of the last update.
    pub updated: Timestamp,
    /// Details page. Empty if the feed did not provide one.
    pub url: String,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Magnitude. `None` if the feed reported no magnitude.
    pub magnitude: Option<f64>,
    /// Depth in km. Usually non-negative, but not guaranteed by the feed.
    pub depth_km: f64,
}

/// Reason a feature could not be converted into an [`EventRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedFeature {
    /// Feature has no geometry.
    #[error("feature has no geometry")]
    MissingGeometry,
    /// Geometry has less than `[lon, lat, depth]`.
    #[error("expected 3 coordinates, got {len}")]
    ShortCoordinates {
        /// Number of coordinates present.
        len: usize,
    },
    /// A coordinate is not a number.
    #[error("coordinate #{index} is not a number")]
    InvalidCoordinate {
        /// Position of the coordinate in the array.
        index: usize,
    },
    /// Magnitude is present but not a number.
    #[error("magnitude is not a number")]
    InvalidMagnitude,
}

/// Result of normalizing a batch of features.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    /// Records in input order.
    pub records: Vec<EventRecord>,
    /// Number of malformed features that were skipped.
    pub skipped: usize,
}

/// Converts a single feature.
pub fn normalize_feature(feature: &RawFeature) -> Result<EventRecord, MalformedFeature> {
    let geometry = feature
        .geometry
        .as_ref()
        .ok_or(MalformedFeature::MissingGeometry)?;

    let coordinates = &geometry.coordinates;
    if coordinates.len() < 3 {
        return Err(MalformedFeature::ShortCoordinates {
            len: coordinates.len(),
        });
    }

    // Feed order is [lon, lat, depth]; keep it.
    let mut position = [0.0; 3];
    for (index, (slot, value)) in position.iter_mut().zip(coordinates).enumerate() {
        *slot = value
            .as_f64()
            .ok_or(MalformedFeature::InvalidCoordinate { index })?;
    }
    let [longitude, latitude, depth_km] = position;

    let properties = &feature.properties;
    let magnitude = match &properties.mag {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.as_f64().ok_or(MalformedFeature::InvalidMagnitude)?),
    };

    Ok(EventRecord {
        id: feature.id.as_ref().and_then(event_id),
        title: properties.title.clone().unwrap_or_default(),
        timestamp: Timestamp::from_epoch_millis(properties.time.as_ref()),
        updated: Timestamp::from_epoch_millis(properties.updated.as_ref()),
        url: properties.url.clone().unwrap_or_default(),
        longitude,
        latitude,
        magnitude,
        depth_km,
    })
}

fn event_id(value: &Value) -> Option<String> {
    match value {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Converts features into records, preserving order.
///
/// Malformed features are skipped and counted rather than failing the batch.
pub fn normalize<'a>(features: impl IntoIterator<Item = &'a RawFeature>) -> Normalized {
    let mut normalized = Normalized::default();

    for (index, feature) in features.into_iter().enumerate() {
        match normalize_feature(feature) {
            Ok(record) => normalized.records.push(record),
            Err(err) => {
                log::debug!(
                    "Skipping feature #{index} ({}): {err}",
                    feature
                        .id
                        .as_ref()
                        .and_then(event_id)
                        .unwrap_or_else(|| "no id".to_string())
                );
                normalized.skipped += 1;
            }
        }
    }

    if normalized.skipped > 0 {
        log::warn!(
            "Skipped {} malformed features, {} records normalized",
            normalized.skipped,
            normalized.records.len()
        );
    } else {
        log::debug!("Normalized {} records", normalized.records.len());
    }

    normalized
}
