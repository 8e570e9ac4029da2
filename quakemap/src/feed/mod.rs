//! Schema of the seismic event feed.
//!
//! Only the fields the map uses are declared. Every field of a feature is lenient: a missing or
//! badly typed value decodes as absent (or is kept as raw JSON) instead of failing the whole
//! collection. Whether a feature is usable is decided by [`normalize`](crate::normalize()).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub mod loader;

/// GeoJSON feature collection returned by the events feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFeatureCollection {
    /// Feed metadata.
    #[serde(default, deserialize_with = "or_default")]
    pub metadata: FeedMetadata,
    /// Event features.
    #[serde(default, deserialize_with = "features")]
    pub features: Vec<RawFeature>,
}

/// `metadata` block of the events feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedMetadata {
    /// Number of features as reported by the feed.
    #[serde(default, deserialize_with = "or_default")]
    pub count: Option<u64>,
    /// Human readable feed title.
    #[serde(default, deserialize_with = "or_default")]
    pub title: Option<String>,
    /// Generation time, epoch milliseconds.
    #[serde(default, deserialize_with = "or_default")]
    pub generated: Option<i64>,
}

/// A single event feature.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFeature {
    /// Event id. GeoJSON allows both strings and numbers.
    #[serde(default)]
    pub id: Option<Value>,
    /// Point geometry `[lon, lat, depth_km]`.
    #[serde(default, deserialize_with = "or_default")]
    pub geometry: Option<RawGeometry>,
    /// Event properties. `null` is the same as no properties.
    #[serde(default, deserialize_with = "or_default")]
    pub properties: RawProperties,
}

/// Geometry of an event feature.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGeometry {
    /// Positional coordinates: longitude, latitude, depth in km. Kept untyped; each value is
    /// checked when the feature is normalized.
    #[serde(default, deserialize_with = "or_default")]
    pub coordinates: Vec<Value>,
}

/// Properties of an event feature.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProperties {
    /// Magnitude. Expected to be a number, `null` for events without one.
    #[serde(default)]
    pub mag: Option<Value>,
    /// Title, e.g. `M 2.5 - 10 km SW of Somewhere`.
    #[serde(default, deserialize_with = "or_default")]
    pub title: Option<String>,
    /// Origin time. Expected to be epoch milliseconds, kept untyped so that bad values can be
    /// reported instead of failing the decode.
    #[serde(default)]
    pub time: Option<Value>,
    /// Time of the last update, same representation as `time`.
    #[serde(default)]
    pub updated: Option<Value>,
    /// Event details page.
    #[serde(default, deserialize_with = "or_default")]
    pub url: Option<String>,
}

impl RawFeatureCollection {
    /// Decodes the collection from the feed body.
    ///
    /// Fails only if the body is not JSON or `features` is not an array.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// Decodes `T`, falling back to its default if the value has another shape.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

fn features<'de, D>(deserializer: D) -> Result<Vec<RawFeature>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|value| RawFeature::deserialize(value).unwrap_or_default())
        .collect())
}
