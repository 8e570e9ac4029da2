//! Magnitude and depth to visual mappings.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::normalize::EventRecord;

/// Meters of circle radius per unit of magnitude.
pub const RADIUS_SCALE: f64 = 5000.0;

/// Color with a CSS name, stored as RGBA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    name: &'static str,
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Color {
    /// Lime green (`#32cd32`).
    pub const LIME_GREEN: Color = Color::named("limegreen", 0x32, 0xcd, 0x32);
    /// Green yellow (`#adff2f`).
    pub const GREEN_YELLOW: Color = Color::named("greenyellow", 0xad, 0xff, 0x2f);
    /// Yellow (`#ffff00`).
    pub const YELLOW: Color = Color::named("yellow", 0xff, 0xff, 0x00);
    /// Orange (`#ffa500`).
    pub const ORANGE: Color = Color::named("orange", 0xff, 0xa5, 0x00);
    /// Orange red (`#ff4500`).
    pub const ORANGE_RED: Color = Color::named("orangered", 0xff, 0x45, 0x00);
    /// Red (`#ff0000`).
    pub const RED: Color = Color::named("red", 0xff, 0x00, 0x00);
    /// Black (`#000000`).
    pub const BLACK: Color = Color::named("black", 0x00, 0x00, 0x00);

    const fn named(name: &'static str, r: u8, g: u8, b: u8) -> Self {
        Self {
            name,
            r,
            g,
            b,
            a: 255,
        }
    }

    /// CSS color name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// RGBA components.
    pub fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Hex notation, e.g. `#32cd32`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// One of the six depth ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthBucket {
    /// Exclusive upper depth in km, `None` for the last bucket.
    pub upper_km: Option<f64>,
    /// Fill color of markers in this bucket.
    pub color: Color,
    /// Label shown in the legend.
    pub label: &'static str,
}

const fn bucket(upper_km: Option<f64>, color: Color, label: &'static str) -> DepthBucket {
    DepthBucket {
        upper_km,
        color,
        label,
    }
}

/// Depth buckets in ascending order. Markers and the legend both read this table.
pub const DEPTH_BUCKETS: [DepthBucket; 6] = [
    bucket(Some(10.0), Color::LIME_GREEN, "-10-10"),
    bucket(Some(30.0), Color::GREEN_YELLOW, "10-30"),
    bucket(Some(50.0), Color::YELLOW, "30-50"),
    bucket(Some(70.0), Color::ORANGE, "50-70"),
    bucket(Some(90.0), Color::ORANGE_RED, "70-90"),
    bucket(None, Color::RED, "90+"),
];

/// Circle radius in meters for the given magnitude.
///
/// Not clamped: zero or negative magnitudes give degenerate circles.
pub fn marker_radius(magnitude: f64) -> f64 {
    magnitude * RADIUS_SCALE
}

/// Index into [`DEPTH_BUCKETS`] for the given depth.
///
/// Thresholds are compared with strict `<`, so a depth equal to a threshold belongs to the
/// next bucket. Anything that is not below any threshold (including NaN) is the last bucket.
pub fn depth_bucket(depth_km: f64) -> usize {
    DEPTH_BUCKETS
        .iter()
        .position(|bucket| bucket.upper_km.is_some_and(|upper| depth_km < upper))
        .unwrap_or(DEPTH_BUCKETS.len() - 1)
}

/// Fill color for the given depth.
pub fn depth_color(depth_km: f64) -> Color {
    DEPTH_BUCKETS[depth_bucket(depth_km)].color
}

/// Visual parameters of one event marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StyleSpec {
    /// Circle radius in meters.
    pub radius: f64,
    /// Fill color.
    pub fill_color: Color,
    /// Outline color.
    pub stroke_color: Color,
    /// Fill opacity in `0..=1`.
    pub fill_opacity: f32,
    /// Outline width in pixels.
    pub stroke_weight: f32,
}

impl StyleSpec {
    /// Style for a marker of the given magnitude and depth.
    pub fn new(magnitude: f64, depth_km: f64) -> Self {
        Self {
            radius: marker_radius(magnitude),
            fill_color: depth_color(depth_km),
            stroke_color: Color::BLACK,
            fill_opacity: 0.8,
            stroke_weight: 0.5,
        }
    }
}

/// Style for the record's marker. Events without a magnitude get a zero radius.
pub fn style_for(record: &EventRecord) -> StyleSpec {
    StyleSpec::new(record.magnitude.unwrap_or(0.0), record.depth_km)
}
