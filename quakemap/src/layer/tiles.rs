//! Raster tile sources.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

/// Error building a tile url.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TileUrlError {
    /// Requested zoom level is above the source's maximum.
    #[error("zoom level {z} is above the maximum of {max_zoom}")]
    ZoomOutOfRange {
        /// Requested zoom level.
        z: u32,
        /// Maximum zoom level of the source.
        max_zoom: u32,
    },

    /// Row index is outside of the world at the given zoom level.
    #[error("tile row {y} does not exist at zoom level {z}")]
    RowOutOfRange {
        /// Requested row.
        y: i64,
        /// Requested zoom level.
        z: u32,
    },

    /// Template contains an unknown placeholder or is malformed.
    #[error("invalid url template: {0}")]
    Template(String),
}

/// Index of a web mercator tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileIndex {
    /// Column. Wraps around the antimeridian.
    pub x: i64,
    /// Row, top to bottom.
    pub y: i64,
    /// Zoom level.
    pub z: u32,
}

impl TileIndex {
    /// Creates a new index.
    pub const fn new(x: i64, y: i64, z: u32) -> Self {
        Self { x, y, z }
    }
}

/// Remote raster tile source described by a url template.
///
/// Templates use `{z}`, `{x}`, `{y}` and, if the source has subdomains, `{s}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileSource {
    /// Url template.
    pub url_template: &'static str,
    /// Values for the `{s}` placeholder.
    pub subdomains: &'static [&'static str],
    /// Maximum zoom level served.
    pub max_zoom: u32,
    /// Attribution text.
    pub attribution: Option<&'static str>,
}

impl TileSource {
    /// Url of the tile with the given index.
    ///
    /// Columns outside of the world wrap around; rows outside of it and zoom levels above
    /// [`TileSource::max_zoom`] are errors.
    pub fn tile_url(&self, index: TileIndex) -> Result<String, TileUrlError> {
        let TileIndex { x, y, z } = index;
        if z > self.max_zoom {
            return Err(TileUrlError::ZoomOutOfRange {
                z,
                max_zoom: self.max_zoom,
            });
        }

        let tiles_per_side = 1_i64
            .checked_shl(z)
            .ok_or(TileUrlError::ZoomOutOfRange {
                z,
                max_zoom: self.max_zoom,
            })?;
        if !(0..tiles_per_side).contains(&y) {
            return Err(TileUrlError::RowOutOfRange { y, z });
        }
        let x = x.rem_euclid(tiles_per_side);

        let mut vars = HashMap::from([
            ("x".to_string(), x.to_string()),
            ("y".to_string(), y.to_string()),
            ("z".to_string(), z.to_string()),
        ]);
        if !self.subdomains.is_empty() {
            let slot = (x + y).unsigned_abs() as usize % self.subdomains.len();
            let subdomain = self.subdomains[slot];
            vars.insert("s".to_string(), subdomain.to_string());
        }

        strfmt::strfmt(self.url_template, &vars).map_err(|err| {
            log::warn!("Failed to build tile url from {}: {err}", self.url_template);
            TileUrlError::Template(err.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: TileSource = TileSource {
        url_template: "https://{s}.tiles.test/{z}/{x}/{y}.png",
        subdomains: &["a", "b", "c"],
        max_zoom: 18,
        attribution: None,
    };

    #[test]
    fn expands_template() {
        assert_eq!(
            SOURCE.tile_url(TileIndex::new(1, 0, 1)).unwrap(),
            "https://b.tiles.test/1/1/0.png"
        );
        assert_eq!(
            SOURCE.tile_url(TileIndex::new(3, 2, 2)).unwrap(),
            "https://c.tiles.test/2/3/2.png"
        );
    }

    #[test]
    fn wraps_columns() {
        assert_eq!(
            SOURCE.tile_url(TileIndex::new(-1, 0, 2)).unwrap(),
            SOURCE.tile_url(TileIndex::new(3, 0, 2)).unwrap()
        );
        assert_eq!(
            SOURCE.tile_url(TileIndex::new(4, 0, 2)).unwrap(),
            SOURCE.tile_url(TileIndex::new(0, 0, 2)).unwrap()
        );
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            SOURCE.tile_url(TileIndex::new(0, 0, 19)),
            Err(TileUrlError::ZoomOutOfRange { z: 19, max_zoom: 18 })
        );
        assert_eq!(
            SOURCE.tile_url(TileIndex::new(0, 4, 2)),
            Err(TileUrlError::RowOutOfRange { y: 4, z: 2 })
        );
        assert_eq!(
            SOURCE.tile_url(TileIndex::new(0, -1, 2)),
            Err(TileUrlError::RowOutOfRange { y: -1, z: 2 })
        );
    }

    #[test]
    fn template_without_subdomains() {
        let source = TileSource {
            url_template: "https://tiles.test/{z}/{y}/{x}",
            subdomains: &[],
            max_zoom: 16,
            attribution: None,
        };
        assert_eq!(
            source.tile_url(TileIndex::new(5, 6, 4)).unwrap(),
            "https://tiles.test/4/6/5"
        );

        let broken = TileSource {
            url_template: "https://{s}.tiles.test/{z}/{x}/{y}",
            ..source
        };
        assert!(matches!(
            broken.tile_url(TileIndex::new(0, 0, 0)),
            Err(TileUrlError::Template(_))
        ));
    }
}
