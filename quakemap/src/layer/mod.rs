//! Map layers: raster tile backgrounds and data overlays.

pub mod base;
mod overlay;
pub mod tiles;

pub use base::{BaseLayer, BaseLayerKind};
pub use overlay::{EventLayer, LineStyle, OverlayKind, OverlayStatus, PlateBoundaryLayer};
pub use tiles::{TileIndex, TileSource, TileUrlError};
