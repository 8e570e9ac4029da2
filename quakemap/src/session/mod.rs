//! Layer composition.
//!
//! This module contains the [`MapSession`] and the controls it carries:
//! - the layer switcher (single base layer, independent overlays)
//! - the depth legend
//! - the scale bar
//! - the serializable [`MapSnapshot`] handed to a host widget

pub mod controls;
pub mod legend;
mod map_session;
mod snapshot;

pub use controls::{Corner, LayerSwitcher, ScaleControl};
pub use legend::{Legend, LegendEntry};
pub use map_session::{build_map, launch, MapSession};
pub use snapshot::{MapSnapshot, OverlaySnapshot};
