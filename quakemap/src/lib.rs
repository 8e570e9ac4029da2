//! Quakemap turns a seismic event feed and a tectonic plate boundary feed into a fully
//! described interactive map.
//!
//! The pipeline looks like this:
//!
//! * [`feed`] decodes the raw GeoJSON payloads and loads them through a [`FeedLoader`].
//! * [`normalize()`] converts raw features into [`EventRecord`]s, skipping malformed ones.
//! * [`render()`] turns records into styled [`Marker`]s, using the [`style`] mappings for
//!   radius (magnitude) and color (depth), and attaches a popup to each.
//! * [`build_map`] composes the markers, the plate boundary overlay and the base layers into a
//!   [`MapSession`] that a host map widget can draw through [`MapSession::snapshot`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use quakemap::{launch, FeedUrls, HttpFeedLoader, MapConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), quakemap::QuakeMapError> {
//! let loader = Arc::new(HttpFeedLoader::new()?);
//! let session = launch(loader, FeedUrls::default(), MapConfig::default()).await?;
//! session.wait_for_overlays().await;
//! println!("{} markers", session.events().len());
//! # Ok(())
//! # }
//! ```

pub mod config;
mod error;
pub mod feed;
pub mod layer;
pub mod markup;
pub mod normalize;
pub mod render;
pub mod session;
pub mod style;

pub use config::{FeedUrls, MapConfig};
pub use error::QuakeMapError;
pub use feed::loader::{FeedLoader, FetchError, HttpFeedLoader};
pub use normalize::{normalize, EventRecord, MalformedFeature, Normalized, Timestamp};
pub use render::{render, LatLon, Marker};
pub use session::{build_map, launch, MapSession};
pub use style::{depth_color, marker_radius, Color, StyleSpec};
