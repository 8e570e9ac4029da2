//! Crate level error type.

use thiserror::Error;

use crate::feed::loader::FetchError;
use crate::layer::tiles::TileUrlError;

/// Error returned by the top level operations of the crate.
#[derive(Debug, Error)]
pub enum QuakeMapError {
    /// One of the feeds could not be fetched or decoded.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Tile url could not be built.
    #[error(transparent)]
    TileUrl(#[from] TileUrlError),
}
