//! Tile backend trait definition.

use super::{TileDatabaseMetadata, TileStoreError};
use crate::geo::GeoTile;
use std::fmt;

/// Lifecycle of a tile backend.
///
/// `Uninitialized → Opening → Ready → Closed`, and from `Closed` back to
/// `Opening` when a lookup or [`TileBackend::initialize`] runs again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendState {
    Uninitialized,
    Opening,
    Ready,
    Closed,
}

impl fmt::Display for BackendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendState::Uninitialized => write!(f, "uninitialized"),
            BackendState::Opening => write!(f, "opening"),
            BackendState::Ready => write!(f, "ready"),
            BackendState::Closed => write!(f, "closed"),
        }
    }
}

/// Raw read-only access to a tile dataset.
///
/// Implementations are interchangeable behind [`TileStore`](super::TileStore),
/// which adds caching and turns every error into "no tile". Lookups on an
/// uninitialized or closed backend open it lazily.
///
/// Keys passed in are canonical (lowercase) geohashes.
pub trait TileBackend: Send + Sync {
    /// Short name for logs (e.g. "sqlite", "memory").
    fn name(&self) -> &str;

    /// Open the dataset if needed. Idempotent.
    fn initialize(&self) -> Result<(), TileStoreError>;

    /// Fetch the tile stored under exactly `geohash`.
    fn fetch(&self, geohash: &str) -> Result<Option<GeoTile>, TileStoreError>;

    /// Fetch every stored tile among `geohashes`, in any order.
    fn fetch_many(&self, geohashes: &[String]) -> Result<Vec<GeoTile>, TileStoreError>;

    /// Fetch all tiles whose geohash starts with `prefix`, ordered by geohash.
    fn fetch_prefix(&self, prefix: &str) -> Result<Vec<GeoTile>, TileStoreError>;

    /// Build provenance of the dataset, if recorded.
    fn metadata(&self) -> Result<Option<TileDatabaseMetadata>, TileStoreError> {
        Ok(None)
    }

    /// Release resources. Idempotent; `initialize` may run again afterwards.
    fn close(&self);

    fn state(&self) -> BackendState;
}
