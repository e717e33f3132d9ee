//! In-memory tile backend.

use super::backend::{BackendState, TileBackend};
use super::{TileDatabaseMetadata, TileStoreError};
use crate::geo::GeoTile;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

/// Tile backend holding every tile in a `HashMap`.
///
/// Used for tests and small embedded datasets. Keys are lowercased on
/// construction.
pub struct MemoryTileBackend {
    tiles: HashMap<String, GeoTile>,
    metadata: Option<TileDatabaseMetadata>,
    state: Mutex<BackendState>,
}

impl MemoryTileBackend {
    pub fn new<I>(tiles: I) -> Self
    where
        I: IntoIterator<Item = GeoTile>,
    {
        let tiles = tiles
            .into_iter()
            .map(|mut tile| {
                tile.geohash = tile.geohash.to_ascii_lowercase();
                (tile.geohash.clone(), tile)
            })
            .collect();

        Self {
            tiles,
            metadata: None,
            state: Mutex::new(BackendState::Uninitialized),
        }
    }

    /// Load tiles from a JSON array of [`GeoTile`] objects.
    pub fn from_json_file(path: &Path) -> Result<Self, TileStoreError> {
        let contents = fs::read_to_string(path)?;
        let tiles: Vec<GeoTile> = serde_json::from_str(&contents).map_err(|e| {
            TileStoreError::InvalidData(format!("{}: {}", path.display(), e))
        })?;
        Ok(Self::new(tiles))
    }

    pub fn with_metadata(mut self, metadata: TileDatabaseMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    fn mark_ready(&self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = BackendState::Ready;
    }
}

impl TileBackend for MemoryTileBackend {
    fn name(&self) -> &str {
        "memory"
    }

    fn initialize(&self) -> Result<(), TileStoreError> {
        self.mark_ready();
        Ok(())
    }

    fn fetch(&self, geohash: &str) -> Result<Option<GeoTile>, TileStoreError> {
        self.mark_ready();
        Ok(self.tiles.get(geohash).cloned())
    }

    fn fetch_many(&self, geohashes: &[String]) -> Result<Vec<GeoTile>, TileStoreError> {
        self.mark_ready();
        Ok(geohashes
            .iter()
            .filter_map(|g| self.tiles.get(g).cloned())
            .collect())
    }

    fn fetch_prefix(&self, prefix: &str) -> Result<Vec<GeoTile>, TileStoreError> {
        self.mark_ready();
        let mut tiles: Vec<GeoTile> = self
            .tiles
            .values()
            .filter(|t| t.geohash.starts_with(prefix))
            .cloned()
            .collect();
        tiles.sort_by(|a, b| a.geohash.cmp(&b.geohash));
        Ok(tiles)
    }

    fn metadata(&self) -> Result<Option<TileDatabaseMetadata>, TileStoreError> {
        Ok(self.metadata.clone())
    }

    fn close(&self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = BackendState::Closed;
    }

    fn state(&self) -> BackendState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
