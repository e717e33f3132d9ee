//! Caching, error-swallowing tile store.

use super::backend::{BackendState, TileBackend};
use super::cache::{TileCache, TileCacheStats};
use super::{MemoryTileBackend, SqliteConfig, SqliteTileBackend, TileDatabaseMetadata};
use crate::geo::GeoTile;
use crate::geohash;
use crate::log::Logger;
use crate::{log_debug, log_warn};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Geohash → tile lookups.
///
/// Results, including misses, are memoized. Backend errors are logged and
/// reported as "no tile" without being memoized, so a later call can recover
/// once the backend is reachable again.
pub struct TileStore {
    backend: Box<dyn TileBackend>,
    cache: TileCache,
    logger: Arc<dyn Logger>,
}

impl TileStore {
    pub fn new<B>(backend: B, cache_capacity: usize, logger: Arc<dyn Logger>) -> Self
    where
        B: TileBackend + 'static,
    {
        Self {
            backend: Box::new(backend),
            cache: TileCache::new(cache_capacity),
            logger,
        }
    }

    /// Store over a SQLite tile database.
    pub fn sqlite(config: SqliteConfig, cache_capacity: usize, logger: Arc<dyn Logger>) -> Self {
        Self::new(SqliteTileBackend::new(config), cache_capacity, logger)
    }

    /// Store over in-memory tiles.
    pub fn in_memory<I>(tiles: I, logger: Arc<dyn Logger>) -> Self
    where
        I: IntoIterator<Item = GeoTile>,
    {
        Self::new(
            MemoryTileBackend::new(tiles),
            super::DEFAULT_CACHE_CAPACITY,
            logger,
        )
    }

    /// Open the backend now rather than on first lookup.
    ///
    /// Returns whether the backend is ready. Idempotent.
    pub fn initialize(&self) -> bool {
        match self.backend.initialize() {
            Ok(()) => {
                log_debug!(self.logger, "Tile store ready ({})", self.backend.name());
                true
            }
            Err(e) => {
                log_warn!(
                    self.logger,
                    "Tile store ({}) failed to initialize: {}",
                    self.backend.name(),
                    e
                );
                false
            }
        }
    }

    /// Tile stored under exactly `geohash`, if any.
    pub fn get_tile(&self, geohash: &str) -> Option<GeoTile> {
        let key = geohash::canonical(geohash);
        if key.is_empty() {
            return None;
        }
        if let Some(memoized) = self.cache.get(&key) {
            return memoized;
        }

        match self.backend.fetch(&key) {
            Ok(tile) => {
                self.cache.insert(key, tile.clone());
                tile
            }
            Err(e) => {
                log_warn!(self.logger, "Tile lookup for '{}' failed: {}", key, e);
                None
            }
        }
    }

    /// Known tiles among `geohashes`, in input order with duplicates collapsed.
    ///
    /// Cache misses are fetched from the backend in one batch.
    pub fn get_tiles(&self, geohashes: &[String]) -> Vec<GeoTile> {
        let mut order = Vec::with_capacity(geohashes.len());
        let mut seen = HashSet::with_capacity(geohashes.len());
        let mut found: HashMap<String, GeoTile> = HashMap::new();
        let mut misses = Vec::new();

        for geohash in geohashes {
            let key = geohash::canonical(geohash);
            if key.is_empty() || !seen.insert(key.clone()) {
                continue;
            }
            order.push(key.clone());
            match self.cache.get(&key) {
                Some(Some(tile)) => {
                    found.insert(key, tile);
                }
                Some(None) => {}
                None => misses.push(key),
            }
        }

        if !misses.is_empty() {
            match self.backend.fetch_many(&misses) {
                Ok(tiles) => {
                    let mut fetched: HashMap<String, GeoTile> = tiles
                        .into_iter()
                        .map(|t| (geohash::canonical(&t.geohash), t))
                        .collect();
                    for key in misses {
                        let tile = fetched.remove(&key);
                        self.cache.insert(key.clone(), tile.clone());
                        if let Some(tile) = tile {
                            found.insert(key, tile);
                        }
                    }
                }
                Err(e) => {
                    log_warn!(
                        self.logger,
                        "Batch tile lookup for {} geohashes failed: {}",
                        misses.len(),
                        e
                    );
                }
            }
        }

        order
            .into_iter()
            .filter_map(|key| found.remove(&key))
            .collect()
    }

    /// All tiles whose geohash starts with `prefix`. Not cached.
    pub fn tiles_with_prefix(&self, prefix: &str) -> Vec<GeoTile> {
        let key = geohash::canonical(prefix);
        if key.is_empty() {
            return Vec::new();
        }
        self.backend.fetch_prefix(&key).unwrap_or_else(|e| {
            log_warn!(self.logger, "Prefix lookup for '{}' failed: {}", key, e);
            Vec::new()
        })
    }

    /// Build provenance of the tile dataset, if recorded.
    pub fn metadata(&self) -> Option<TileDatabaseMetadata> {
        self.backend.metadata().unwrap_or_else(|e| {
            log_warn!(self.logger, "Tile metadata unavailable: {}", e);
            None
        })
    }

    /// Release the backend. Idempotent; later lookups reopen it.
    pub fn close(&self) {
        self.backend.close();
        log_debug!(self.logger, "Tile store closed ({})", self.backend.name());
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> TileCacheStats {
        self.cache.stats()
    }

    pub fn state(&self) -> BackendState {
        self.backend.state()
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }
}
