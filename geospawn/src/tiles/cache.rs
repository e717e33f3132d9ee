//! Bounded memo of tile lookups with LRU eviction.

use crate::geo::GeoTile;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Default number of memoized lookups.
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// Entry in the tile cache.
///
/// `tile` is `None` for a memoized miss.
#[derive(Debug, Clone)]
struct CacheEntry {
    tile: Option<GeoTile>,
    /// Logical clock value of the last access, for LRU eviction
    last_accessed: u64,
}

/// Statistics for the tile cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    /// Memoized lookups currently held
    pub entries: usize,
    /// Entries recording "no tile here"
    pub negative_entries: usize,
    pub capacity: usize,
}

impl TileCacheStats {
    /// Fraction of lookups answered from the cache.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    clock: u64,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl CacheInner {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

/// Memoizes geohash → tile lookups, including negative results.
///
/// When full, the least recently used tenth of the entries is evicted in one
/// pass. A capacity of zero disables memoization.
#[derive(Debug)]
pub struct TileCache {
    inner: Mutex<CacheInner>,
    capacity: usize,
}

impl TileCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner::default()),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a memoized result.
    ///
    /// Returns `None` when the key has never been resolved, `Some(None)` for a
    /// memoized miss and `Some(Some(tile))` for a memoized hit.
    pub fn get(&self, geohash: &str) -> Option<Option<GeoTile>> {
        let mut inner = self.lock();
        let now = inner.tick();

        match inner.entries.get_mut(geohash) {
            Some(entry) => {
                entry.last_accessed = now;
                let tile = entry.tile.clone();
                inner.hits += 1;
                Some(tile)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    /// Memoize the result of a backend lookup.
    pub fn insert(&self, geohash: String, tile: Option<GeoTile>) {
        if self.capacity == 0 {
            return;
        }

        let mut inner = self.lock();
        if !inner.entries.contains_key(&geohash) && inner.entries.len() >= self.capacity {
            self.evict_lru(&mut inner);
        }

        let now = inner.tick();
        inner.entries.insert(
            geohash,
            CacheEntry {
                tile,
                last_accessed: now,
            },
        );
    }

    /// Drop every memoized result. Counters are kept.
    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> TileCacheStats {
        let inner = self.lock();
        TileCacheStats {
            hits: inner.hits,
            misses: inner.misses,
            evictions: inner.evictions,
            entries: inner.entries.len(),
            negative_entries: inner.entries.values().filter(|e| e.tile.is_none()).count(),
            capacity: self.capacity,
        }
    }

    fn evict_lru(&self, inner: &mut CacheInner) {
        let batch = (self.capacity / 10).max(1);

        let mut by_age: Vec<(u64, String)> = inner
            .entries
            .iter()
            .map(|(key, entry)| (entry.last_accessed, key.clone()))
            .collect();
        by_age.sort_unstable();

        for (_, key) in by_age.into_iter().take(batch) {
            inner.entries.remove(&key);
            inner.evictions += 1;
        }
    }
}

impl Default for TileCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
