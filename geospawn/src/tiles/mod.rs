//! Read-only tile lookups.
//!
//! [`TileStore`] answers geohash → [`GeoTile`](crate::geo::GeoTile) queries
//! through a bounded memoizing cache in front of a pluggable [`TileBackend`]:
//!
//! - [`SqliteTileBackend`]: the bundled tile database (rusqlite)
//! - [`MemoryTileBackend`]: tiles held in memory
//!
//! Lookups never fail. Backend errors are logged at warn level and reported
//! as "no tile".

mod backend;
mod cache;
mod error;
mod memory;
mod metadata;
pub mod schema;
mod sqlite;
mod store;

pub use backend::{BackendState, TileBackend};
pub use cache::{TileCache, TileCacheStats, DEFAULT_CACHE_CAPACITY};
pub use error::TileStoreError;
pub use memory::MemoryTileBackend;
pub use metadata::TileDatabaseMetadata;
pub use sqlite::{SqliteConfig, SqliteTileBackend, MAX_QUERY_PARAMS};
pub use store::TileStore;
