//! Tile store error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by tile backends.
///
/// These never escape [`TileStore`](super::TileStore): it logs them and
/// reports "no tile".
#[derive(Debug, Error)]
pub enum TileStoreError {
    /// I/O error while preparing or reading the database
    #[error("Tile database I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite error while opening or querying
    #[error("Tile database query failed: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Database file does not exist
    #[error("Tile database not found: {}", .0.display())]
    NotFound(PathBuf),

    /// File exists but does not look like a tile database
    #[error("Invalid tile data: {0}")]
    InvalidData(String),

    /// Backend cannot serve queries right now
    #[error("Tile store unavailable: {0}")]
    Unavailable(String),
}
