//! SQLite tile backend.

use super::backend::{BackendState, TileBackend};
use super::schema::{row_to_tile, PREFIX_INDEX_LENGTH, TILE_COLUMNS};
use super::{TileDatabaseMetadata, TileStoreError};
use crate::geo::GeoTile;
use rusqlite::{params_from_iter, Connection, OpenFlags, OptionalExtension};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

/// Maximum bound parameters per `IN (...)` statement.
pub const MAX_QUERY_PARAMS: usize = 500;

/// Location of the tile database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteConfig {
    /// Bundled database file
    pub database_path: PathBuf,
    /// Directory the database is copied into before opening, if any
    pub working_dir: Option<PathBuf>,
}

impl SqliteConfig {
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            working_dir: None,
        }
    }

    pub fn with_working_dir(mut self, working_dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(working_dir.into());
        self
    }
}

type SharedConnection = Arc<Mutex<Connection>>;

enum Lifecycle {
    Uninitialized,
    /// One caller is opening the database; others wait on the condvar
    Opening,
    Ready(SharedConnection),
    Closed,
}

/// Read-only tile backend over a SQLite file.
///
/// The database is opened lazily on first use. Concurrent first callers wait
/// for a single open attempt and share its outcome; a failed attempt leaves
/// the backend uninitialized so a later call retries.
pub struct SqliteTileBackend {
    config: SqliteConfig,
    lifecycle: Mutex<Lifecycle>,
    opened: Condvar,
}

impl SqliteTileBackend {
    pub fn new(config: SqliteConfig) -> Self {
        Self {
            config,
            lifecycle: Mutex::new(Lifecycle::Uninitialized),
            opened: Condvar::new(),
        }
    }

    pub fn config(&self) -> &SqliteConfig {
        &self.config
    }

    fn lock_lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the open connection, opening the database if needed.
    fn connection(&self) -> Result<SharedConnection, TileStoreError> {
        let mut lifecycle = self.lock_lifecycle();
        let mut waited = false;

        loop {
            match &*lifecycle {
                Lifecycle::Ready(conn) => return Ok(Arc::clone(conn)),
                Lifecycle::Opening => {
                    waited = true;
                    lifecycle = self
                        .opened
                        .wait(lifecycle)
                        .unwrap_or_else(PoisonError::into_inner);
                }
                Lifecycle::Uninitialized if waited => {
                    return Err(TileStoreError::Unavailable(
                        "concurrent open attempt failed".to_string(),
                    ));
                }
                Lifecycle::Uninitialized | Lifecycle::Closed => break,
            }
        }

        *lifecycle = Lifecycle::Opening;
        drop(lifecycle);

        let result = self.open();

        let mut lifecycle = self.lock_lifecycle();
        let outcome = match result {
            Ok(conn) => {
                let shared = Arc::new(Mutex::new(conn));
                *lifecycle = Lifecycle::Ready(Arc::clone(&shared));
                Ok(shared)
            }
            Err(e) => {
                *lifecycle = Lifecycle::Uninitialized;
                Err(e)
            }
        };
        self.opened.notify_all();
        outcome
    }

    fn open(&self) -> Result<Connection, TileStoreError> {
        let path = self.prepare_working_copy()?;
        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        if !has_table(&conn, "tiles")? {
            return Err(TileStoreError::InvalidData(format!(
                "{} has no tiles table",
                path.display()
            )));
        }
        Ok(conn)
    }

    /// Copy the bundled database into the working directory.
    ///
    /// Skipped when a copy of the same size is already there.
    fn prepare_working_copy(&self) -> Result<PathBuf, TileStoreError> {
        let source = &self.config.database_path;
        if !source.is_file() {
            return Err(TileStoreError::NotFound(source.clone()));
        }
        let Some(working_dir) = &self.config.working_dir else {
            return Ok(source.clone());
        };

        let file_name = source
            .file_name()
            .ok_or_else(|| TileStoreError::NotFound(source.clone()))?;
        let target = working_dir.join(file_name);

        let source_len = fs::metadata(source)?.len();
        let up_to_date = fs::metadata(&target)
            .map(|m| m.len() == source_len)
            .unwrap_or(false);

        if !up_to_date {
            fs::create_dir_all(working_dir)?;
            copy_atomically(source, &target)?;
        }
        Ok(target)
    }
}

fn copy_atomically(source: &Path, target: &Path) -> Result<(), TileStoreError> {
    let staging = target.with_extension("partial");
    fs::copy(source, &staging)?;
    fs::rename(&staging, target)?;
    Ok(())
}

fn has_table(conn: &Connection, name: &str) -> Result<bool, TileStoreError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn lock_connection(conn: &SharedConnection) -> MutexGuard<'_, Connection> {
    conn.lock().unwrap_or_else(PoisonError::into_inner)
}

impl TileBackend for SqliteTileBackend {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn initialize(&self) -> Result<(), TileStoreError> {
        self.connection().map(|_| ())
    }

    fn fetch(&self, geohash: &str) -> Result<Option<GeoTile>, TileStoreError> {
        let shared = self.connection()?;
        let conn = lock_connection(&shared);
        let tile = conn
            .query_row(
                &format!("SELECT {} FROM tiles WHERE geohash = ?1", TILE_COLUMNS),
                [geohash],
                row_to_tile,
            )
            .optional()?;
        Ok(tile)
    }

    fn fetch_many(&self, geohashes: &[String]) -> Result<Vec<GeoTile>, TileStoreError> {
        if geohashes.is_empty() {
            return Ok(Vec::new());
        }

        let shared = self.connection()?;
        let conn = lock_connection(&shared);
        let mut tiles = Vec::with_capacity(geohashes.len());

        for chunk in geohashes.chunks(MAX_QUERY_PARAMS) {
            let placeholders = vec!["?"; chunk.len()].join(",");
            let sql = format!(
                "SELECT {} FROM tiles WHERE geohash IN ({})",
                TILE_COLUMNS, placeholders
            );
            let mut stmt = conn.prepare_cached(&sql)?;
            let rows = stmt.query_map(params_from_iter(chunk.iter()), row_to_tile)?;
            for row in rows {
                tiles.push(row?);
            }
        }
        Ok(tiles)
    }

    fn fetch_prefix(&self, prefix: &str) -> Result<Vec<GeoTile>, TileStoreError> {
        let shared = self.connection()?;
        let conn = lock_connection(&shared);

        // Geohash symbols never contain LIKE wildcards
        let pattern = format!("{}%", prefix);
        let tiles = match prefix.get(..PREFIX_INDEX_LENGTH) {
            Some(indexed) => {
                let sql = format!(
                    "SELECT {} FROM tiles WHERE geohash_prefix = ?1 AND geohash LIKE ?2 \
                     ORDER BY geohash",
                    TILE_COLUMNS
                );
                let mut stmt = conn.prepare_cached(&sql)?;
                let rows = stmt.query_map([indexed, pattern.as_str()], row_to_tile)?;
                let tiles = rows.collect::<Result<Vec<_>, _>>()?;
                tiles
            }
            None => {
                let sql = format!(
                    "SELECT {} FROM tiles WHERE geohash LIKE ?1 ORDER BY geohash",
                    TILE_COLUMNS
                );
                let mut stmt = conn.prepare_cached(&sql)?;
                let rows = stmt.query_map([pattern.as_str()], row_to_tile)?;
                let tiles = rows.collect::<Result<Vec<_>, _>>()?;
                tiles
            }
        };
        Ok(tiles)
    }

    fn metadata(&self) -> Result<Option<TileDatabaseMetadata>, TileStoreError> {
        let shared = self.connection()?;
        let conn = lock_connection(&shared);

        if !has_table(&conn, "metadata")? {
            return Ok(None);
        }
        let mut stmt = conn.prepare("SELECT key, value FROM metadata")?;
        let pairs = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(TileDatabaseMetadata::from_pairs(pairs)))
    }

    fn close(&self) {
        let mut lifecycle = self.lock_lifecycle();
        while matches!(*lifecycle, Lifecycle::Opening) {
            lifecycle = self
                .opened
                .wait(lifecycle)
                .unwrap_or_else(PoisonError::into_inner);
        }
        // In-flight queries keep their Arc until they finish
        *lifecycle = Lifecycle::Closed;
    }

    fn state(&self) -> BackendState {
        match &*self.lock_lifecycle() {
            Lifecycle::Uninitialized => BackendState::Uninitialized,
            Lifecycle::Opening => BackendState::Opening,
            Lifecycle::Ready(_) => BackendState::Ready,
            Lifecycle::Closed => BackendState::Closed,
        }
    }
}
