//! Tile database schema.
//!
//! The tile database is produced offline; these helpers define its layout so
//! fixtures and tooling can write files the SQLite backend can read.

use super::{TileDatabaseMetadata, TileStoreError};
use crate::geo::{BiomeCode, BiomeData, GeoTile, GeologyData};
use rusqlite::{params, Connection, Row};

/// Length of the indexed `geohash_prefix` column.
pub const PREFIX_INDEX_LENGTH: usize = 3;

/// Columns selected for a tile, in the order [`row_to_tile`] reads them.
pub(crate) const TILE_COLUMNS: &str = "geohash, primary_lithology, secondary_lithologies, \
     geology_confidence, biome_type, biome_confidence, ecoregion_id, realm";

const CREATE_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS tiles (
    geohash TEXT PRIMARY KEY,
    geohash_prefix TEXT NOT NULL,
    primary_lithology TEXT NOT NULL,
    secondary_lithologies TEXT,
    geology_confidence REAL NOT NULL,
    biome_type TEXT NOT NULL,
    biome_confidence REAL NOT NULL,
    ecoregion_id INTEGER,
    realm TEXT
);
CREATE INDEX IF NOT EXISTS idx_tiles_prefix ON tiles(geohash_prefix);
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
";

/// Create the `tiles` and `metadata` tables if they do not exist.
pub fn create_schema(conn: &Connection) -> Result<(), TileStoreError> {
    conn.execute_batch(CREATE_SCHEMA)?;
    Ok(())
}

/// Insert or replace one tile.
pub fn insert_tile(conn: &Connection, tile: &GeoTile) -> Result<(), TileStoreError> {
    let geohash = tile.geohash.to_ascii_lowercase();
    let prefix: String = geohash.chars().take(PREFIX_INDEX_LENGTH).collect();
    let secondary = serde_json::to_string(&tile.geology.secondary_lithologies)
        .map_err(|e| TileStoreError::InvalidData(e.to_string()))?;

    conn.execute(
        "INSERT OR REPLACE INTO tiles (geohash, geohash_prefix, primary_lithology, \
         secondary_lithologies, geology_confidence, biome_type, biome_confidence, \
         ecoregion_id, realm) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            geohash,
            prefix,
            tile.geology.primary_lithology,
            secondary,
            tile.geology.confidence,
            tile.biome.biome_type.as_str(),
            tile.biome.confidence,
            tile.biome.ecoregion_id,
            tile.biome.realm,
        ],
    )?;
    Ok(())
}

/// Insert many tiles in a single transaction.
pub fn insert_tiles<'a, I>(conn: &mut Connection, tiles: I) -> Result<usize, TileStoreError>
where
    I: IntoIterator<Item = &'a GeoTile>,
{
    let tx = conn.transaction()?;
    let mut count = 0;
    for tile in tiles {
        insert_tile(&tx, tile)?;
        count += 1;
    }
    tx.commit()?;
    Ok(count)
}

/// Replace the metadata table contents.
pub fn write_metadata(
    conn: &Connection,
    metadata: &TileDatabaseMetadata,
) -> Result<(), TileStoreError> {
    conn.execute("DELETE FROM metadata", [])?;
    for (key, value) in metadata.to_pairs() {
        conn.execute(
            "INSERT INTO metadata (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
    }
    Ok(())
}

/// Map a row selected with [`TILE_COLUMNS`] to a tile.
///
/// Malformed payloads degrade instead of failing the query: an unreadable
/// secondary list becomes empty and an unrecognised biome becomes `Unknown`.
pub(crate) fn row_to_tile(row: &Row<'_>) -> rusqlite::Result<GeoTile> {
    let geohash: String = row.get(0)?;
    let primary: Option<String> = row.get(1)?;
    let secondary: Option<String> = row.get(2)?;
    let geology_confidence: Option<f64> = row.get(3)?;
    let biome_type: Option<String> = row.get(4)?;
    let biome_confidence: Option<f64> = row.get(5)?;
    let ecoregion_id: Option<i64> = row.get(6)?;
    let realm: Option<String> = row.get(7)?;

    let geology = GeologyData::new(
        primary.unwrap_or_else(|| crate::geo::UNKNOWN_LITHOLOGY.to_string()),
        clamp_confidence(geology_confidence),
    )
    .with_secondary(parse_secondary(secondary.as_deref()));

    let mut biome = BiomeData::new(
        biome_type
            .as_deref()
            .map(BiomeCode::parse_lenient)
            .unwrap_or(BiomeCode::Unknown),
        clamp_confidence(biome_confidence),
    );
    if let Some(realm) = realm.filter(|r| !r.trim().is_empty()) {
        biome = biome.with_realm(realm);
    }
    if let Some(id) = ecoregion_id.and_then(|id| u32::try_from(id).ok()) {
        biome = biome.with_ecoregion(id);
    }

    Ok(GeoTile::new(geohash.to_ascii_lowercase(), geology, biome))
}

/// Parse the stored secondary lithology list (a JSON array of strings).
pub fn parse_secondary(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Vec::new();
    };
    serde_json::from_str::<Vec<String>>(raw)
        .map(|list| list.into_iter().filter(|s| !s.trim().is_empty()).collect())
        .unwrap_or_default()
}

fn clamp_confidence(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.clamp(0.0, 1.0),
        _ => 0.0,
    }
}
