//! Integration tests for GeoSpawn against a real SQLite tile database.
//!
//! These tests verify the complete lookup and spawn workflow including:
//! - Tier selection (detailed, coarse, nearby, estimated)
//! - Independent per-field resolution
//! - Database metadata
//! - Realm-appropriate resource spawning
//! - Close and reopen through a working copy

use geospawn::geo::{BiomeCode, BiomeData, DataSource, GeoTile, GeologyData, ResolutionTier};
use geospawn::geohash::{self, GeohashBounds};
use geospawn::log::{LogLevel, MemoryLogger};
use geospawn::mapping::MappingTables;
use geospawn::resources::{ResourceCatalog, ResourceType};
use geospawn::service::GeoSpawn;
use geospawn::spawn::SpawnConfigUpdate;
use geospawn::tiles::schema::{create_schema, insert_tiles, write_metadata};
use geospawn::tiles::{BackendState, SqliteConfig, TileDatabaseMetadata, TileStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

// =============================================================================
// Test Helpers
// =============================================================================

const MINNEAPOLIS: (f64, f64) = (44.98, -93.27);
const PARIS: (f64, f64) = (48.85, 2.35);
const BOULDER: (f64, f64) = (40.01, -105.27);
const TOKYO: (f64, f64) = (35.68, 139.69);

fn detailed(point: (f64, f64)) -> String {
    geohash::encode(point.0, point.1, 5)
}

fn fixture_tiles() -> Vec<GeoTile> {
    let boulder_neighbor = geohash::neighbors(&detailed(BOULDER))[0].clone();
    vec![
        GeoTile::new(
            detailed(MINNEAPOLIS),
            GeologyData::new("acid_plutonic", 0.9).with_secondary(["metamorphic"]),
            BiomeData::new(BiomeCode::TemperateBroadleaf, 0.85)
                .with_realm("Nearctic")
                .with_ecoregion(412),
        ),
        GeoTile::new(
            geohash::encode(PARIS.0, PARIS.1, 3),
            GeologyData::new("carbonate_sedimentary", 0.7),
            BiomeData::new(BiomeCode::TemperateBroadleaf, 0.8).with_realm("Palearctic"),
        ),
        GeoTile::new(
            boulder_neighbor,
            GeologyData::new("metamorphic", 0.6),
            BiomeData::new(BiomeCode::TemperateConifer, 0.7).with_realm("Nearctic"),
        ),
        GeoTile::new(
            detailed(TOKYO),
            GeologyData::unknown(),
            BiomeData::new(BiomeCode::TemperateBroadleaf, 0.6).with_realm("Palearctic"),
        ),
    ]
}

/// Writes the fixture database and returns its path.
fn build_database(dir: &Path) -> PathBuf {
    let path = dir.join("geotiles.db");
    let mut conn = Connection::open(&path).unwrap();
    create_schema(&conn).unwrap();
    let tiles = fixture_tiles();
    insert_tiles(&mut conn, &tiles).unwrap();
    write_metadata(
        &conn,
        &TileDatabaseMetadata {
            sources: vec!["GLiM".to_string(), "WWF Ecoregions".to_string()],
            generated_at: Some("2026-01-15T00:00:00Z".to_string()),
            tile_count: Some(tiles.len() as u64),
            ..Default::default()
        },
    )
    .unwrap();
    path
}

fn open(config: SqliteConfig, logger: Arc<MemoryLogger>) -> GeoSpawn {
    GeoSpawn::builder()
        .tile_store(TileStore::sqlite(config, 1_000, logger.clone()))
        .logger(logger)
        .build()
        .unwrap()
}

fn fixture() -> (TempDir, GeoSpawn, Arc<MemoryLogger>) {
    let dir = TempDir::new().unwrap();
    let database = build_database(dir.path());
    let logger = Arc::new(MemoryLogger::new());
    let geospawn = open(SqliteConfig::new(database), logger.clone());
    (dir, geospawn, logger)
}

// =============================================================================
// Location Tests
// =============================================================================

#[test]
fn test_detailed_tile_resolution() {
    let (_dir, geospawn, _) = fixture();
    let location = geospawn.get_location_data(MINNEAPOLIS.0, MINNEAPOLIS.1);

    assert_eq!(location.geohash, detailed(MINNEAPOLIS));
    assert_eq!(location.data_source, DataSource::Detailed);
    assert_eq!(location.geology.primary_lithology, "acid_plutonic");
    assert_eq!(location.geology.secondary_lithologies, vec!["metamorphic"]);
    assert_eq!(location.biome.biome_type, BiomeCode::TemperateBroadleaf);
    assert_eq!(location.biome.ecoregion_id, Some(412));
}

#[test]
fn test_coarse_tile_resolution() {
    let (_dir, geospawn, _) = fixture();
    let location = geospawn.get_location_data(PARIS.0, PARIS.1);

    assert_eq!(location.data_source, DataSource::Coarse);
    assert_eq!(location.provenance.geology, ResolutionTier::Coarse);
    assert_eq!(location.geology.primary_lithology, "carbonate_sedimentary");
    assert_eq!(location.biome.realm.as_deref(), Some("Palearctic"));
}

#[test]
fn test_nearby_tile_resolution() {
    let (_dir, geospawn, _) = fixture();
    let location = geospawn.get_location_data(BOULDER.0, BOULDER.1);

    assert_eq!(location.data_source, DataSource::Fallback);
    assert_eq!(location.provenance.geology, ResolutionTier::Nearby);
    assert_eq!(location.provenance.biome, ResolutionTier::Nearby);
    assert_eq!(location.geology.primary_lithology, "metamorphic");
    assert_eq!(location.biome.biome_type, BiomeCode::TemperateConifer);
}

#[test]
fn test_fields_resolve_independently() {
    let (_dir, geospawn, _) = fixture();
    let location = geospawn.get_location_data(TOKYO.0, TOKYO.1);

    assert_eq!(location.provenance.biome, ResolutionTier::Detailed);
    assert_eq!(location.provenance.geology, ResolutionTier::Estimated);
    assert_eq!(location.geology.primary_lithology, "mixed_sedimentary");
    assert_eq!(location.data_source, DataSource::Fallback);
}

#[test]
fn test_ocean_and_poles_are_estimated() {
    let (_dir, geospawn, _) = fixture();
    for (lat, lng) in [(0.0, -160.0), (90.0, 0.0), (-90.0, 0.0)] {
        let location = geospawn.get_location_data(lat, lng);
        assert_eq!(location.data_source, DataSource::Fallback);
        assert!(location.geology.is_known());
        assert!(location.biome.is_known());
        assert!(location.geology.confidence > 0.0);
    }

    let pole = geospawn.get_location_data(90.0, 0.0);
    assert_eq!(pole.biome.biome_type, BiomeCode::Tundra);
}

#[test]
fn test_bounds_resolution() {
    let (_dir, geospawn, _) = fixture();
    let bounds = GeohashBounds::new(44.95, 45.0, -93.3, -93.2);

    let locations = geospawn.geo_data().get_location_data_in_bounds(&bounds);
    assert!(!locations.is_empty());
    assert!(locations.iter().all(|l| l.biome.is_known()));
    assert!(locations
        .iter()
        .any(|l| l.geohash == detailed(MINNEAPOLIS) && l.data_source == DataSource::Detailed));
}

#[test]
fn test_metadata() {
    let (_dir, geospawn, _) = fixture();
    let metadata = geospawn.geo_data().store().metadata().unwrap();

    assert_eq!(metadata.sources, vec!["GLiM", "WWF Ecoregions"]);
    assert_eq!(metadata.tile_count, Some(4));
    assert_eq!(
        metadata.generated_at.as_deref(),
        Some("2026-01-15T00:00:00Z")
    );
}

// =============================================================================
// Spawn Tests
// =============================================================================

#[test]
fn test_nearctic_woods_are_plausible() {
    let (_dir, geospawn, _) = fixture();
    let allowed = MappingTables::builtin()
        .wood_for("Nearctic", BiomeCode::TemperateBroadleaf)
        .unwrap()
        .resource_ids
        .clone();
    geospawn.set_spawn_config(&SpawnConfigUpdate {
        stone_ratio: Some(0.0),
        food_ratio: Some(0.0),
        ..Default::default()
    });

    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..50 {
        let spawns =
            geospawn.spawn_resources_with(MINNEAPOLIS.0, MINNEAPOLIS.1, None, &mut rng);
        for spawn in spawns {
            assert_eq!(spawn.resource_type, ResourceType::Wood);
            assert!(allowed.contains(&spawn.resource_id), "{}", spawn.resource_id);
        }
    }
}

#[test]
fn test_spawns_everywhere_stay_in_catalog() {
    let (_dir, geospawn, _) = fixture();
    let catalog = ResourceCatalog::builtin();

    for point in [MINNEAPOLIS, PARIS, BOULDER, TOKYO, (0.0, -160.0), (-90.0, 0.0)] {
        for _ in 0..25 {
            let spawns = geospawn.spawn_resources(point.0, point.1);
            assert!((3..=5).contains(&spawns.len()));
            for spawn in spawns {
                assert!(spawn.quantity >= 1);
                assert!(catalog.contains(spawn.resource_type, &spawn.resource_id));
            }
        }
    }
}

#[test]
fn test_spawns_are_deterministic_per_seed() {
    let dir = TempDir::new().unwrap();
    let database = build_database(dir.path());
    let first = open(SqliteConfig::new(&database), Arc::new(MemoryLogger::new()));
    let second = open(SqliteConfig::new(&database), Arc::new(MemoryLogger::new()));

    let mut rng = StdRng::seed_from_u64(5);
    let a = first.spawn_resources_with(PARIS.0, PARIS.1, None, &mut rng);
    let mut rng = StdRng::seed_from_u64(5);
    let b = second.spawn_resources_with(PARIS.0, PARIS.1, None, &mut rng);
    assert_eq!(a, b);
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_close_and_reopen_with_working_copy() {
    let dir = TempDir::new().unwrap();
    let database = build_database(dir.path());
    let work = dir.path().join("work");
    let logger = Arc::new(MemoryLogger::new());
    let geospawn = open(
        SqliteConfig::new(&database).with_working_dir(&work),
        logger.clone(),
    );

    assert!(geospawn.initialize());
    assert!(work.join("geotiles.db").is_file());
    assert_eq!(geospawn.geo_data().store().state(), BackendState::Ready);

    geospawn.close();
    geospawn.close();
    assert_eq!(geospawn.geo_data().store().state(), BackendState::Closed);

    geospawn.geo_data().clear_cache();
    let location = geospawn.get_location_data(MINNEAPOLIS.0, MINNEAPOLIS.1);
    assert_eq!(location.data_source, DataSource::Detailed);
    assert_eq!(geospawn.geo_data().store().state(), BackendState::Ready);
    assert_eq!(logger.count(LogLevel::Warn), 0);
}

#[test]
fn test_missing_database_degrades_to_estimates() {
    let dir = TempDir::new().unwrap();
    let logger = Arc::new(MemoryLogger::new());
    let geospawn = open(
        SqliteConfig::new(dir.path().join("absent.db")),
        logger.clone(),
    );

    let location = geospawn.get_location_data(MINNEAPOLIS.0, MINNEAPOLIS.1);
    assert_eq!(location.data_source, DataSource::Fallback);
    assert!(location.biome.is_known());
    assert!(logger.count(LogLevel::Warn) > 0);
}
