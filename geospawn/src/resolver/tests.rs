use super::*;
use crate::geo::{BiomeCode, UNKNOWN_LITHOLOGY};
use crate::geohash::Direction;
use crate::log::NoOpLogger;
use crate::tiles::{BackendState, MemoryTileBackend, TileBackend, TileStoreError};
use std::sync::atomic::{AtomicUsize, Ordering};

const NYC: &str = "dr5re";

fn geology(lithology: &str) -> GeologyData {
    GeologyData::new(lithology, 0.8)
}

fn biome(code: BiomeCode) -> BiomeData {
    BiomeData::new(code, 0.7).with_realm("Nearctic")
}

fn tile(geohash: &str, geology: GeologyData, biome: BiomeData) -> GeoTile {
    GeoTile::new(geohash, geology, biome)
}

fn resolver_over(tiles: Vec<GeoTile>) -> FallbackResolver {
    let store = Arc::new(TileStore::in_memory(tiles, Arc::new(NoOpLogger)));
    FallbackResolver::new(store, ResolverConfig::default(), Arc::new(NoOpLogger))
}

/// Memory backend counting backend round-trips.
struct CountingBackend {
    inner: MemoryTileBackend,
    queries: Arc<AtomicUsize>,
}

impl TileBackend for CountingBackend {
    fn name(&self) -> &str {
        "counting"
    }
    fn initialize(&self) -> Result<(), TileStoreError> {
        self.inner.initialize()
    }
    fn fetch(&self, geohash: &str) -> Result<Option<GeoTile>, TileStoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(geohash)
    }
    fn fetch_many(&self, geohashes: &[String]) -> Result<Vec<GeoTile>, TileStoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_many(geohashes)
    }
    fn fetch_prefix(&self, prefix: &str) -> Result<Vec<GeoTile>, TileStoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_prefix(prefix)
    }
    fn close(&self) {
        self.inner.close()
    }
    fn state(&self) -> BackendState {
        self.inner.state()
    }
}

fn counting_resolver(tiles: Vec<GeoTile>) -> (FallbackResolver, Arc<AtomicUsize>) {
    let queries = Arc::new(AtomicUsize::new(0));
    let backend = CountingBackend {
        inner: MemoryTileBackend::new(tiles),
        queries: Arc::clone(&queries),
    };
    let store = Arc::new(TileStore::new(backend, 10_000, Arc::new(NoOpLogger)));
    let resolver =
        FallbackResolver::new(store, ResolverConfig::default(), Arc::new(NoOpLogger));
    (resolver, queries)
}

#[test]
fn test_detailed_tile_is_used_as_stored() {
    let resolver = resolver_over(vec![tile(
        NYC,
        geology("metamorphic"),
        biome(BiomeCode::TemperateBroadleaf),
    )]);

    let data = resolver.resolve_geohash(NYC);
    assert_eq!(data.geohash, NYC);
    assert_eq!(data.geology.primary_lithology, "metamorphic");
    assert_eq!(data.geology.confidence, 0.8);
    assert_eq!(data.biome.biome_type, BiomeCode::TemperateBroadleaf);
    assert_eq!(data.data_source, DataSource::Detailed);
}

#[test]
fn test_resolve_coordinate_uses_detailed_precision() {
    let resolver = resolver_over(vec![tile(
        NYC,
        geology("metamorphic"),
        biome(BiomeCode::TemperateBroadleaf),
    )]);

    let data = resolver.resolve(40.7128, -74.0060);
    assert_eq!(data.geohash, NYC);
    assert_eq!(data.data_source, DataSource::Detailed);
}

#[test]
fn test_fields_resolve_independently() {
    let resolver = resolver_over(vec![
        tile(NYC, GeologyData::unknown(), biome(BiomeCode::TemperateBroadleaf)),
        tile("dr5", geology("acid_plutonic"), biome(BiomeCode::Boreal)),
    ]);

    let data = resolver.resolve_geohash(NYC);
    assert_eq!(data.geology.primary_lithology, "acid_plutonic");
    assert_eq!(data.biome.biome_type, BiomeCode::TemperateBroadleaf);
    assert_eq!(data.provenance.geology, ResolutionTier::Coarse);
    assert_eq!(data.provenance.biome, ResolutionTier::Detailed);
    assert_eq!(data.data_source, DataSource::Coarse);
}

#[test]
fn test_nearby_ring_fills_missing_field() {
    let north = geohash::neighbor(NYC, Direction::North).unwrap();
    let resolver = resolver_over(vec![
        tile(NYC, geology("metamorphic"), BiomeData::unknown()),
        tile(&north, geology("evaporites"), biome(BiomeCode::TemperateConifer)),
    ]);

    let data = resolver.resolve_geohash(NYC);
    assert_eq!(data.geology.primary_lithology, "metamorphic");
    assert_eq!(data.biome.biome_type, BiomeCode::TemperateConifer);
    assert_eq!(data.provenance.biome, ResolutionTier::Nearby);
    assert_eq!(data.data_source, DataSource::Fallback);
}

#[test]
fn test_inner_ring_wins_over_outer_ring() {
    let ring1 = geohash::ring(NYC, 1);
    let ring2 = geohash::ring(NYC, 2);
    let resolver = resolver_over(vec![
        tile(&ring2[0], geology("evaporites"), BiomeData::unknown()),
        tile(&ring1[7], geology("basic_volcanic"), BiomeData::unknown()),
    ]);

    let data = resolver.resolve_geohash(NYC);
    assert_eq!(data.geology.primary_lithology, "basic_volcanic");
}

#[test]
fn test_distance_cap_limits_rings() {
    // Precision-3 cells are ~156 km tall, so ring 2 (~312 km) is beyond 200 km
    let origin = "dr5";
    let ring1 = geohash::ring(origin, 1);
    let ring2 = geohash::ring(origin, 2);

    let resolver = resolver_over(vec![tile(
        &ring2[0],
        geology("evaporites"),
        BiomeData::unknown(),
    )]);
    let data = resolver.resolve_geohash(origin);
    assert_eq!(data.provenance.geology, ResolutionTier::Estimated);

    let resolver = resolver_over(vec![tile(
        &ring1[0],
        geology("evaporites"),
        BiomeData::unknown(),
    )]);
    let data = resolver.resolve_geohash(origin);
    assert_eq!(data.provenance.geology, ResolutionTier::Nearby);
}

#[test]
fn test_ring_limit_is_configurable() {
    let ring2 = geohash::ring(NYC, 2);
    let store = Arc::new(TileStore::in_memory(
        vec![tile(&ring2[3], geology("evaporites"), BiomeData::unknown())],
        Arc::new(NoOpLogger),
    ));
    let config = ResolverConfig {
        nearby_max_rings: 1,
        ..Default::default()
    };
    let resolver = FallbackResolver::new(store, config, Arc::new(NoOpLogger));

    let data = resolver.resolve_geohash(NYC);
    assert_eq!(data.provenance.geology, ResolutionTier::Estimated);
}

#[test]
fn test_estimate_over_open_ocean() {
    let resolver = resolver_over(Vec::new());
    let data = resolver.resolve(0.0, -160.0);

    assert!(data.geology.is_known());
    assert!(data.biome.is_known());
    assert_eq!(data.geology.primary_lithology, DEFAULT_LITHOLOGY);
    assert_eq!(data.biome.biome_type, BiomeCode::TropicalMoistForest);
    assert_eq!(data.geology.confidence, ESTIMATE_CONFIDENCE);
    assert_eq!(data.data_source, DataSource::Fallback);
}

#[test]
fn test_estimate_at_poles() {
    let resolver = resolver_over(Vec::new());
    for lat in [90.0, -90.0] {
        let data = resolver.resolve(lat, 0.0);
        assert!(data.geology.is_known());
        assert_eq!(data.biome.biome_type, BiomeCode::Tundra);
        assert_ne!(data.geology.primary_lithology, UNKNOWN_LITHOLOGY);
        assert_eq!(data.data_source, DataSource::Fallback);
    }
    assert_eq!(
        resolver.resolve(-90.0, 0.0).biome.realm.as_deref(),
        Some("Antarctic")
    );
}

#[test]
fn test_missing_realm_is_estimated() {
    let resolver = resolver_over(vec![tile(
        NYC,
        geology("metamorphic"),
        BiomeData::new(BiomeCode::TemperateBroadleaf, 0.9),
    )]);

    let data = resolver.resolve_geohash(NYC);
    assert_eq!(data.biome.biome_type, BiomeCode::TemperateBroadleaf);
    assert_eq!(data.biome.confidence, 0.9);
    assert_eq!(data.biome.realm.as_deref(), Some("Nearctic"));
    assert_eq!(data.data_source, DataSource::Detailed);
}

#[test]
fn test_repeated_resolution_is_identical() {
    let resolver = resolver_over(vec![tile(
        "dr5",
        geology("metamorphic"),
        biome(BiomeCode::Boreal),
    )]);
    let first = resolver.resolve(40.7128, -74.0060);
    for _ in 0..5 {
        assert_eq!(resolver.resolve(40.7128, -74.0060), first);
    }
}

#[test]
fn test_batch_matches_single_resolution() {
    let north = geohash::neighbor(NYC, Direction::North).unwrap();
    let tiles = vec![
        tile(NYC, geology("metamorphic"), BiomeData::unknown()),
        tile(&north, GeologyData::unknown(), biome(BiomeCode::TemperateConifer)),
        tile("9q8", geology("basic_volcanic"), biome(BiomeCode::Mediterranean)),
    ];
    let keys: Vec<String> = [NYC, "9q8yy", "DR5RE", "u4pru", &north]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let batch = resolver_over(tiles.clone()).resolve_batch(&keys);
    let single = resolver_over(tiles);
    assert_eq!(batch.len(), keys.len());
    for (key, data) in keys.iter().zip(&batch) {
        assert_eq!(*data, single.resolve_geohash(key));
    }
}

#[test]
fn test_batch_issues_one_query_per_tier() {
    let (resolver, queries) = counting_resolver(vec![tile(
        NYC,
        geology("metamorphic"),
        BiomeData::unknown(),
    )]);

    let bounds = geohash::bounds("dr5r");
    let results = resolver.resolve_bounds(&bounds);
    assert!(results.len() >= 32);
    assert!(queries.load(Ordering::SeqCst) <= 3);
}

#[test]
fn test_bounds_across_antimeridian_stay_local() {
    let resolver = resolver_over(Vec::new());
    let bounds = GeohashBounds::new(-0.1, 0.1, 179.9, -179.9);

    let results = resolver.resolve_bounds(&bounds);
    assert!(!results.is_empty());
    assert!(results.len() < 100);
    for data in &results {
        let (_, lng) = geohash::decode(&data.geohash);
        assert!(lng.abs() > 179.0, "{} at {}", data.geohash, lng);
    }
}

#[test]
fn test_batch_skips_lower_tiers_when_complete() {
    let (resolver, queries) = counting_resolver(vec![tile(
        NYC,
        geology("metamorphic"),
        biome(BiomeCode::TemperateBroadleaf),
    )]);

    let results = resolver.resolve_batch(&[NYC.to_string()]);
    assert_eq!(results[0].data_source, DataSource::Detailed);
    assert_eq!(queries.load(Ordering::SeqCst), 1);
}

#[test]
fn test_empty_geohash_still_resolves() {
    let resolver = resolver_over(Vec::new());
    let data = resolver.resolve_geohash("");
    assert!(data.geology.is_known());
    assert!(data.biome.is_known());
}
