//! GeoSpawn service facade implementation.

use super::builder::{self, GeoSpawnBuilder};
use super::error::ServiceError;
use super::geodata::GeoDataService;
use super::spawner::ResourceSpawnService;
use crate::altitude::AltitudeReading;
use crate::config::ConfigFile;
use crate::geo::LocationGeoData;
use crate::log::Logger;
use crate::spawn::{ResourceSpawn, SpawnConfig, SpawnConfigUpdate};
use rand::Rng;
use std::sync::Arc;

/// High-level facade over location lookups and resource spawning.
///
/// Constructed once at process start and shared; replaces any notion of a
/// global service instance.
///
/// # Example
///
/// ```
/// use geospawn::service::GeoSpawn;
/// use geospawn::tiles::TileStore;
/// use geospawn::log::NoOpLogger;
/// use std::sync::Arc;
///
/// let logger = Arc::new(NoOpLogger);
/// let geospawn = GeoSpawn::builder()
///     .tile_store(TileStore::in_memory(Vec::new(), logger.clone()))
///     .logger(logger)
///     .build()
///     .unwrap();
///
/// let location = geospawn.get_location_data(0.0, -160.0);
/// assert!(location.biome.is_known());
///
/// let spawns = geospawn.spawn_resources(0.0, -160.0);
/// assert!((3..=5).contains(&spawns.len()));
/// ```
pub struct GeoSpawn {
    geo: Arc<GeoDataService>,
    spawner: ResourceSpawnService,
}

impl GeoSpawn {
    pub fn builder() -> GeoSpawnBuilder {
        GeoSpawnBuilder::new()
    }

    /// Build from a configuration file.
    ///
    /// The SQLite tile database is opened lazily. Mapping tables come from
    /// `[mappings] directory` when set, otherwise the built-in tables.
    pub fn from_config(config: &ConfigFile, logger: Arc<dyn Logger>) -> Result<Self, ServiceError> {
        builder::from_config(config, logger)
    }

    pub(super) fn from_parts(geo: Arc<GeoDataService>, spawner: ResourceSpawnService) -> Self {
        Self { geo, spawner }
    }

    /// Open the tile store eagerly. Returns false if it could not be opened.
    pub fn initialize(&self) -> bool {
        self.geo.initialize()
    }

    /// Best-effort geology and biome for a coordinate. Never fails.
    pub fn get_location_data(&self, lat: f64, lng: f64) -> LocationGeoData {
        self.geo.get_location_data(lat, lng)
    }

    /// Spawn resources at a coordinate. Never fails.
    pub fn spawn_resources(&self, lat: f64, lng: f64) -> Vec<ResourceSpawn> {
        self.spawner.spawn_resources(lat, lng)
    }

    /// Spawn resources, weighting by the caller's altitude reading.
    pub fn spawn_resources_at(
        &self,
        lat: f64,
        lng: f64,
        altitude: Option<&AltitudeReading>,
    ) -> Vec<ResourceSpawn> {
        self.spawner.spawn_resources_at(lat, lng, altitude)
    }

    /// Spawn resources drawing randomness from `rng`.
    pub fn spawn_resources_with<R: Rng>(
        &self,
        lat: f64,
        lng: f64,
        altitude: Option<&AltitudeReading>,
        rng: &mut R,
    ) -> Vec<ResourceSpawn> {
        self.spawner.spawn_resources_with(lat, lng, altitude, rng)
    }

    /// Apply a partial spawn configuration update in place.
    pub fn set_spawn_config(&self, update: &SpawnConfigUpdate) -> SpawnConfig {
        self.spawner.set_spawn_config(update)
    }

    pub fn spawn_config(&self) -> SpawnConfig {
        self.spawner.spawn_config()
    }

    pub fn geo_data(&self) -> &Arc<GeoDataService> {
        &self.geo
    }

    pub fn spawner(&self) -> &ResourceSpawnService {
        &self.spawner
    }

    /// Release the tile store; lookups reopen it on demand.
    pub fn close(&self) {
        self.geo.close();
    }
}
