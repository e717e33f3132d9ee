//! Resource spawning for a coordinate.

use super::geodata::GeoDataService;
use crate::altitude::AltitudeReading;
use crate::log::Logger;
use crate::spawn::{ResourceSelector, ResourceSpawn, SpawnConfig, SpawnConfigUpdate};
use crate::{log_debug, log_warn};
use rand::Rng;
use std::sync::{Arc, PoisonError, RwLock};

/// Spawns resources appropriate to a location.
///
/// Holds the spawn configuration behind a lock so it can be updated while the
/// service is shared.
pub struct ResourceSpawnService {
    geo: Arc<GeoDataService>,
    selector: ResourceSelector,
    config: RwLock<SpawnConfig>,
    logger: Arc<dyn Logger>,
}

impl ResourceSpawnService {
    /// Create a service; out-of-range configuration is corrected with a warning.
    pub fn new(
        geo: Arc<GeoDataService>,
        selector: ResourceSelector,
        mut config: SpawnConfig,
        logger: Arc<dyn Logger>,
    ) -> Self {
        for note in config.normalize() {
            log_warn!(logger, "Spawn config: {}", note);
        }
        Self {
            geo,
            selector,
            config: RwLock::new(config),
            logger,
        }
    }

    /// Spawn resources at a coordinate. Never fails.
    pub fn spawn_resources(&self, lat: f64, lng: f64) -> Vec<ResourceSpawn> {
        self.spawn_resources_with(lat, lng, None, &mut rand::thread_rng())
    }

    /// Spawn resources, weighting by the caller's altitude reading.
    pub fn spawn_resources_at(
        &self,
        lat: f64,
        lng: f64,
        altitude: Option<&AltitudeReading>,
    ) -> Vec<ResourceSpawn> {
        self.spawn_resources_with(lat, lng, altitude, &mut rand::thread_rng())
    }

    /// Spawn resources drawing randomness from `rng`.
    pub fn spawn_resources_with<R: Rng>(
        &self,
        lat: f64,
        lng: f64,
        altitude: Option<&AltitudeReading>,
        rng: &mut R,
    ) -> Vec<ResourceSpawn> {
        let location = self.geo.get_location_data(lat, lng);
        let config = self.spawn_config();
        let spawns = self.selector.spawn(&location, altitude, &config, rng);
        log_debug!(
            self.logger,
            "Spawned {} stacks at {} ({} data)",
            spawns.len(),
            location.geohash,
            location.data_source
        );
        spawns
    }

    /// Snapshot of the current configuration.
    pub fn spawn_config(&self) -> SpawnConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply a partial update in place and return the effective configuration.
    ///
    /// Out-of-range values are corrected and logged as warnings.
    pub fn set_spawn_config(&self, update: &SpawnConfigUpdate) -> SpawnConfig {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        for note in config.apply(update) {
            log_warn!(self.logger, "Spawn config: {}", note);
        }
        config.clone()
    }

    pub fn selector(&self) -> &ResourceSelector {
        &self.selector
    }
}
