//! Builder for [`GeoSpawn`].

use super::error::ServiceError;
use super::facade::GeoSpawn;
use super::geodata::GeoDataService;
use super::spawner::ResourceSpawnService;
use crate::config::ConfigFile;
use crate::log::{Logger, TracingLogger};
use crate::mapping::MappingTables;
use crate::resolver::{FallbackResolver, ResolverConfig};
use crate::resources::ResourceCatalog;
use crate::spawn::{ResourceSelector, SpawnConfig};
use crate::tiles::{SqliteConfig, TileStore};
use crate::{log_info, log_warn};
use std::sync::Arc;

/// Assembles the services from their parts.
///
/// Only the tile store is required; catalog and mappings default to the
/// built-in tables and the logger to [`TracingLogger`].
#[derive(Default)]
pub struct GeoSpawnBuilder {
    store: Option<TileStore>,
    resolver: ResolverConfig,
    spawn: SpawnConfig,
    catalog: Option<Arc<ResourceCatalog>>,
    mappings: Option<Arc<MappingTables>>,
    logger: Option<Arc<dyn Logger>>,
}

impl GeoSpawnBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tile_store(mut self, store: TileStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn resolver_config(mut self, config: ResolverConfig) -> Self {
        self.resolver = config;
        self
    }

    pub fn spawn_config(mut self, config: SpawnConfig) -> Self {
        self.spawn = config;
        self
    }

    pub fn catalog(mut self, catalog: Arc<ResourceCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn mappings(mut self, mappings: Arc<MappingTables>) -> Self {
        self.mappings = Some(mappings);
        self
    }

    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Wire the services together.
    ///
    /// Mapping entries that name resources missing from the catalog are
    /// logged; selection skips them.
    pub fn build(self) -> Result<GeoSpawn, ServiceError> {
        let store = self
            .store
            .ok_or(ServiceError::MissingComponent("tile store"))?;
        let logger = self
            .logger
            .unwrap_or_else(|| Arc::new(TracingLogger::new()));
        let catalog = self.catalog.unwrap_or_else(ResourceCatalog::builtin);
        let mappings = self.mappings.unwrap_or_else(MappingTables::builtin);

        for (resource_type, key, id) in mappings.missing_ids(&catalog) {
            log_warn!(
                logger,
                "{} mapping '{}' names unknown resource '{}'",
                resource_type,
                key,
                id
            );
        }

        let store = Arc::new(store);
        log_info!(
            logger,
            "GeoSpawn ready: {} tile backend, {} resources",
            store.backend_name(),
            catalog.len()
        );

        let resolver = FallbackResolver::new(store, self.resolver, logger.clone());
        let geo = Arc::new(GeoDataService::new(resolver));
        let selector = ResourceSelector::new(catalog, mappings, logger.clone());
        let spawner = ResourceSpawnService::new(geo.clone(), selector, self.spawn, logger);

        Ok(GeoSpawn::from_parts(geo, spawner))
    }
}

/// Build a [`GeoSpawn`] from a loaded configuration file.
///
/// Opens the SQLite tile database lazily; loads mapping tables from
/// `[mappings] directory` when set.
pub(super) fn from_config(
    config: &ConfigFile,
    logger: Arc<dyn Logger>,
) -> Result<GeoSpawn, ServiceError> {
    let mut sqlite = SqliteConfig::new(&config.tiles.database);
    if let Some(dir) = &config.tiles.working_dir {
        sqlite = sqlite.with_working_dir(dir);
    }
    let store = TileStore::sqlite(sqlite, config.tiles.cache_capacity, logger.clone());

    let mut builder = GeoSpawnBuilder::new()
        .tile_store(store)
        .resolver_config(config.resolver.clone())
        .spawn_config(config.spawn.clone())
        .logger(logger);

    if let Some(dir) = &config.mappings.directory {
        builder = builder.mappings(Arc::new(MappingTables::load_from_dir(dir)?));
    }

    builder.build()
}
