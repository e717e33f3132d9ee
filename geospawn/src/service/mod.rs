//! Service layer.
//!
//! [`GeoSpawn`] is the entry point: it owns a [`GeoDataService`] (tile store
//! plus resolver) and a [`ResourceSpawnService`] (catalog, mappings and spawn
//! configuration). Build it with [`GeoSpawn::builder`] or
//! [`GeoSpawn::from_config`].

mod builder;
mod error;
mod facade;
mod geodata;
mod spawner;

pub use builder::GeoSpawnBuilder;
pub use error::ServiceError;
pub use facade::GeoSpawn;
pub use geodata::GeoDataService;
pub use spawner::ResourceSpawnService;
