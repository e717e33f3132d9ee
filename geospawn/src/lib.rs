//! GeoSpawn - geology and biome lookups with biome-aware resource spawning
//!
//! Resolves, for any latitude/longitude, a best-effort description of local
//! geology and biome from a geohash-keyed tile database, and uses it to pick
//! plausible resources (stones, woods, foods) with spawn quantities.
//!
//! # High-Level API
//!
//! The [`service`] module provides the facade:
//!
//! ```ignore
//! use geospawn::config::ConfigFile;
//! use geospawn::log::TracingLogger;
//! use geospawn::service::GeoSpawn;
//! use std::sync::Arc;
//!
//! let config = ConfigFile::load()?;
//! let geospawn = GeoSpawn::from_config(&config, Arc::new(TracingLogger::new()))?;
//!
//! let location = geospawn.get_location_data(44.98, -93.27);
//! let spawns = geospawn.spawn_resources(44.98, -93.27);
//! ```
//!
//! Lookups never fail: cells without data fall back to coarser tiles, nearby
//! cells, and finally latitude-based estimates.

pub mod altitude;
pub mod config;
pub mod geo;
pub mod geohash;
pub mod log;
pub mod logging;
pub mod mapping;
pub mod resolver;
pub mod resources;
pub mod service;
pub mod spawn;
pub mod tiles;

/// Version of the GeoSpawn library and CLI.
///
/// Synchronized across the workspace; injected from `Cargo.toml` at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_geohash_module_exists() {
        assert_eq!(geohash::encode(57.64911, 10.40744, 11), "u4pruydqqvj");
    }
}
