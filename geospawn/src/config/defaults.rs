//! Default values and the `ConfigFile::default()` implementation.

use super::settings::*;
use crate::resolver::ResolverConfig;
use crate::spawn::SpawnConfig;
use crate::tiles::DEFAULT_CACHE_CAPACITY;

/// Tile database file name inside the config directory.
pub const DEFAULT_DATABASE_FILE: &str = "geotiles.db";

/// Log file name inside the log directory.
pub const DEFAULT_LOG_FILE: &str = "geospawn.log";

impl Default for ConfigFile {
    fn default() -> Self {
        let config_dir = super::file::config_directory();

        Self {
            tiles: TileSettings {
                database: config_dir.join(DEFAULT_DATABASE_FILE),
                working_dir: None,
                cache_capacity: DEFAULT_CACHE_CAPACITY,
            },
            resolver: ResolverConfig::default(),
            spawn: SpawnConfig::default(),
            mappings: MappingSettings::default(),
            logging: LoggingSettings {
                file: config_dir.join("logs").join(DEFAULT_LOG_FILE),
            },
        }
    }
}
