//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use crate::resolver::ResolverConfig;
use crate::spawn::SpawnConfig;
use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub tiles: TileSettings,
    /// `[resolver]` maps directly onto the resolver tunables
    pub resolver: ResolverConfig,
    /// `[spawn]` maps directly onto the spawn tunables
    pub spawn: SpawnConfig,
    pub mappings: MappingSettings,
    pub logging: LoggingSettings,
}

/// Tile database settings.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSettings {
    /// Path to the SQLite tile database
    pub database: PathBuf,
    /// Directory the database is copied into before opening; opened in place when unset
    pub working_dir: Option<PathBuf>,
    /// Entries held by the lookup cache (0 disables caching)
    pub cache_capacity: usize,
}

/// Mapping table settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingSettings {
    /// Directory holding replacement mapping JSON files; the built-in tables
    /// are used when unset
    pub directory: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
