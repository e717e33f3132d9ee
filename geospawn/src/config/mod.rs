//! Configuration file for GeoSpawn (`~/.geospawn/config.ini`).
//!
//! ```
//! use geospawn::config::ConfigFile;
//!
//! let config = ConfigFile::default();
//! assert_eq!(config.resolver.detailed_precision, 5);
//! assert_eq!(config.spawn.count_min, 3);
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{DEFAULT_DATABASE_FILE, DEFAULT_LOG_FILE};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ConfigFile, LoggingSettings, MappingSettings, TileSettings};
