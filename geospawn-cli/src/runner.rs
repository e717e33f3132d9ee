//! CLI runner for common setup and operations.
//!
//! Encapsulates configuration loading, logging initialization and service
//! creation to reduce duplication across command handlers.

use crate::error::CliError;
use geospawn::config::{config_file_path, ConfigFile, DEFAULT_LOG_FILE};
use geospawn::log::TracingLogger;
use geospawn::logging::{init_logging_with, LoggingGuard};
use geospawn::service::GeoSpawn;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Keeps the log file writer alive while the runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    config: ConfigFile,
}

impl CliRunner {
    /// Load the configuration and initialize logging.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Config file to load instead of ~/.geospawn/config.ini
    /// * `verbose` - Also log to stderr at debug level
    pub fn new(config_path: Option<&Path>, verbose: bool) -> Result<Self, CliError> {
        let config = load_config(config_path)?;

        let log_path = &config.logging.file;
        let log_dir = log_path
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|| ".".to_string());
        let log_file = log_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

        let logging_guard = init_logging_with(&log_dir, &log_file, verbose, verbose)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("GeoSpawn v{}", geospawn::VERSION);
        info!("GeoSpawn CLI: {} command", command);
    }

    /// Build the services from the loaded configuration.
    pub fn create_geospawn(&self) -> Result<GeoSpawn, CliError> {
        // Library logging goes through tracing
        let logger = Arc::new(TracingLogger::new());
        GeoSpawn::from_config(&self.config, logger)
            .map_err(CliError::ServiceCreation)
            .inspect(|_| info!("Services created"))
    }
}

/// Path of the config file a command should use.
pub fn resolve_config_path(config_path: Option<&Path>) -> PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config_file_path)
}

/// Load the config file, falling back to defaults when it doesn't exist.
pub fn load_config(config_path: Option<&Path>) -> Result<ConfigFile, CliError> {
    Ok(ConfigFile::load_from(&resolve_config_path(config_path))?)
}
