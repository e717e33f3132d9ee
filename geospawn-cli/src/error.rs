//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use geospawn::config::ConfigFileError;
use geospawn::geohash::GeohashError;
use geospawn::service::ServiceError;
use geospawn::tiles::TileStoreError;
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file could not be read or written
    Config(ConfigFileError),
    /// Failed to create the services
    ServiceCreation(ServiceError),
    /// Tile database could not be opened or read
    Database(TileStoreError),
    /// Malformed geohash argument
    Geohash(GeohashError),
    /// Argument outside its accepted range
    InvalidArgument(String),
    /// Failed to render output
    Output(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Database(TileStoreError::NotFound(_)) => {
                eprintln!();
                eprintln!("Set the tile database path in config.ini:");
                eprintln!("  [tiles]");
                eprintln!("  database = /path/to/geotiles.db");
            }
            CliError::Config(ConfigFileError::InvalidValue { .. }) => {
                eprintln!();
                eprintln!("Run 'geospawn config init --force' to write a fresh default file.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::ServiceCreation(e) => write!(f, "Failed to create service: {}", e),
            CliError::Database(e) => write!(f, "Tile database error: {}", e),
            CliError::Geohash(e) => write!(f, "{}", e),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Output(msg) => write!(f, "Failed to write output: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::ServiceCreation(e) => Some(e),
            CliError::Database(e) => Some(e),
            CliError::Geohash(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<ServiceError> for CliError {
    fn from(e: ServiceError) -> Self {
        CliError::ServiceCreation(e)
    }
}

impl From<TileStoreError> for CliError {
    fn from(e: TileStoreError) -> Self {
        CliError::Database(e)
    }
}

impl From<GeohashError> for CliError {
    fn from(e: GeohashError) -> Self {
        CliError::Geohash(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e.to_string())
    }
}
