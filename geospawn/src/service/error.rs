//! Service error types.

use crate::config::ConfigFileError;
use crate::mapping::MappingError;
use crate::resources::CatalogError;
use thiserror::Error;

/// Errors raised while assembling the services.
///
/// Lookups and spawns never fail once a [`GeoSpawn`](super::GeoSpawn) exists;
/// these only arise from construction.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Configuration file could not be read or holds an invalid value
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigFileError),

    /// Mapping tables could not be loaded
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// Resource catalog could not be loaded
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A required component was not supplied to the builder
    #[error("Missing component: {0}")]
    MissingComponent(&'static str),
}
