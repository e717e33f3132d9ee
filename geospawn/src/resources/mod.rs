//! Spawnable resource definitions.
//!
//! [`ResourceCatalog`] holds every stone, wood and food a spawn may produce.
//! Mapping tables refer to these ids, and rarity-weighted fallback selection
//! draws from a whole type.

mod catalog;
mod types;

pub use catalog::ResourceCatalog;
pub use types::{CatalogError, ResourceDefinition, ResourceType};
