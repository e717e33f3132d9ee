//! Geology and biome → resource mappings.
//!
//! Stones are keyed by lithology name. Woods and foods are keyed by a
//! composite realm+biome code such as `"PA04"` (Palearctic temperate
//! broadleaf). Missing keys are expected; callers fall back to
//! rarity-weighted selection.

mod codes;
mod tables;

pub use codes::{composite_code, realm_code};
pub use tables::{
    MappingError, MappingTables, WeightedMapping, LITHOLOGY_STONE_FILE, REALM_BIOME_FOOD_FILE,
    REALM_BIOME_WOOD_FILE,
};
