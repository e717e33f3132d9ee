//! Resource spawning.
//!
//! - [`select_weighted`]: weighted random pick with uniform degradation
//! - [`ResourceSelector`]: mapping-driven selection policy and spawn loop
//! - [`SpawnConfig`]: spawn composition tunables

mod config;
mod select;
mod selector;

pub use config::{
    SpawnConfig, SpawnConfigUpdate, DEFAULT_COUNT_MAX, DEFAULT_COUNT_MIN, DEFAULT_FOOD_RATIO,
    DEFAULT_SECONDARY_LITHOLOGY_CHANCE, DEFAULT_STONE_RATIO, MAX_SPAWN_COUNT,
    MIN_SELECTION_CONFIDENCE,
};
pub use select::{roll_quantity, select_weighted};
pub use selector::{ResourceSelector, ResourceSpawn};
