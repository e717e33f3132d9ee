//! Weighted mapping tables.

use super::composite_code;
use crate::geo::BiomeCode;
use crate::resources::{ResourceCatalog, ResourceType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use thiserror::Error;

pub const LITHOLOGY_STONE_FILE: &str = "lithology_stone.json";
pub const REALM_BIOME_WOOD_FILE: &str = "realm_biome_wood.json";
pub const REALM_BIOME_FOOD_FILE: &str = "realm_biome_food.json";

const BUILTIN_STONE: &str = include_str!("../../data/mappings/lithology_stone.json");
const BUILTIN_WOOD: &str = include_str!("../../data/mappings/realm_biome_wood.json");
const BUILTIN_FOOD: &str = include_str!("../../data/mappings/realm_biome_food.json");

/// Candidate resource ids with relative weights.
///
/// Weights need not sum to 1. A length mismatch is tolerated here and
/// degrades to uniform selection when drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedMapping {
    #[serde(rename = "resourceIds")]
    pub resource_ids: Vec<String>,
    #[serde(default)]
    pub weights: Vec<f64>,
}

impl WeightedMapping {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let (resource_ids, weights) = entries
            .into_iter()
            .map(|(id, w)| (id.into(), w))
            .unzip();
        Self {
            resource_ids,
            weights,
        }
    }

    /// Returns true if every id has exactly one weight.
    pub fn is_consistent(&self) -> bool {
        self.resource_ids.len() == self.weights.len()
    }

    pub fn len(&self) -> usize {
        self.resource_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resource_ids.is_empty()
    }
}

/// Errors loading mapping tables from files.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("Failed to read mapping file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed mapping table {table}: {source}")]
    Parse {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

type Table = HashMap<String, WeightedMapping>;

/// Lithology → stone and realm+biome → wood / food tables.
///
/// Lithology keys are matched case-insensitively; composite codes are stored
/// uppercase.
#[derive(Debug, Clone, Default)]
pub struct MappingTables {
    stone: Table,
    wood: Table,
    food: Table,
}

impl MappingTables {
    /// The tables compiled into the crate, parsed once per process.
    pub fn builtin() -> Arc<MappingTables> {
        static TABLES: OnceLock<Arc<MappingTables>> = OnceLock::new();
        Arc::clone(TABLES.get_or_init(|| {
            Arc::new(
                MappingTables::from_json(BUILTIN_STONE, BUILTIN_WOOD, BUILTIN_FOOD)
                    .expect("embedded mapping tables are valid"),
            )
        }))
    }

    pub fn from_json(stone: &str, wood: &str, food: &str) -> Result<Self, MappingError> {
        Ok(Self {
            stone: parse_table(LITHOLOGY_STONE_FILE, stone, str::to_ascii_lowercase)?,
            wood: parse_table(REALM_BIOME_WOOD_FILE, wood, str::to_ascii_uppercase)?,
            food: parse_table(REALM_BIOME_FOOD_FILE, food, str::to_ascii_uppercase)?,
        })
    }

    /// Load the three table files from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Self, MappingError> {
        let read = |file: &str| {
            let path = dir.join(file);
            fs::read_to_string(&path).map_err(|source| MappingError::Io { path, source })
        };
        Self::from_json(
            &read(LITHOLOGY_STONE_FILE)?,
            &read(REALM_BIOME_WOOD_FILE)?,
            &read(REALM_BIOME_FOOD_FILE)?,
        )
    }

    pub fn stone_for_lithology(&self, lithology: &str) -> Option<&WeightedMapping> {
        self.stone.get(&lithology.trim().to_ascii_lowercase())
    }

    pub fn wood_for(&self, realm: &str, biome: BiomeCode) -> Option<&WeightedMapping> {
        self.wood.get(&composite_code(realm, biome)?)
    }

    pub fn food_for(&self, realm: &str, biome: BiomeCode) -> Option<&WeightedMapping> {
        self.food.get(&composite_code(realm, biome)?)
    }

    /// Lookup by composite code (e.g. `"NA06"`).
    pub fn by_code(&self, resource_type: ResourceType, code: &str) -> Option<&WeightedMapping> {
        match resource_type {
            ResourceType::Stone => self.stone.get(&code.to_ascii_lowercase()),
            ResourceType::Wood => self.wood.get(&code.to_ascii_uppercase()),
            ResourceType::Food => self.food.get(&code.to_ascii_uppercase()),
        }
    }

    /// Number of keys in the table for a type.
    pub fn table_len(&self, resource_type: ResourceType) -> usize {
        self.table(resource_type).len()
    }

    /// Mapping entries naming ids missing from `catalog`, as `(type, key, id)`.
    ///
    /// Sorted for stable reporting.
    pub fn missing_ids(&self, catalog: &ResourceCatalog) -> Vec<(ResourceType, String, String)> {
        let mut missing: Vec<_> = ResourceType::ALL
            .iter()
            .flat_map(|&ty| {
                self.table(ty).iter().flat_map(move |(key, mapping)| {
                    mapping
                        .resource_ids
                        .iter()
                        .filter(move |id| !catalog.contains(ty, id))
                        .map(move |id| (ty, key.clone(), id.clone()))
                })
            })
            .collect();
        missing.sort();
        missing
    }

    fn table(&self, resource_type: ResourceType) -> &Table {
        match resource_type {
            ResourceType::Stone => &self.stone,
            ResourceType::Wood => &self.wood,
            ResourceType::Food => &self.food,
        }
    }
}

fn parse_table(
    table: &'static str,
    json: &str,
    normalize: fn(&str) -> String,
) -> Result<Table, MappingError> {
    let raw: Table = serde_json::from_str(json)
        .map_err(|source| MappingError::Parse { table, source })?;
    Ok(raw
        .into_iter()
        .map(|(key, mapping)| (normalize(key.trim()), mapping))
        .collect())
}
