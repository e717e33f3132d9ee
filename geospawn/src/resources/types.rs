//! Resource definition types.

use crate::altitude::AltitudePreference;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Kind of spawnable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Stone,
    Wood,
    Food,
}

impl ResourceType {
    pub const ALL: [ResourceType; 3] = [
        ResourceType::Stone,
        ResourceType::Wood,
        ResourceType::Food,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Stone => "stone",
            ResourceType::Wood => "wood",
            ResourceType::Food => "food",
        }
    }

    /// Catalog file holding definitions of this type.
    pub fn catalog_file(&self) -> &'static str {
        match self {
            ResourceType::Stone => "stones.json",
            ResourceType::Wood => "woods.json",
            ResourceType::Food => "foods.json",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stone" => Ok(ResourceType::Stone),
            "wood" => Ok(ResourceType::Wood),
            "food" => Ok(ResourceType::Food),
            other => Err(format!("unknown resource type '{}'", other)),
        }
    }
}

/// One entry of the static resource tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceDefinition {
    pub id: String,
    pub name: String,
    pub resource_type: ResourceType,
    /// Commonness in `[0, 1]`; higher spawns more often and in larger stacks
    pub rarity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<AltitudePreference>,
    /// Usable for knapping tools (stones only)
    pub toolstone: bool,
}

/// On-disk form of a definition; the type comes from the file it is in.
#[derive(Debug, Deserialize)]
pub(super) struct DefinitionEntry {
    pub id: String,
    pub name: String,
    pub rarity: f64,
    #[serde(default)]
    pub altitude: Option<AltitudePreference>,
    #[serde(default)]
    pub toolstone: bool,
}

impl DefinitionEntry {
    pub(super) fn into_definition(self, resource_type: ResourceType) -> ResourceDefinition {
        ResourceDefinition {
            id: self.id,
            name: self.name,
            resource_type,
            rarity: self.rarity,
            altitude: self.altitude,
            toolstone: self.toolstone,
        }
    }
}

/// Errors loading a resource catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed {resource_type} catalog: {source}")]
    Parse {
        resource_type: ResourceType,
        #[source]
        source: serde_json::Error,
    },

    /// Every type must have at least one definition
    #[error("The {0} catalog is empty")]
    EmptyType(ResourceType),

    #[error("Duplicate {resource_type} id '{id}'")]
    DuplicateId {
        resource_type: ResourceType,
        id: String,
    },

    #[error("Invalid {resource_type} '{id}': {reason}")]
    InvalidDefinition {
        resource_type: ResourceType,
        id: String,
        reason: String,
    },
}
