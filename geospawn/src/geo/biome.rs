//! Biome classification codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Terrestrial biome classification.
///
/// The fourteen WWF terrestrial biomes plus [`BiomeCode::Unknown`], the
/// sentinel for "no usable data". Each known biome has a stable snake_case
/// name (its storage form in the tile database) and a two-digit number used to
/// build realm+biome mapping codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiomeCode {
    TropicalMoistForest,
    TropicalDryForest,
    TropicalConiferousForest,
    TemperateBroadleaf,
    TemperateConifer,
    Boreal,
    TropicalGrassland,
    TemperateGrassland,
    FloodedGrassland,
    Montane,
    Tundra,
    Mediterranean,
    Desert,
    Mangrove,
    Unknown,
}

impl BiomeCode {
    /// All known biomes in numeric order (excludes `Unknown`).
    pub const KNOWN: [BiomeCode; 14] = [
        BiomeCode::TropicalMoistForest,
        BiomeCode::TropicalDryForest,
        BiomeCode::TropicalConiferousForest,
        BiomeCode::TemperateBroadleaf,
        BiomeCode::TemperateConifer,
        BiomeCode::Boreal,
        BiomeCode::TropicalGrassland,
        BiomeCode::TemperateGrassland,
        BiomeCode::FloodedGrassland,
        BiomeCode::Montane,
        BiomeCode::Tundra,
        BiomeCode::Mediterranean,
        BiomeCode::Desert,
        BiomeCode::Mangrove,
    ];

    /// Storage name of the biome.
    pub fn as_str(&self) -> &'static str {
        match self {
            BiomeCode::TropicalMoistForest => "tropical_moist_forest",
            BiomeCode::TropicalDryForest => "tropical_dry_forest",
            BiomeCode::TropicalConiferousForest => "tropical_coniferous_forest",
            BiomeCode::TemperateBroadleaf => "temperate_broadleaf",
            BiomeCode::TemperateConifer => "temperate_conifer",
            BiomeCode::Boreal => "boreal",
            BiomeCode::TropicalGrassland => "tropical_grassland",
            BiomeCode::TemperateGrassland => "temperate_grassland",
            BiomeCode::FloodedGrassland => "flooded_grassland",
            BiomeCode::Montane => "montane",
            BiomeCode::Tundra => "tundra",
            BiomeCode::Mediterranean => "mediterranean",
            BiomeCode::Desert => "desert",
            BiomeCode::Mangrove => "mangrove",
            BiomeCode::Unknown => "unknown",
        }
    }

    /// Two-digit biome number (1-14), `None` for `Unknown`.
    pub fn number(&self) -> Option<u8> {
        BiomeCode::KNOWN
            .iter()
            .position(|b| b == self)
            .map(|index| index as u8 + 1)
    }

    /// Inverse of [`BiomeCode::number`].
    pub fn from_number(number: u8) -> Option<BiomeCode> {
        BiomeCode::KNOWN.get((number as usize).checked_sub(1)?).copied()
    }

    #[inline]
    pub fn is_known(&self) -> bool {
        *self != BiomeCode::Unknown
    }

    /// Parses a storage name, mapping anything unrecognised to `Unknown`.
    pub fn parse_lenient(s: &str) -> BiomeCode {
        s.parse().unwrap_or(BiomeCode::Unknown)
    }
}

impl fmt::Display for BiomeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BiomeCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        std::iter::once(BiomeCode::Unknown)
            .chain(BiomeCode::KNOWN)
            .find(|b| b.as_str() == normalized)
            .ok_or_else(|| format!("unknown biome code '{}'", s))
    }
}
