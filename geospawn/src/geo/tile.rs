//! Tile payload types.

use super::BiomeCode;
use serde::{Deserialize, Serialize};

/// Sentinel lithology meaning "no usable data".
pub const UNKNOWN_LITHOLOGY: &str = "unknown";

/// Geological description of a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeologyData {
    /// Dominant rock-type class (e.g. `acid_plutonic`), or `"unknown"`
    pub primary_lithology: String,
    /// Other classes present, most common first
    #[serde(default)]
    pub secondary_lithologies: Vec<String>,
    /// Fraction of source records agreeing with the primary class (0.0-1.0)
    pub confidence: f64,
}

impl GeologyData {
    pub fn new(primary_lithology: impl Into<String>, confidence: f64) -> Self {
        Self {
            primary_lithology: primary_lithology.into(),
            secondary_lithologies: Vec::new(),
            confidence,
        }
    }

    /// Geology with no usable data.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_LITHOLOGY, 0.0)
    }

    /// Adds secondary lithologies.
    pub fn with_secondary<I, S>(mut self, secondary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.secondary_lithologies = secondary.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if the primary lithology is usable.
    pub fn is_known(&self) -> bool {
        let primary = self.primary_lithology.trim();
        !primary.is_empty() && !primary.eq_ignore_ascii_case(UNKNOWN_LITHOLOGY)
    }
}

/// Biome description of a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomeData {
    /// Biome classification
    #[serde(rename = "type")]
    pub biome_type: BiomeCode,
    /// Biogeographic realm name (e.g. "Palearctic")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
    /// Ecoregion identifier within the realm+biome combination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecoregion_id: Option<u32>,
    /// Fraction of source records agreeing with the biome (0.0-1.0)
    pub confidence: f64,
}

impl BiomeData {
    pub fn new(biome_type: BiomeCode, confidence: f64) -> Self {
        Self {
            biome_type,
            realm: None,
            ecoregion_id: None,
            confidence,
        }
    }

    /// Biome with no usable data.
    pub fn unknown() -> Self {
        Self::new(BiomeCode::Unknown, 0.0)
    }

    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    /// Sets the ecoregion; zero is not a valid identifier and is ignored.
    pub fn with_ecoregion(mut self, ecoregion_id: u32) -> Self {
        self.ecoregion_id = (ecoregion_id > 0).then_some(ecoregion_id);
        self
    }

    #[inline]
    pub fn is_known(&self) -> bool {
        self.biome_type.is_known()
    }
}

/// Geology and biome of one geohash cell, as stored in the tile database.
///
/// Tiles exist at several precisions; a coarse tile is the plurality-vote
/// aggregate of the finer tiles beneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoTile {
    pub geohash: String,
    pub geology: GeologyData,
    pub biome: BiomeData,
}

impl GeoTile {
    pub fn new(geohash: impl Into<String>, geology: GeologyData, biome: BiomeData) -> Self {
        Self {
            geohash: geohash.into(),
            geology,
            biome,
        }
    }
}
