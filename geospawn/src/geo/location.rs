//! Resolved, caller-facing location answer.

use super::{BiomeData, GeologyData};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which resolution tier produced a field.
///
/// Ordered from most to least trustworthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionTier {
    /// Tile at the requested geohash
    Detailed,
    /// Aggregated tile at the coarse prefix
    Coarse,
    /// Tile found by the ring search around the requested geohash
    Nearby,
    /// Synthesised from latitude and coordinate rules
    Estimated,
}

impl fmt::Display for ResolutionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResolutionTier::Detailed => "detailed",
            ResolutionTier::Coarse => "coarse",
            ResolutionTier::Nearby => "nearby",
            ResolutionTier::Estimated => "estimated",
        };
        f.write_str(name)
    }
}

/// Provenance tag reported for a whole [`LocationGeoData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Detailed,
    Coarse,
    Fallback,
}

impl DataSource {
    /// Derives the overall tag from the least trustworthy field tier.
    pub fn from_tiers(geology: ResolutionTier, biome: ResolutionTier) -> Self {
        match geology.max(biome) {
            ResolutionTier::Detailed => DataSource::Detailed,
            ResolutionTier::Coarse => DataSource::Coarse,
            ResolutionTier::Nearby | ResolutionTier::Estimated => DataSource::Fallback,
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Detailed => write!(f, "detailed"),
            DataSource::Coarse => write!(f, "coarse"),
            DataSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// Per-field resolution tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub geology: ResolutionTier,
    pub biome: ResolutionTier,
}

/// Best-effort geology and biome for a location.
///
/// Both fields are always known (never the `"unknown"` sentinel).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationGeoData {
    /// Geohash the answer was resolved for
    pub geohash: String,
    pub geology: GeologyData,
    pub biome: BiomeData,
    pub data_source: DataSource,
    pub provenance: Provenance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_source_from_tiers() {
        use ResolutionTier::*;
        assert_eq!(DataSource::from_tiers(Detailed, Detailed), DataSource::Detailed);
        assert_eq!(DataSource::from_tiers(Detailed, Coarse), DataSource::Coarse);
        assert_eq!(DataSource::from_tiers(Coarse, Coarse), DataSource::Coarse);
        assert_eq!(DataSource::from_tiers(Nearby, Detailed), DataSource::Fallback);
        assert_eq!(DataSource::from_tiers(Coarse, Estimated), DataSource::Fallback);
    }

    #[test]
    fn test_data_source_display() {
        assert_eq!(DataSource::Detailed.to_string(), "detailed");
        assert_eq!(DataSource::Fallback.to_string(), "fallback");
        assert_eq!(ResolutionTier::Nearby.to_string(), "nearby");
    }
}
