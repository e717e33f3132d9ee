//! Geology and biome data model.
//!
//! [`GeoTile`] is the unit stored in the tile database; [`LocationGeoData`]
//! is the resolved answer handed to callers.

mod biome;
mod location;
mod tile;

pub use biome::BiomeCode;
pub use location::{DataSource, LocationGeoData, Provenance, ResolutionTier};
pub use tile::{BiomeData, GeoTile, GeologyData, UNKNOWN_LITHOLOGY};
