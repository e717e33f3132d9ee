//! Tiered geology and biome resolution.
//!
//! Each field resolves independently through four tiers:
//!
//! 1. **Detailed**: the tile at the requested geohash
//! 2. **Coarse**: the aggregate tile at the coarse prefix
//! 3. **Nearby**: square rings around the requested cell, bounded by a ring
//!    count and a distance cap
//! 4. **Estimated**: latitude bands and continental boxes
//!
//! The estimate tier never yields unknown values, so resolution always
//! terminates with a usable answer.

mod estimate;

pub use estimate::{
    estimate_biome, estimate_biome_type, estimate_geology, estimate_realm, DEFAULT_LITHOLOGY,
    ESTIMATE_CONFIDENCE,
};

use crate::geo::{
    BiomeData, DataSource, GeoTile, GeologyData, LocationGeoData, Provenance, ResolutionTier,
};
use crate::geohash::{self, GeohashBounds};
use crate::log::Logger;
use crate::log_debug;
use crate::tiles::TileStore;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Precision of the tiles looked up for a coordinate.
pub const DEFAULT_DETAILED_PRECISION: usize = 5;

/// Precision of the aggregated fallback tiles.
pub const DEFAULT_COARSE_PRECISION: usize = 3;

/// Maximum rings searched around the detailed cell.
pub const DEFAULT_NEARBY_MAX_RINGS: u32 = 2;

/// Maximum distance of the ring search, in kilometres.
pub const DEFAULT_NEARBY_MAX_DISTANCE_KM: f64 = 200.0;

/// Resolver tunables.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    pub detailed_precision: usize,
    pub coarse_precision: usize,
    pub nearby_max_rings: u32,
    pub nearby_max_distance_km: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            detailed_precision: DEFAULT_DETAILED_PRECISION,
            coarse_precision: DEFAULT_COARSE_PRECISION,
            nearby_max_rings: DEFAULT_NEARBY_MAX_RINGS,
            nearby_max_distance_km: DEFAULT_NEARBY_MAX_DISTANCE_KM,
        }
    }
}

/// Keys consulted for one geohash, tier by tier.
#[derive(Debug)]
struct LookupPlan {
    detailed: String,
    coarse: Option<String>,
    rings: Vec<Vec<String>>,
}

/// Fields found so far while walking the tiers.
#[derive(Debug, Default)]
struct PartialResolution {
    geology: Option<(GeologyData, ResolutionTier)>,
    biome: Option<(BiomeData, ResolutionTier)>,
}

impl PartialResolution {
    /// Take any still-missing known field from `tile`.
    fn offer(&mut self, tile: &GeoTile, tier: ResolutionTier) {
        if self.geology.is_none() && tile.geology.is_known() {
            self.geology = Some((tile.geology.clone(), tier));
        }
        if self.biome.is_none() && tile.biome.is_known() {
            self.biome = Some((tile.biome.clone(), tier));
        }
    }

    fn is_complete(&self) -> bool {
        self.geology.is_some() && self.biome.is_some()
    }

    /// Fill the remaining fields from the estimate tier.
    fn finish(self, geohash: String, lat: f64, lng: f64) -> LocationGeoData {
        let (geology, geology_tier) = self
            .geology
            .unwrap_or_else(|| (estimate_geology(), ResolutionTier::Estimated));
        let (mut biome, biome_tier) = self
            .biome
            .unwrap_or_else(|| (estimate_biome(lat, lng), ResolutionTier::Estimated));

        if biome.realm.is_none() {
            biome.realm = estimate_realm(lat, lng).map(String::from);
        }

        LocationGeoData {
            geohash,
            geology,
            biome,
            data_source: DataSource::from_tiers(geology_tier, biome_tier),
            provenance: Provenance {
                geology: geology_tier,
                biome: biome_tier,
            },
        }
    }
}

/// Resolves coordinates and geohashes to [`LocationGeoData`].
///
/// Never fails: missing tiles and backend errors lead to the next tier.
pub struct FallbackResolver {
    store: Arc<TileStore>,
    config: ResolverConfig,
    logger: Arc<dyn Logger>,
}

impl FallbackResolver {
    pub fn new(store: Arc<TileStore>, config: ResolverConfig, logger: Arc<dyn Logger>) -> Self {
        Self {
            store,
            config,
            logger,
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<TileStore> {
        &self.store
    }

    /// Resolve the cell containing a coordinate at the detailed precision.
    pub fn resolve(&self, lat: f64, lng: f64) -> LocationGeoData {
        let geohash = geohash::encode(lat, lng, self.config.detailed_precision);
        self.resolve_at(geohash, lat, lng)
    }

    /// Resolve a geohash as given; estimates use its centre.
    pub fn resolve_geohash(&self, geohash: &str) -> LocationGeoData {
        let geohash = geohash::canonical(geohash);
        let (lat, lng) = geohash::decode(&geohash);
        self.resolve_at(geohash, lat, lng)
    }

    fn resolve_at(&self, geohash: String, lat: f64, lng: f64) -> LocationGeoData {
        let plan = self.plan(&geohash);
        let mut partial = PartialResolution::default();

        if let Some(tile) = self.store.get_tile(&plan.detailed) {
            partial.offer(&tile, ResolutionTier::Detailed);
        }

        if !partial.is_complete() {
            if let Some(tile) = plan.coarse.as_deref().and_then(|c| self.store.get_tile(c)) {
                partial.offer(&tile, ResolutionTier::Coarse);
            }
        }

        for ring in &plan.rings {
            if partial.is_complete() {
                break;
            }
            for tile in self.store.get_tiles(ring) {
                partial.offer(&tile, ResolutionTier::Nearby);
            }
        }

        if !partial.is_complete() {
            log_debug!(
                self.logger,
                "No tile data near {}, estimating from coordinates",
                geohash
            );
        }
        partial.finish(geohash, lat, lng)
    }

    /// Resolve many geohashes with one batched tile query per tier.
    ///
    /// Results are in input order, one per input (duplicates included).
    pub fn resolve_batch(&self, geohashes: &[String]) -> Vec<LocationGeoData> {
        let plans: Vec<LookupPlan> = geohashes
            .iter()
            .map(|g| self.plan(&geohash::canonical(g)))
            .collect();
        let mut partials: Vec<PartialResolution> =
            plans.iter().map(|_| PartialResolution::default()).collect();

        // Detailed tier
        let keys = unique(plans.iter().map(|p| p.detailed.as_str()));
        let tiles = index_by_geohash(self.store.get_tiles(&keys));
        for (plan, partial) in plans.iter().zip(partials.iter_mut()) {
            if let Some(tile) = tiles.get(&plan.detailed) {
                partial.offer(tile, ResolutionTier::Detailed);
            }
        }

        // Coarse tier
        let keys = unique(
            plans
                .iter()
                .zip(&partials)
                .filter(|(_, partial)| !partial.is_complete())
                .filter_map(|(plan, _)| plan.coarse.as_deref()),
        );
        if !keys.is_empty() {
            let tiles = index_by_geohash(self.store.get_tiles(&keys));
            for (plan, partial) in plans.iter().zip(partials.iter_mut()) {
                if partial.is_complete() {
                    continue;
                }
                if let Some(tile) = plan.coarse.as_ref().and_then(|c| tiles.get(c)) {
                    partial.offer(tile, ResolutionTier::Coarse);
                }
            }
        }

        // Nearby tier: every ring cell of every incomplete plan in one query
        let keys = unique(
            plans
                .iter()
                .zip(&partials)
                .filter(|(_, partial)| !partial.is_complete())
                .flat_map(|(plan, _)| plan.rings.iter().flatten().map(String::as_str)),
        );
        if !keys.is_empty() {
            let tiles = index_by_geohash(self.store.get_tiles(&keys));
            for (plan, partial) in plans.iter().zip(partials.iter_mut()) {
                for cell in plan.rings.iter().flatten() {
                    if partial.is_complete() {
                        break;
                    }
                    if let Some(tile) = tiles.get(cell) {
                        partial.offer(tile, ResolutionTier::Nearby);
                    }
                }
            }
        }

        plans
            .into_iter()
            .zip(partials)
            .map(|(plan, partial)| {
                let (lat, lng) = geohash::decode(&plan.detailed);
                partial.finish(plan.detailed, lat, lng)
            })
            .collect()
    }

    /// Resolve every detailed cell covering a bounding box.
    pub fn resolve_bounds(&self, bounds: &GeohashBounds) -> Vec<LocationGeoData> {
        let cells: Vec<String> = geohash::coverage(bounds, self.config.detailed_precision)
            .into_iter()
            .collect();
        log_debug!(
            self.logger,
            "Resolving {} cells for viewport {:?}",
            cells.len(),
            bounds
        );
        self.resolve_batch(&cells)
    }

    fn plan(&self, detailed: &str) -> LookupPlan {
        let precision = geohash::precision_of(detailed);

        let coarse = (precision > self.config.coarse_precision)
            .then(|| geohash::parent(detailed, self.config.coarse_precision));

        let ring_height_km = geohash::cell_size(precision).height_km;
        let rings = (1..=self.config.nearby_max_rings)
            .take_while(|ring| {
                *ring as f64 * ring_height_km <= self.config.nearby_max_distance_km
            })
            .map(|ring| geohash::ring(detailed, ring))
            .collect();

        LookupPlan {
            detailed: detailed.to_string(),
            coarse,
            rings,
        }
    }
}

fn unique<'a, I>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    keys.into_iter()
        .filter(|k| !k.is_empty() && seen.insert(*k))
        .map(String::from)
        .collect()
}

fn index_by_geohash(tiles: Vec<GeoTile>) -> HashMap<String, GeoTile> {
    tiles.into_iter().map(|t| (t.geohash.clone(), t)).collect()
}

#[cfg(test)]
mod tests;
