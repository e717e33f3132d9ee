//! Location lookups.

use crate::geo::LocationGeoData;
use crate::geohash::GeohashBounds;
use crate::resolver::FallbackResolver;
use crate::tiles::TileStore;
use std::sync::Arc;

/// Answers "what is the geology and biome here?".
///
/// Owns the resolver (and through it the tile store). Construct once and
/// share by reference or `Arc`; every method takes `&self`.
pub struct GeoDataService {
    resolver: FallbackResolver,
}

impl GeoDataService {
    pub fn new(resolver: FallbackResolver) -> Self {
        Self { resolver }
    }

    /// Open the tile store now instead of on the first lookup.
    ///
    /// Returns false if the store could not be opened; lookups still succeed
    /// from estimates.
    pub fn initialize(&self) -> bool {
        self.resolver.store().initialize()
    }

    /// Best-effort geology and biome for a coordinate. Never fails.
    pub fn get_location_data(&self, lat: f64, lng: f64) -> LocationGeoData {
        self.resolver.resolve(lat, lng)
    }

    /// Resolve many geohashes with a bounded number of store queries.
    pub fn get_location_data_batch(&self, geohashes: &[String]) -> Vec<LocationGeoData> {
        self.resolver.resolve_batch(geohashes)
    }

    /// Resolve every detailed cell covering `bounds`.
    pub fn get_location_data_in_bounds(&self, bounds: &GeohashBounds) -> Vec<LocationGeoData> {
        self.resolver.resolve_bounds(bounds)
    }

    pub fn resolver(&self) -> &FallbackResolver {
        &self.resolver
    }

    pub fn store(&self) -> &Arc<TileStore> {
        self.resolver.store()
    }

    /// Forget memoized lookups.
    pub fn clear_cache(&self) {
        self.resolver.store().clear_cache();
    }

    /// Release the tile store; the next lookup reopens it.
    pub fn close(&self) {
        self.resolver.store().close();
    }
}
