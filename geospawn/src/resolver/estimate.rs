//! Terminal estimate tier.
//!
//! Pure functions of the coordinate. Never return unknown values.

use crate::geo::{BiomeCode, BiomeData, GeologyData};

/// Confidence reported for estimated fields.
pub const ESTIMATE_CONFIDENCE: f64 = 0.1;

/// Lithology assumed when no tile has geology.
pub const DEFAULT_LITHOLOGY: &str = "mixed_sedimentary";

/// Latitude bands, poleward first: `(minimum |lat|, biome)`.
const LATITUDE_BANDS: [(f64, BiomeCode); 5] = [
    (66.0, BiomeCode::Tundra),
    (50.0, BiomeCode::Boreal),
    (35.0, BiomeCode::TemperateBroadleaf),
    (23.5, BiomeCode::Desert),
    (10.0, BiomeCode::TropicalGrassland),
];

/// Biome assumed between the equator and the innermost band.
const EQUATORIAL_BIOME: BiomeCode = BiomeCode::TropicalMoistForest;

/// Rough continental extent of a biogeographic realm.
struct RealmBox {
    realm: &'static str,
    min_lat: f64,
    max_lat: f64,
    min_lng: f64,
    max_lng: f64,
}

impl RealmBox {
    const fn new(realm: &'static str, lat: (f64, f64), lng: (f64, f64)) -> Self {
        Self {
            realm,
            min_lat: lat.0,
            max_lat: lat.1,
            min_lng: lng.0,
            max_lng: lng.1,
        }
    }

    fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lng >= self.min_lng && lng <= self.max_lng
    }
}

/// Checked in order; the first box containing the point wins.
const REALM_BOXES: [RealmBox; 11] = [
    RealmBox::new("Antarctic", (-90.0, -60.0), (-180.0, 180.0)),
    RealmBox::new("Nearctic", (23.0, 84.0), (-170.0, -52.0)),
    // Greenland
    RealmBox::new("Nearctic", (59.0, 84.0), (-74.0, -10.0)),
    RealmBox::new("Neotropic", (-56.0, 23.0), (-118.0, -34.0)),
    RealmBox::new("Indomalayan", (-11.0, 30.0), (65.0, 125.0)),
    RealmBox::new("Australasia", (-48.0, 0.0), (110.0, 180.0)),
    RealmBox::new("Afrotropic", (-35.0, 18.0), (-18.0, 52.0)),
    RealmBox::new("Palearctic", (18.0, 82.0), (-25.0, 180.0)),
    RealmBox::new("Oceania", (-30.0, 30.0), (150.0, 180.0)),
    RealmBox::new("Oceania", (-30.0, 30.0), (-180.0, -120.0)),
    // Arabian peninsula south of the Palearctic box
    RealmBox::new("Afrotropic", (12.0, 18.0), (42.0, 60.0)),
];

/// Biome implied by latitude alone.
pub fn estimate_biome_type(lat: f64) -> BiomeCode {
    let abs_lat = lat.abs();
    LATITUDE_BANDS
        .iter()
        .find(|(min, _)| abs_lat >= *min)
        .map(|(_, biome)| *biome)
        .unwrap_or(EQUATORIAL_BIOME)
}

/// Realm whose continental box contains the point.
///
/// `None` over open ocean outside every box.
pub fn estimate_realm(lat: f64, lng: f64) -> Option<&'static str> {
    let lng = crate::geohash::wrap_longitude(lng);
    REALM_BOXES
        .iter()
        .find(|b| b.contains(lat, lng))
        .map(|b| b.realm)
}

pub fn estimate_geology() -> GeologyData {
    GeologyData::new(DEFAULT_LITHOLOGY, ESTIMATE_CONFIDENCE)
}

pub fn estimate_biome(lat: f64, lng: f64) -> BiomeData {
    let biome = BiomeData::new(estimate_biome_type(lat), ESTIMATE_CONFIDENCE);
    match estimate_realm(lat, lng) {
        Some(realm) => biome.with_realm(realm),
        None => biome,
    }
}
