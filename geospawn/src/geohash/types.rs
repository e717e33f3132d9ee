//! Geohash type definitions

use thiserror::Error;

/// Base-32 alphabet used by geohash strings (no `a`, `i`, `l`, `o`).
pub const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Valid latitude range
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range
pub const MIN_LNG: f64 = -180.0;
pub const MAX_LNG: f64 = 180.0;

/// Longest precision with a tabulated cell size.
pub const MAX_PRECISION: usize = 12;

/// Cell sizes in kilometres (width, height) for precisions 1 through 12.
///
/// Geohash cells are not square: at odd total bit counts longitude receives
/// one more bit than latitude.
pub(super) const CELL_SIZE_KM: [(f64, f64); MAX_PRECISION] = [
    (5009.4, 4992.6),
    (1252.3, 624.1),
    (156.5, 156.0),
    (39.1, 19.5),
    (4.89, 4.89),
    (1.22, 0.61),
    (0.153, 0.152),
    (0.0382, 0.019),
    (0.00477, 0.00477),
    (0.0012, 0.000596),
    (0.000149, 0.000149),
    (0.0000372, 0.0000186),
];

/// Bounding box of a geohash cell in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeohashBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl GeohashBounds {
    /// The whole Earth extent, the starting box of every bisection.
    pub const WORLD: GeohashBounds = GeohashBounds {
        min_lat: MIN_LAT,
        max_lat: MAX_LAT,
        min_lng: MIN_LNG,
        max_lng: MAX_LNG,
    };

    /// Create bounds from explicit edges.
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// Centre of the box as `(lat, lng)`.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// Returns true if the point lies inside the box, edges included.
    #[inline]
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lng..=self.max_lng).contains(&lng)
    }

    /// Longitudinal extent in degrees.
    #[inline]
    pub fn width_deg(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    /// Latitudinal extent in degrees.
    #[inline]
    pub fn height_deg(&self) -> f64 {
        self.max_lat - self.min_lat
    }
}

/// Approximate real-world size of a cell at some precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    pub width_km: f64,
    pub height_km: f64,
}

/// Compass direction of a neighbouring cell.
///
/// [`Direction::ALL`] lists them in the order returned by
/// [`neighbors`](super::neighbors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    SouthWest,
    South,
    SouthEast,
    West,
    East,
    NorthWest,
    North,
    NorthEast,
}

impl Direction {
    /// All eight directions: sw, s, se, w, e, nw, n, ne.
    pub const ALL: [Direction; 8] = [
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
        Direction::West,
        Direction::East,
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
    ];

    /// Cell offset as `(rows north, columns east)`.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::SouthWest => (-1, -1),
            Direction::South => (-1, 0),
            Direction::SouthEast => (-1, 1),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
            Direction::NorthWest => (1, -1),
            Direction::North => (1, 0),
            Direction::NorthEast => (1, 1),
        }
    }
}

/// Errors from strict geohash validation.
///
/// The codec itself is lenient; these only arise from [`validate`](super::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeohashError {
    /// Geohash string is empty
    #[error("Geohash is empty")]
    Empty,

    /// Geohash contains a character outside the base-32 alphabet
    #[error("Invalid geohash character '{character}' at position {position} in '{geohash}'")]
    InvalidCharacter {
        geohash: String,
        character: char,
        position: usize,
    },
}
