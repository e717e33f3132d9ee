//! Geohash codec
//!
//! Converts between geographic coordinates (latitude/longitude) and base-32
//! geohash strings, and provides the cell topology used for tile lookups:
//! bounding boxes, neighbouring cells, square rings of cells and bounding-box
//! coverage.
//!
//! A geohash interleaves a binary subdivision of longitude (even bits) and
//! latitude (odd bits) starting from the whole Earth, packing five bits into
//! each output symbol. Longer strings denote smaller cells.
//!
//! The codec is lenient: out-of-range coordinates still encode (they land in
//! whichever half each comparison selects) and unknown characters are skipped
//! when decoding. Use [`validate`] where strict input checking is wanted.

mod types;

pub use types::{
    CellSize, Direction, GeohashBounds, GeohashError, BASE32, MAX_LAT, MAX_LNG, MAX_PRECISION,
    MIN_LAT, MIN_LNG,
};

use std::collections::{BTreeSet, HashSet};
use types::CELL_SIZE_KM;

/// Fraction of a cell's size used as the sampling step by [`coverage`].
pub const COVERAGE_STEP_FACTOR: f64 = 0.8;

/// Kilometres per degree, used beyond the tabulated precisions.
const KM_PER_DEG_LNG: f64 = 111.32;
const KM_PER_DEG_LAT: f64 = 110.57;

/// Encodes a coordinate as a geohash of `precision` characters.
///
/// # Arguments
///
/// * `lat` - Latitude in degrees (-90.0 to 90.0)
/// * `lng` - Longitude in degrees (-180.0 to 180.0)
/// * `precision` - Number of output characters
#[inline]
pub fn encode(lat: f64, lng: f64, precision: usize) -> String {
    let mut lat_range = (MIN_LAT, MAX_LAT);
    let mut lng_range = (MIN_LNG, MAX_LNG);
    let mut hash = String::with_capacity(precision);

    let mut bits: usize = 0;
    let mut bit_count = 0;
    let mut even = true;

    while hash.len() < precision {
        if even {
            let mid = (lng_range.0 + lng_range.1) / 2.0;
            if lng >= mid {
                bits = (bits << 1) | 1;
                lng_range.0 = mid;
            } else {
                bits <<= 1;
                lng_range.1 = mid;
            }
        } else {
            let mid = (lat_range.0 + lat_range.1) / 2.0;
            if lat >= mid {
                bits = (bits << 1) | 1;
                lat_range.0 = mid;
            } else {
                bits <<= 1;
                lat_range.1 = mid;
            }
        }
        even = !even;

        bit_count += 1;
        if bit_count == 5 {
            hash.push(BASE32[bits] as char);
            bits = 0;
            bit_count = 0;
        }
    }

    hash
}

/// Decodes a geohash to the centre of its cell as `(lat, lng)`.
///
/// Characters outside the alphabet are skipped.
#[inline]
pub fn decode(geohash: &str) -> (f64, f64) {
    bounds(geohash).center()
}

/// Reconstructs the bounding box of a geohash cell by replaying the bisection.
pub fn bounds(geohash: &str) -> GeohashBounds {
    let mut cell = GeohashBounds::WORLD;
    let mut even = true;

    for value in symbol_values(geohash) {
        for shift in (0..5).rev() {
            let bit = (value >> shift) & 1 == 1;
            if even {
                let mid = (cell.min_lng + cell.max_lng) / 2.0;
                if bit {
                    cell.min_lng = mid;
                } else {
                    cell.max_lng = mid;
                }
            } else {
                let mid = (cell.min_lat + cell.max_lat) / 2.0;
                if bit {
                    cell.min_lat = mid;
                } else {
                    cell.max_lat = mid;
                }
            }
            even = !even;
        }
    }

    cell
}

/// Number of valid symbols in a geohash (its effective precision).
pub fn precision_of(geohash: &str) -> usize {
    symbol_values(geohash).count()
}

/// Lowercases a geohash and drops characters outside the alphabet.
///
/// Tile keys are always stored in this canonical form.
pub fn canonical(geohash: &str) -> String {
    symbol_values(geohash).map(|v| BASE32[v] as char).collect()
}

/// Truncates a geohash to at most `precision` symbols (its ancestor cell).
pub fn parent(geohash: &str, precision: usize) -> String {
    symbol_values(geohash)
        .take(precision)
        .map(|v| BASE32[v] as char)
        .collect()
}

/// Strictly validates a geohash string.
pub fn validate(geohash: &str) -> Result<(), GeohashError> {
    if geohash.is_empty() {
        return Err(GeohashError::Empty);
    }
    for (position, character) in geohash.chars().enumerate() {
        if symbol_value(character).is_none() {
            return Err(GeohashError::InvalidCharacter {
                geohash: geohash.to_string(),
                character,
                position,
            });
        }
    }
    Ok(())
}

/// Returns the neighbouring cell in one direction.
///
/// Longitude wraps at ±180. Returns `None` when the neighbour would lie past a
/// pole, or for the empty (whole-world) geohash.
pub fn neighbor(geohash: &str, direction: Direction) -> Option<String> {
    let (rows, cols) = direction.offset();
    offset_cell(geohash, rows, cols)
}

/// Returns the up-to-eight neighbouring cells in the order sw, s, se, w, e,
/// nw, n, ne. Neighbours past a pole are dropped.
pub fn neighbors(geohash: &str) -> Vec<String> {
    Direction::ALL
        .iter()
        .filter_map(|direction| neighbor(geohash, *direction))
        .collect()
}

/// Returns every cell at Chebyshev distance `ring` from `geohash`.
///
/// Ring 1 is the eight immediate neighbours, ring 2 the sixteen cells around
/// those, and so on. Cells are ordered south-to-north, then west-to-east, with
/// duplicates (from longitude wrapping) and the origin removed. Ring 0 is the
/// cell itself.
pub fn ring(geohash: &str, ring: u32) -> Vec<String> {
    let origin = canonical(geohash);
    if ring == 0 {
        return vec![origin];
    }

    let r = ring as i32;
    let mut seen = HashSet::new();
    let mut cells = Vec::with_capacity(8 * ring as usize);

    for rows in -r..=r {
        for cols in -r..=r {
            if rows.abs() != r && cols.abs() != r {
                continue;
            }
            if let Some(cell) = offset_cell(&origin, rows, cols) {
                if cell != origin && seen.insert(cell.clone()) {
                    cells.push(cell);
                }
            }
        }
    }

    cells
}

/// Approximate cell dimensions in kilometres at a precision.
pub fn cell_size(precision: usize) -> CellSize {
    if precision == 0 {
        return CellSize {
            width_km: 40_075.0,
            height_km: 20_004.0,
        };
    }
    if let Some(&(width_km, height_km)) = CELL_SIZE_KM.get(precision - 1) {
        return CellSize {
            width_km,
            height_km,
        };
    }
    let (width_deg, height_deg) = cell_degrees(precision);
    CellSize {
        width_km: width_deg * KM_PER_DEG_LNG,
        height_km: height_deg * KM_PER_DEG_LAT,
    }
}

/// Exact cell dimensions in degrees as `(width, height)` at a precision.
pub fn cell_degrees(precision: usize) -> (f64, f64) {
    let total_bits = 5 * precision as i32;
    let lng_bits = (total_bits + 1) / 2;
    let lat_bits = total_bits / 2;
    (
        360.0 / 2.0_f64.powi(lng_bits),
        180.0 / 2.0_f64.powi(lat_bits),
    )
}

/// Returns all geohashes at `precision` needed to cover a bounding box.
///
/// Samples the box on a grid stepped at 80% of the cell size (edges
/// included) and adds the four corner cells explicitly. Inverted latitudes
/// are swapped. A box with `min_lng > max_lng` crosses the antimeridian and
/// is covered as two boxes split at ±180.
pub fn coverage(bounds: &GeohashBounds, precision: usize) -> BTreeSet<String> {
    let min_lat = bounds.min_lat.min(bounds.max_lat);
    let max_lat = bounds.min_lat.max(bounds.max_lat);

    let mut cells = BTreeSet::new();
    if bounds.min_lng > bounds.max_lng {
        let east = GeohashBounds::new(min_lat, max_lat, bounds.min_lng, MAX_LNG);
        let west = GeohashBounds::new(min_lat, max_lat, MIN_LNG, bounds.max_lng);
        cover_box(&east, precision, &mut cells);
        cover_box(&west, precision, &mut cells);
    } else {
        let b = GeohashBounds::new(min_lat, max_lat, bounds.min_lng, bounds.max_lng);
        cover_box(&b, precision, &mut cells);
    }
    cells
}

fn cover_box(b: &GeohashBounds, precision: usize, cells: &mut BTreeSet<String>) {
    let (cell_width, cell_height) = cell_degrees(precision);
    let step_lat = cell_height * COVERAGE_STEP_FACTOR;
    let step_lng = cell_width * COVERAGE_STEP_FACTOR;

    let rows = step_count(b.height_deg(), step_lat);
    let cols = step_count(b.width_deg(), step_lng);

    for i in 0..=rows {
        let lat = (b.min_lat + i as f64 * step_lat).min(b.max_lat);
        for j in 0..=cols {
            let lng = (b.min_lng + j as f64 * step_lng).min(b.max_lng);
            cells.insert(encode(lat, lng, precision));
        }
    }

    for (lat, lng) in [
        (b.min_lat, b.min_lng),
        (b.min_lat, b.max_lng),
        (b.max_lat, b.min_lng),
        (b.max_lat, b.max_lng),
    ] {
        cells.insert(encode(lat, lng, precision));
    }
}

/// Wraps a longitude into [-180, 180].
#[inline]
pub fn wrap_longitude(lng: f64) -> f64 {
    if (MIN_LNG..=MAX_LNG).contains(&lng) {
        lng
    } else {
        (lng + 180.0).rem_euclid(360.0) - 180.0
    }
}

fn offset_cell(geohash: &str, rows: i32, cols: i32) -> Option<String> {
    let precision = precision_of(geohash);
    if precision == 0 {
        return None;
    }

    let cell = bounds(geohash);
    let (center_lat, center_lng) = cell.center();

    let lat = center_lat + rows as f64 * cell.height_deg();
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        return None;
    }
    let lng = wrap_longitude(center_lng + cols as f64 * cell.width_deg());

    Some(encode(lat, lng, precision))
}

fn step_count(extent: f64, step: f64) -> usize {
    if extent > 0.0 && step > 0.0 {
        (extent / step).ceil() as usize
    } else {
        0
    }
}

#[inline]
fn symbol_value(c: char) -> Option<usize> {
    let c = c.to_ascii_lowercase();
    if !c.is_ascii() {
        return None;
    }
    BASE32.iter().position(|&b| b == c as u8)
}

fn symbol_values(geohash: &str) -> impl Iterator<Item = usize> + '_ {
    geohash.chars().filter_map(symbol_value)
}
