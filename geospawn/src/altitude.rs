//! Altitude preference weighting.
//!
//! Two pure functions turn a GPS altitude fix into a weight multiplier for a
//! resource with an altitude preference:
//!
//! - [`confidence_from_accuracy`] maps reported vertical accuracy to a
//!   confidence in `[0, 1]`
//! - [`bias`] maps a preference and a reading to a multiplier in
//!   `[MIN_BIAS, 1]`

use serde::{Deserialize, Serialize};

/// Lowest multiplier a preference can apply to a spawn weight.
pub const MIN_BIAS: f64 = 0.1;

/// Readings below this confidence are ignored.
pub const MIN_ALTITUDE_CONFIDENCE: f64 = 0.2;

/// Accuracy band edges in metres and the confidence at each edge.
const ACCURACY_BANDS: [(f64, f64); 4] = [(10.0, 1.0), (50.0, 0.8), (150.0, 0.4), (300.0, 0.0)];

/// Altitude ranges in metres a resource prefers.
///
/// Serialized as `{ "optimal": [min, max], "viable": [min, max] }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AltitudePreference {
    /// Range with no penalty
    pub optimal: (f64, f64),
    /// Range outside which the full penalty applies
    pub viable: (f64, f64),
}

impl AltitudePreference {
    pub fn new(optimal: (f64, f64), viable: (f64, f64)) -> Self {
        Self { optimal, viable }
    }

    /// Returns true if both ranges are finite, ordered, and the optimal range
    /// lies within the viable one.
    pub fn is_valid(&self) -> bool {
        let (o_min, o_max) = self.optimal;
        let (v_min, v_max) = self.viable;
        [o_min, o_max, v_min, v_max].iter().all(|v| v.is_finite())
            && o_min <= o_max
            && v_min <= v_max
            && v_min <= o_min
            && o_max <= v_max
    }
}

/// An altitude fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AltitudeReading {
    pub value_m: f64,
    /// Reported vertical accuracy, if any
    pub accuracy_m: Option<f64>,
    /// Trust in `value_m`, in `[0, 1]`
    pub confidence: f64,
}

impl AltitudeReading {
    pub fn new(value_m: f64, accuracy_m: Option<f64>, confidence: f64) -> Self {
        Self {
            value_m,
            accuracy_m,
            confidence,
        }
    }

    /// Reading whose confidence is derived from the reported accuracy.
    pub fn from_gps(value_m: f64, accuracy_m: Option<f64>) -> Self {
        Self::new(value_m, accuracy_m, confidence_from_accuracy(accuracy_m))
    }
}

/// Confidence in an altitude reading given its vertical accuracy.
///
/// Missing, negative or NaN accuracy gives 0. Up to 10 m gives 1; beyond that
/// confidence falls linearly through 0.8 at 50 m and 0.4 at 150 m to 0 at
/// 300 m, and stays 0 after.
pub fn confidence_from_accuracy(accuracy_m: Option<f64>) -> f64 {
    let Some(accuracy) = accuracy_m.filter(|a| *a >= 0.0) else {
        return 0.0;
    };

    let (first_edge, first_confidence) = ACCURACY_BANDS[0];
    if accuracy <= first_edge {
        return first_confidence;
    }

    for pair in ACCURACY_BANDS.windows(2) {
        let (lo, lo_confidence) = pair[0];
        let (hi, hi_confidence) = pair[1];
        if accuracy <= hi {
            return lerp(lo_confidence, hi_confidence, (accuracy - lo) / (hi - lo));
        }
    }
    0.0
}

/// Weight multiplier for a resource's altitude preference at a reading.
///
/// Returns 1 when either input is missing or the reading's confidence is
/// below [`MIN_ALTITUDE_CONFIDENCE`]. Otherwise the raw bias (1 inside the
/// optimal range, [`MIN_BIAS`] outside the viable range, linear between) is
/// blended towards 1 as confidence drops to the threshold. The result is
/// always within `[MIN_BIAS, 1]`.
pub fn bias(preference: Option<&AltitudePreference>, reading: Option<&AltitudeReading>) -> f64 {
    let (Some(preference), Some(reading)) = (preference, reading) else {
        return 1.0;
    };
    // Comparison written so a NaN confidence also lands here
    if !(reading.confidence >= MIN_ALTITUDE_CONFIDENCE) || !reading.value_m.is_finite() {
        return 1.0;
    }

    let raw = raw_bias(preference, reading.value_m);
    let factor = (reading.confidence.min(1.0) - MIN_ALTITUDE_CONFIDENCE)
        / (1.0 - MIN_ALTITUDE_CONFIDENCE);

    lerp(1.0, raw, factor).clamp(MIN_BIAS, 1.0)
}

fn raw_bias(preference: &AltitudePreference, value: f64) -> f64 {
    let (optimal_min, optimal_max) = ordered(preference.optimal);
    let (viable_min, viable_max) = ordered(preference.viable);

    if value >= optimal_min && value <= optimal_max {
        return 1.0;
    }
    if value < viable_min || value > viable_max {
        return MIN_BIAS;
    }

    let (distance, gap) = if value < optimal_min {
        (value - viable_min, optimal_min - viable_min)
    } else {
        (viable_max - value, viable_max - optimal_max)
    };
    if gap <= 0.0 {
        return MIN_BIAS;
    }
    lerp(MIN_BIAS, 1.0, distance / gap)
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Exact at both ends: `lerp(a, b, 0) == a`, `lerp(a, b, 1) == b`.
#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}
