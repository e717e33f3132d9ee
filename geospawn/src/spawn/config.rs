//! Spawn tunables.

use serde::{Deserialize, Serialize};

pub const DEFAULT_STONE_RATIO: f64 = 0.6;
pub const DEFAULT_FOOD_RATIO: f64 = 0.3;
pub const DEFAULT_COUNT_MIN: u32 = 3;
pub const DEFAULT_COUNT_MAX: u32 = 5;
pub const DEFAULT_SECONDARY_LITHOLOGY_CHANCE: f64 = 0.3;

/// Upper bound on the number of stacks in one spawn.
pub const MAX_SPAWN_COUNT: u32 = 64;

/// Data below this confidence is not used to pick resources.
pub const MIN_SELECTION_CONFIDENCE: f64 = 0.2;

/// How a spawn is composed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Probability that a slot is a stone
    pub stone_ratio: f64,
    /// Probability that a non-stone slot is food rather than wood
    pub food_ratio: f64,
    /// Inclusive bounds on the number of spawned stacks
    pub count_min: u32,
    pub count_max: u32,
    /// Weight fallback picks by rarity; uniform when off
    pub use_rarity: bool,
    /// Apply altitude preferences when a reading is supplied
    pub use_altitude: bool,
    /// Chance of trying each secondary lithology when the primary has no mapping
    pub secondary_lithology_chance: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            stone_ratio: DEFAULT_STONE_RATIO,
            food_ratio: DEFAULT_FOOD_RATIO,
            count_min: DEFAULT_COUNT_MIN,
            count_max: DEFAULT_COUNT_MAX,
            use_rarity: true,
            use_altitude: true,
            secondary_lithology_chance: DEFAULT_SECONDARY_LITHOLOGY_CHANCE,
        }
    }
}

impl SpawnConfig {
    /// Apply the fields set in `update`, then [`normalize`](Self::normalize).
    pub fn apply(&mut self, update: &SpawnConfigUpdate) -> Vec<String> {
        if let Some(v) = update.stone_ratio {
            self.stone_ratio = v;
        }
        if let Some(v) = update.food_ratio {
            self.food_ratio = v;
        }
        if let Some(v) = update.count_min {
            self.count_min = v;
        }
        if let Some(v) = update.count_max {
            self.count_max = v;
        }
        if let Some(v) = update.use_rarity {
            self.use_rarity = v;
        }
        if let Some(v) = update.use_altitude {
            self.use_altitude = v;
        }
        if let Some(v) = update.secondary_lithology_chance {
            self.secondary_lithology_chance = v;
        }
        self.normalize()
    }

    /// Bring every field into range.
    ///
    /// Probabilities are clamped to `[0, 1]` (NaN resets to the default),
    /// counts are capped at [`MAX_SPAWN_COUNT`] and `count_max` is raised to
    /// `count_min` when below it. Returns a note per adjustment made.
    pub fn normalize(&mut self) -> Vec<String> {
        let mut notes = Vec::new();

        for (name, value, default) in [
            ("stone_ratio", &mut self.stone_ratio, DEFAULT_STONE_RATIO),
            ("food_ratio", &mut self.food_ratio, DEFAULT_FOOD_RATIO),
            (
                "secondary_lithology_chance",
                &mut self.secondary_lithology_chance,
                DEFAULT_SECONDARY_LITHOLOGY_CHANCE,
            ),
        ] {
            let adjusted = if value.is_nan() {
                default
            } else {
                value.clamp(0.0, 1.0)
            };
            if adjusted != *value {
                notes.push(format!("{} {} adjusted to {}", name, value, adjusted));
                *value = adjusted;
            }
        }

        for (name, value) in [
            ("count_min", &mut self.count_min),
            ("count_max", &mut self.count_max),
        ] {
            if *value > MAX_SPAWN_COUNT {
                notes.push(format!(
                    "{} {} above {}, lowered to {}",
                    name, value, MAX_SPAWN_COUNT, MAX_SPAWN_COUNT
                ));
                *value = MAX_SPAWN_COUNT;
            }
        }

        if self.count_max < self.count_min {
            notes.push(format!(
                "count_max {} below count_min {}, raised to {}",
                self.count_max, self.count_min, self.count_min
            ));
            self.count_max = self.count_min;
        }

        notes
    }
}

/// Partial update of a [`SpawnConfig`]; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfigUpdate {
    pub stone_ratio: Option<f64>,
    pub food_ratio: Option<f64>,
    pub count_min: Option<u32>,
    pub count_max: Option<u32>,
    pub use_rarity: Option<bool>,
    pub use_altitude: Option<bool>,
    pub secondary_lithology_chance: Option<f64>,
}
