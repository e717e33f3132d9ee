//! Resource selection policy.

use super::config::{SpawnConfig, MAX_SPAWN_COUNT, MIN_SELECTION_CONFIDENCE};
use super::select::{roll_quantity, select_weighted};
use crate::altitude::{self, AltitudeReading};
use crate::geo::LocationGeoData;
use crate::log::Logger;
use crate::log_warn;
use crate::mapping::{MappingTables, WeightedMapping};
use crate::resources::{ResourceCatalog, ResourceDefinition, ResourceType};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One spawned stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSpawn {
    pub resource_id: String,
    pub resource_type: ResourceType,
    /// Always at least 1
    pub quantity: u32,
}

/// Picks resources for a resolved location.
///
/// Stones follow the primary lithology's mapping, then each secondary
/// lithology with a configured chance. Woods and foods follow the
/// realm+biome mapping. Low-confidence data and missing mappings fall back
/// to a rarity-weighted pick over the whole type.
pub struct ResourceSelector {
    catalog: Arc<ResourceCatalog>,
    mappings: Arc<MappingTables>,
    logger: Arc<dyn Logger>,
}

impl ResourceSelector {
    pub fn new(
        catalog: Arc<ResourceCatalog>,
        mappings: Arc<MappingTables>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            catalog,
            mappings,
            logger,
        }
    }

    pub fn catalog(&self) -> &Arc<ResourceCatalog> {
        &self.catalog
    }

    pub fn mappings(&self) -> &Arc<MappingTables> {
        &self.mappings
    }

    /// Pick a resource of `resource_type` for a location.
    ///
    /// # Panics
    ///
    /// Panics if the catalog has no resources of that type.
    pub fn select<R: Rng>(
        &self,
        resource_type: ResourceType,
        location: &LocationGeoData,
        altitude: Option<&AltitudeReading>,
        config: &SpawnConfig,
        rng: &mut R,
    ) -> &ResourceDefinition {
        let picked = match resource_type {
            ResourceType::Stone => self.select_stone(location, altitude, config, rng),
            ResourceType::Wood | ResourceType::Food => {
                self.select_by_biome(resource_type, location, altitude, config, rng)
            }
        };
        picked.unwrap_or_else(|| self.select_fallback(resource_type, altitude, config, rng))
    }

    fn select_stone<R: Rng>(
        &self,
        location: &LocationGeoData,
        altitude: Option<&AltitudeReading>,
        config: &SpawnConfig,
        rng: &mut R,
    ) -> Option<&ResourceDefinition> {
        let geology = &location.geology;
        if !is_usable(geology.confidence) {
            return None;
        }

        if let Some(mapping) = self.mappings.stone_for_lithology(&geology.primary_lithology) {
            if let Some(picked) =
                self.select_from_mapping(ResourceType::Stone, mapping, altitude, config, rng)
            {
                return Some(picked);
            }
        }

        for lithology in &geology.secondary_lithologies {
            if rng.gen::<f64>() >= config.secondary_lithology_chance {
                continue;
            }
            if let Some(mapping) = self.mappings.stone_for_lithology(lithology) {
                if let Some(picked) =
                    self.select_from_mapping(ResourceType::Stone, mapping, altitude, config, rng)
                {
                    return Some(picked);
                }
            }
        }
        None
    }

    fn select_by_biome<R: Rng>(
        &self,
        resource_type: ResourceType,
        location: &LocationGeoData,
        altitude: Option<&AltitudeReading>,
        config: &SpawnConfig,
        rng: &mut R,
    ) -> Option<&ResourceDefinition> {
        let biome = &location.biome;
        if !is_usable(biome.confidence) {
            return None;
        }

        let realm = biome.realm.as_deref()?;
        let mapping = match resource_type {
            ResourceType::Wood => self.mappings.wood_for(realm, biome.biome_type),
            _ => self.mappings.food_for(realm, biome.biome_type),
        }?;
        self.select_from_mapping(resource_type, mapping, altitude, config, rng)
    }

    /// Weighted pick among a mapping's ids that exist in the catalog.
    fn select_from_mapping<R: Rng>(
        &self,
        resource_type: ResourceType,
        mapping: &WeightedMapping,
        altitude: Option<&AltitudeReading>,
        config: &SpawnConfig,
        rng: &mut R,
    ) -> Option<&ResourceDefinition> {
        let uniform = !mapping.is_consistent();
        let mut candidates = Vec::with_capacity(mapping.len());
        let mut weights = Vec::with_capacity(mapping.len());

        for (i, id) in mapping.resource_ids.iter().enumerate() {
            let Some(definition) = self.catalog.get(resource_type, id) else {
                log_warn!(
                    self.logger,
                    "Mapping names unknown {} '{}', skipping",
                    resource_type,
                    id
                );
                continue;
            };
            let weight = if uniform { 1.0 } else { mapping.weights[i] };
            weights.push(weight * self.altitude_bias(definition, altitude, config));
            candidates.push(definition);
        }

        select_weighted(&candidates, &weights, rng).copied()
    }

    /// Pick over every resource of a type, weighted by rarity when enabled.
    ///
    /// # Panics
    ///
    /// Panics if the catalog has no resources of that type.
    pub fn select_fallback<R: Rng>(
        &self,
        resource_type: ResourceType,
        altitude: Option<&AltitudeReading>,
        config: &SpawnConfig,
        rng: &mut R,
    ) -> &ResourceDefinition {
        let definitions = self.catalog.of_type(resource_type);
        assert!(
            !definitions.is_empty(),
            "resource catalog has no {} definitions",
            resource_type
        );

        let weights: Vec<f64> = definitions
            .iter()
            .map(|d| {
                let base = if config.use_rarity { d.rarity } else { 1.0 };
                base * self.altitude_bias(d, altitude, config)
            })
            .collect();

        select_weighted(definitions, &weights, rng).unwrap_or(&definitions[0])
    }

    /// Compose a full spawn for a location.
    ///
    /// Draws the stack count from `[count_min, count_max]`, both capped at
    /// [`MAX_SPAWN_COUNT`], then per slot
    /// picks stone with `stone_ratio`, otherwise food with `food_ratio` and
    /// wood for the rest.
    pub fn spawn<R: Rng>(
        &self,
        location: &LocationGeoData,
        altitude: Option<&AltitudeReading>,
        config: &SpawnConfig,
        rng: &mut R,
    ) -> Vec<ResourceSpawn> {
        let count_min = config.count_min.min(MAX_SPAWN_COUNT);
        let count_max = config.count_max.clamp(count_min, MAX_SPAWN_COUNT);
        let count = rng.gen_range(count_min..=count_max);

        let mut spawns = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let resource_type = if rng.gen::<f64>() < config.stone_ratio {
                ResourceType::Stone
            } else if rng.gen::<f64>() < config.food_ratio {
                ResourceType::Food
            } else {
                ResourceType::Wood
            };

            let definition = self.select(resource_type, location, altitude, config, rng);
            spawns.push(ResourceSpawn {
                resource_id: definition.id.clone(),
                resource_type,
                quantity: roll_quantity(definition.rarity, rng),
            });
        }
        spawns
    }

    fn altitude_bias(
        &self,
        definition: &ResourceDefinition,
        altitude: Option<&AltitudeReading>,
        config: &SpawnConfig,
    ) -> f64 {
        if config.use_altitude {
            altitude::bias(definition.altitude.as_ref(), altitude)
        } else {
            1.0
        }
    }
}

/// NaN confidence counts as unusable.
#[inline]
fn is_usable(confidence: f64) -> bool {
    confidence >= MIN_SELECTION_CONFIDENCE
}
