//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! Produces the commented representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let working_dir = config
        .tiles
        .working_dir
        .as_ref()
        .map(|p| path_to_string(p))
        .unwrap_or_default();
    let mappings_dir = config
        .mappings
        .directory
        .as_ref()
        .map(|p| path_to_string(p))
        .unwrap_or_default();

    format!(
        r#"[tiles]
; SQLite tile database produced by the tile build pipeline
database = {}
; Copy the database into this directory before opening (empty = open in place)
working_dir = {}
; Number of lookups remembered in memory, including misses (0 disables caching)
cache_capacity = {}

[resolver]
; Geohash precision of detailed tiles (1-12, default: 5)
detailed_precision = {}
; Geohash precision of aggregated coarse tiles (1-12, default: 3)
coarse_precision = {}
; Rings of neighbouring cells searched when a cell has no data (default: 2)
nearby_max_rings = {}
; Stop the neighbour search beyond this distance in kilometres (default: 200)
nearby_max_distance_km = {}

[spawn]
; Probability that a spawned stack is stone (0.0-1.0, default: 0.6)
stone_ratio = {}
; Probability that a non-stone stack is food rather than wood (default: 0.3)
food_ratio = {}
; Inclusive range for the number of spawned stacks (default: 3-5, at most 64)
count_min = {}
count_max = {}
; Weight fallback picks by resource rarity (default: true)
use_rarity = {}
; Favour resources suited to the supplied altitude (default: true)
use_altitude = {}
; Chance of trying each secondary lithology when the primary has no mapping (default: 0.3)
secondary_lithology_chance = {}

[mappings]
; Directory with lithology_stone.json, realm_biome_wood.json and
; realm_biome_food.json overriding the built-in tables (empty = built-in)
directory = {}

[logging]
; Log file path (default: ~/.geospawn/logs/geospawn.log)
file = {}
"#,
        path_to_string(&config.tiles.database),
        working_dir,
        config.tiles.cache_capacity,
        config.resolver.detailed_precision,
        config.resolver.coarse_precision,
        config.resolver.nearby_max_rings,
        config.resolver.nearby_max_distance_km,
        config.spawn.stone_ratio,
        config.spawn.food_ratio,
        config.spawn.count_min,
        config.spawn.count_max,
        config.spawn.use_rarity,
        config.spawn.use_altitude,
        config.spawn.secondary_lithology_chance,
        mappings_dir,
        path_to_string(&config.logging.file),
    )
}

/// Render a path, abbreviating the home directory to `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_has_every_section() {
        let content = to_config_string(&ConfigFile::default());
        for section in ["[tiles]", "[resolver]", "[spawn]", "[mappings]", "[logging]"] {
            assert!(content.contains(section), "missing {}", section);
        }
        assert!(content.contains("stone_ratio = 0.6"));
        assert!(content.contains("nearby_max_rings = 2"));
        assert!(content.contains("use_rarity = true"));
    }

    #[test]
    fn test_default_output_parses_back() {
        let content = to_config_string(&ConfigFile::default());
        let parsed = ConfigFile::from_ini_str(&content).unwrap();
        assert_eq!(parsed, ConfigFile::default());
    }

    #[test]
    fn test_home_paths_abbreviated() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(path_to_string(&home.join("tiles.db")), "~/tiles.db");
        }
        assert_eq!(path_to_string(Path::new("/srv/tiles.db")), "/srv/tiles.db");
    }
}
