//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;
use std::str::FromStr;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::geohash::MAX_PRECISION;
use crate::spawn::MAX_SPAWN_COUNT;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [tiles] section
    if let Some(section) = ini.section(Some("tiles")) {
        if let Some(v) = non_empty(section.get("database")) {
            config.tiles.database = expand_tilde(v);
        }
        if let Some(v) = non_empty(section.get("working_dir")) {
            config.tiles.working_dir = Some(expand_tilde(v));
        }
        if let Some(v) = section.get("cache_capacity") {
            config.tiles.cache_capacity = parse_value(
                "tiles",
                "cache_capacity",
                v,
                "must be a non-negative integer (0 disables caching)",
            )?;
        }
    }

    // [resolver] section
    if let Some(section) = ini.section(Some("resolver")) {
        for (key, field) in [
            (
                "detailed_precision",
                &mut config.resolver.detailed_precision,
            ),
            ("coarse_precision", &mut config.resolver.coarse_precision),
        ] {
            if let Some(v) = section.get(key) {
                let precision: usize = parse_value("resolver", key, v, "must be an integer")?;
                if !(1..=MAX_PRECISION).contains(&precision) {
                    return Err(invalid(
                        "resolver",
                        key,
                        v,
                        &format!("must be between 1 and {}", MAX_PRECISION),
                    ));
                }
                *field = precision;
            }
        }
        if let Some(v) = section.get("nearby_max_rings") {
            config.resolver.nearby_max_rings = parse_value(
                "resolver",
                "nearby_max_rings",
                v,
                "must be a non-negative integer",
            )?;
        }
        if let Some(v) = section.get("nearby_max_distance_km") {
            let km: f64 = parse_value(
                "resolver",
                "nearby_max_distance_km",
                v,
                "must be a number (kilometres)",
            )?;
            if !km.is_finite() || km < 0.0 {
                return Err(invalid(
                    "resolver",
                    "nearby_max_distance_km",
                    v,
                    "must be a finite, non-negative number",
                ));
            }
            config.resolver.nearby_max_distance_km = km;
        }
    }

    // [spawn] section
    if let Some(section) = ini.section(Some("spawn")) {
        for (key, field) in [
            ("stone_ratio", &mut config.spawn.stone_ratio),
            ("food_ratio", &mut config.spawn.food_ratio),
            (
                "secondary_lithology_chance",
                &mut config.spawn.secondary_lithology_chance,
            ),
        ] {
            if let Some(v) = section.get(key) {
                *field = parse_probability("spawn", key, v)?;
            }
        }
        for (key, field) in [
            ("count_min", &mut config.spawn.count_min),
            ("count_max", &mut config.spawn.count_max),
        ] {
            if let Some(v) = section.get(key) {
                *field = parse_count(key, v)?;
            }
        }
        if config.spawn.count_max < config.spawn.count_min {
            return Err(invalid(
                "spawn",
                "count_max",
                &config.spawn.count_max.to_string(),
                &format!("must not be below count_min ({})", config.spawn.count_min),
            ));
        }
        if let Some(v) = section.get("use_rarity") {
            config.spawn.use_rarity = parse_bool(v);
        }
        if let Some(v) = section.get("use_altitude") {
            config.spawn.use_altitude = parse_bool(v);
        }
    }

    // [mappings] section
    if let Some(section) = ini.section(Some("mappings")) {
        if let Some(v) = non_empty(section.get("directory")) {
            config.mappings.directory = Some(expand_tilde(v));
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(section.get("file")) {
            config.logging.file = expand_tilde(v);
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_value<T: FromStr>(
    section: &str,
    key: &str,
    value: &str,
    reason: &str,
) -> Result<T, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(section, key, value, reason))
}

fn parse_probability(section: &str, key: &str, value: &str) -> Result<f64, ConfigFileError> {
    let reason = "must be a number between 0.0 and 1.0";
    let p: f64 = parse_value(section, key, value, reason)?;
    if !(0.0..=1.0).contains(&p) {
        return Err(invalid(section, key, value, reason));
    }
    Ok(p)
}

fn parse_count(key: &str, value: &str) -> Result<u32, ConfigFileError> {
    let reason = format!("must be an integer between 0 and {}", MAX_SPAWN_COUNT);
    let count: u32 = parse_value("spawn", key, value, &reason)?;
    if count > MAX_SPAWN_COUNT {
        return Err(invalid("spawn", key, value, &reason));
    }
    Ok(count)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parse a boolean value from a config string.
/// Accepts: true/false, yes/no, 1/0, on/off (case-insensitive)
pub(super) fn parse_bool(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "true" || v == "1" || v == "yes" || v == "on"
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<ConfigFile, ConfigFileError> {
        ConfigFile::from_ini_str(content)
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(parse("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_partial_sections_overlay_defaults() {
        let config = parse(
            r#"
[resolver]
nearby_max_rings = 1

[spawn]
stone_ratio = 0.25
use_rarity = no
"#,
        )
        .unwrap();

        assert_eq!(config.resolver.nearby_max_rings, 1);
        assert_eq!(config.resolver.detailed_precision, 5);
        assert_eq!(config.spawn.stone_ratio, 0.25);
        assert!(!config.spawn.use_rarity);
        assert!(config.spawn.use_altitude);
    }

    #[test]
    fn test_tiles_section() {
        let config = parse(
            r#"
[tiles]
database = /data/geotiles.db
working_dir =
cache_capacity = 0
"#,
        )
        .unwrap();

        assert_eq!(config.tiles.database, PathBuf::from("/data/geotiles.db"));
        assert!(config.tiles.working_dir.is_none());
        assert_eq!(config.tiles.cache_capacity, 0);
    }

    #[test]
    fn test_invalid_cache_capacity() {
        let err = parse("[tiles]\ncache_capacity = lots\n").unwrap_err();
        assert!(err.to_string().contains("tiles.cache_capacity"));
        assert!(err.to_string().contains("lots"));
    }

    #[test]
    fn test_precision_out_of_range() {
        let err = parse("[resolver]\ndetailed_precision = 13\n").unwrap_err();
        match err {
            ConfigFileError::InvalidValue { section, key, .. } => {
                assert_eq!(section, "resolver");
                assert_eq!(key, "detailed_precision");
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(parse("[resolver]\ncoarse_precision = 0\n").is_err());
    }

    #[test]
    fn test_negative_distance_rejected() {
        assert!(parse("[resolver]\nnearby_max_distance_km = -5\n").is_err());
        assert!(parse("[resolver]\nnearby_max_distance_km = inf\n").is_err());
    }

    #[test]
    fn test_probability_bounds() {
        assert!(parse("[spawn]\nstone_ratio = 1.5\n").is_err());
        assert!(parse("[spawn]\nfood_ratio = -0.1\n").is_err());
        assert!(parse("[spawn]\nsecondary_lithology_chance = NaN\n").is_err());
        assert!(parse("[spawn]\nsecondary_lithology_chance = 1\n").is_ok());
    }

    #[test]
    fn test_count_above_cap_rejected() {
        let input = format!("[spawn]\ncount_max = {}\n", MAX_SPAWN_COUNT + 1);
        let err = parse(&input).unwrap_err();
        assert!(matches!(
            err,
            ConfigFileError::InvalidValue { ref key, .. } if key == "count_max"
        ));

        let input = format!(
            "[spawn]\ncount_min = {0}\ncount_max = {0}\n",
            MAX_SPAWN_COUNT
        );
        let config = parse(&input).unwrap();
        assert_eq!(config.spawn.count_max, MAX_SPAWN_COUNT);
    }

    #[test]
    fn test_inverted_count_range_rejected() {
        let err = parse("[spawn]\ncount_min = 6\n").unwrap_err();
        assert!(err.to_string().contains("count_max"));
        let config = parse("[spawn]\ncount_min = 6\ncount_max = 6\n").unwrap();
        assert_eq!((config.spawn.count_min, config.spawn.count_max), (6, 6));
    }

    #[test]
    fn test_parse_bool_values() {
        for v in ["true", "TRUE", "yes", "1", "on"] {
            assert!(parse_bool(v), "{}", v);
        }
        for v in ["false", "no", "0", "off", "maybe"] {
            assert!(!parse_bool(v), "{}", v);
        }
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/tiles.db"), home.join("tiles.db"));
        }
    }
}
