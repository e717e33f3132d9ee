//! Tile database provenance.

use std::collections::BTreeMap;

const SOURCES_KEY: &str = "sources";
const GENERATED_AT_KEY: &str = "generated_at";
const TILE_COUNT_KEY: &str = "tile_count";

/// Informational metadata recorded by the tile database build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileDatabaseMetadata {
    /// Source datasets the tiles were derived from
    pub sources: Vec<String>,
    /// Build timestamp, as recorded
    pub generated_at: Option<String>,
    pub tile_count: Option<u64>,
    /// Any other recorded keys
    pub extra: BTreeMap<String, String>,
}

impl TileDatabaseMetadata {
    /// Build from raw key/value rows.
    ///
    /// Unparseable well-known values are kept in `extra` rather than dropped.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut metadata = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                SOURCES_KEY => {
                    metadata.sources = value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect();
                }
                GENERATED_AT_KEY => metadata.generated_at = Some(value),
                TILE_COUNT_KEY => match value.trim().parse() {
                    Ok(count) => metadata.tile_count = Some(count),
                    Err(_) => {
                        metadata.extra.insert(key, value);
                    }
                },
                _ => {
                    metadata.extra.insert(key, value);
                }
            }
        }
        metadata
    }

    /// Flatten to key/value rows.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if !self.sources.is_empty() {
            pairs.push((SOURCES_KEY.to_string(), self.sources.join(",")));
        }
        if let Some(generated_at) = &self.generated_at {
            pairs.push((GENERATED_AT_KEY.to_string(), generated_at.clone()));
        }
        if let Some(count) = self.tile_count {
            pairs.push((TILE_COUNT_KEY.to_string(), count.to_string()));
        }
        pairs.extend(self.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs() {
        let metadata = TileDatabaseMetadata::from_pairs(vec![
            ("sources".to_string(), "GLiM, WWF Ecoregions ,".to_string()),
            ("tile_count".to_string(), "1204".to_string()),
            ("generated_at".to_string(), "2025-03-01".to_string()),
            ("etl_version".to_string(), "3".to_string()),
        ]);

        assert_eq!(metadata.sources, vec!["GLiM", "WWF Ecoregions"]);
        assert_eq!(metadata.tile_count, Some(1204));
        assert_eq!(metadata.generated_at.as_deref(), Some("2025-03-01"));
        assert_eq!(metadata.extra.get("etl_version").map(String::as_str), Some("3"));
    }

    #[test]
    fn test_bad_tile_count_kept_as_extra() {
        let metadata = TileDatabaseMetadata::from_pairs(vec![(
            "tile_count".to_string(),
            "lots".to_string(),
        )]);
        assert_eq!(metadata.tile_count, None);
        assert_eq!(metadata.extra.get("tile_count").map(String::as_str), Some("lots"));
    }
}
