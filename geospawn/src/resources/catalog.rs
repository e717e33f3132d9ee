//! Static resource tables.

use super::types::{CatalogError, DefinitionEntry, ResourceDefinition, ResourceType};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};

const BUILTIN_STONES: &str = include_str!("../../data/resources/stones.json");
const BUILTIN_WOODS: &str = include_str!("../../data/resources/woods.json");
const BUILTIN_FOODS: &str = include_str!("../../data/resources/foods.json");

/// Every spawnable resource, grouped by type.
///
/// Each type is non-empty and ids are unique within a type. Definitions keep
/// their file order.
#[derive(Debug, Clone)]
pub struct ResourceCatalog {
    definitions: HashMap<ResourceType, Vec<ResourceDefinition>>,
    index: HashMap<(ResourceType, String), usize>,
}

impl ResourceCatalog {
    /// The catalog compiled into the crate, parsed once per process.
    pub fn builtin() -> Arc<ResourceCatalog> {
        static CATALOG: OnceLock<Arc<ResourceCatalog>> = OnceLock::new();
        Arc::clone(CATALOG.get_or_init(|| {
            Arc::new(
                ResourceCatalog::from_json(BUILTIN_STONES, BUILTIN_WOODS, BUILTIN_FOODS)
                    .expect("embedded resource catalog is valid"),
            )
        }))
    }

    /// Parse one JSON array of definitions per type.
    pub fn from_json(stones: &str, woods: &str, foods: &str) -> Result<Self, CatalogError> {
        let mut catalog = Self {
            definitions: HashMap::new(),
            index: HashMap::new(),
        };
        for (resource_type, json) in [
            (ResourceType::Stone, stones),
            (ResourceType::Wood, woods),
            (ResourceType::Food, foods),
        ] {
            catalog.add_type(resource_type, json)?;
        }
        Ok(catalog)
    }

    /// Load `stones.json`, `woods.json` and `foods.json` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Self, CatalogError> {
        let read = |resource_type: ResourceType| {
            let path = dir.join(resource_type.catalog_file());
            fs::read_to_string(&path).map_err(|source| CatalogError::Io { path, source })
        };
        Self::from_json(
            &read(ResourceType::Stone)?,
            &read(ResourceType::Wood)?,
            &read(ResourceType::Food)?,
        )
    }

    fn add_type(&mut self, resource_type: ResourceType, json: &str) -> Result<(), CatalogError> {
        let entries: Vec<DefinitionEntry> =
            serde_json::from_str(json).map_err(|source| CatalogError::Parse {
                resource_type,
                source,
            })?;
        if entries.is_empty() {
            return Err(CatalogError::EmptyType(resource_type));
        }

        let mut definitions = Vec::with_capacity(entries.len());
        for entry in entries {
            let definition = entry.into_definition(resource_type);
            validate(&definition)?;

            let key = (resource_type, definition.id.clone());
            if self.index.insert(key, definitions.len()).is_some() {
                return Err(CatalogError::DuplicateId {
                    resource_type,
                    id: definition.id,
                });
            }
            definitions.push(definition);
        }

        self.definitions.insert(resource_type, definitions);
        Ok(())
    }

    pub fn get(&self, resource_type: ResourceType, id: &str) -> Option<&ResourceDefinition> {
        self.index
            .get(&(resource_type, id.to_string()))
            .and_then(|&i| self.definitions.get(&resource_type)?.get(i))
    }

    pub fn contains(&self, resource_type: ResourceType, id: &str) -> bool {
        self.get(resource_type, id).is_some()
    }

    /// All definitions of a type, in file order.
    pub fn of_type(&self, resource_type: ResourceType) -> &[ResourceDefinition] {
        self.definitions
            .get(&resource_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate(definition: &ResourceDefinition) -> Result<(), CatalogError> {
    let invalid = |reason: &str| CatalogError::InvalidDefinition {
        resource_type: definition.resource_type,
        id: definition.id.clone(),
        reason: reason.to_string(),
    };

    if definition.id.trim().is_empty() {
        return Err(invalid("id is empty"));
    }
    if !(0.0..=1.0).contains(&definition.rarity) {
        return Err(invalid("rarity must be within [0, 1]"));
    }
    if let Some(altitude) = &definition.altitude {
        if !altitude.is_valid() {
            return Err(invalid("altitude optimal range must lie within viable range"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ONE_STONE: &str = r#"[{"id":"flint","name":"Flint","rarity":0.3,"toolstone":true}]"#;
    const ONE_WOOD: &str = r#"[{"id":"oak","name":"Oak","rarity":0.8}]"#;
    const ONE_FOOD: &str = r#"[{"id":"acorn","name":"Acorn","rarity":0.8,
        "altitude":{"optimal":[0,800],"viable":[0,1500]}}]"#;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = ResourceCatalog::builtin();
        for ty in ResourceType::ALL {
            assert!(!catalog.of_type(ty).is_empty(), "{} catalog is empty", ty);
        }
        assert!(catalog.contains(ResourceType::Stone, "granite"));
        assert!(catalog.contains(ResourceType::Wood, "oak"));
        assert!(catalog.contains(ResourceType::Food, "blueberry"));
        assert!(!catalog.contains(ResourceType::Wood, "granite"));
    }

    #[test]
    fn test_builtin_toolstones() {
        let catalog = ResourceCatalog::builtin();
        let flint = catalog.get(ResourceType::Stone, "flint").unwrap();
        assert!(flint.toolstone);
        assert_eq!(flint.name, "Flint");
    }

    #[test]
    fn test_from_json() {
        let catalog = ResourceCatalog::from_json(ONE_STONE, ONE_WOOD, ONE_FOOD).unwrap();
        assert_eq!(catalog.len(), 3);
        let acorn = catalog.get(ResourceType::Food, "acorn").unwrap();
        assert_eq!(acorn.resource_type, ResourceType::Food);
        assert_eq!(acorn.altitude.unwrap().viable, (0.0, 1500.0));
    }

    #[test]
    fn test_rejects_empty_type() {
        let err = ResourceCatalog::from_json(ONE_STONE, "[]", ONE_FOOD).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyType(ResourceType::Wood)));
    }

    #[test]
    fn test_rejects_duplicates() {
        let woods = r#"[
            {"id":"oak","name":"Oak","rarity":0.8},
            {"id":"oak","name":"Oak","rarity":0.5}
        ]"#;
        let err = ResourceCatalog::from_json(ONE_STONE, woods, ONE_FOOD).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { .. }));
    }

    #[test]
    fn test_rejects_bad_rarity_and_altitude() {
        let woods = r#"[{"id":"oak","name":"Oak","rarity":1.5}]"#;
        assert!(matches!(
            ResourceCatalog::from_json(ONE_STONE, woods, ONE_FOOD),
            Err(CatalogError::InvalidDefinition { .. })
        ));

        let woods = r#"[{"id":"oak","name":"Oak","rarity":0.5,
            "altitude":{"optimal":[0,5000],"viable":[0,100]}}]"#;
        assert!(matches!(
            ResourceCatalog::from_json(ONE_STONE, woods, ONE_FOOD),
            Err(CatalogError::InvalidDefinition { .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            ResourceCatalog::from_json("{", ONE_WOOD, ONE_FOOD),
            Err(CatalogError::Parse {
                resource_type: ResourceType::Stone,
                ..
            })
        ));
    }

    #[test]
    fn test_load_from_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("stones.json"), ONE_STONE).unwrap();
        fs::write(dir.path().join("woods.json"), ONE_WOOD).unwrap();
        fs::write(dir.path().join("foods.json"), ONE_FOOD).unwrap();

        let catalog = ResourceCatalog::load_from_dir(dir.path()).unwrap();
        assert_eq!(catalog.len(), 3);

        fs::remove_file(dir.path().join("foods.json")).unwrap();
        assert!(matches!(
            ResourceCatalog::load_from_dir(dir.path()),
            Err(CatalogError::Io { .. })
        ));
    }
}
