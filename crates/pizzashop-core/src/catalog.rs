//! Static data catalog — immutable configuration records loaded once at
//! startup and looked up by string id.
//!
//! Lookups are fallible: an absent id is a recoverable `None`, never a
//! panic. Malformed data (duplicate ids, sauce records without a sauce
//! kind) is rejected at load time.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

use pizzashop_logic::quality::CookingProfile;
use pizzashop_logic::types::{IngredientCategory, PizzaSize, SauceType};

/// Immutable ingredient definition
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientRecord {
    pub id: String,
    pub display_name: String,
    pub category: IngredientCategory,
    /// Which sauce this ingredient applies — set iff category is Sauce
    #[serde(default)]
    pub sauce: Option<SauceType>,
    pub base_price: u32,
}

/// Immutable container type definition
#[derive(Debug, Clone, Deserialize)]
pub struct ContainerTypeRecord {
    pub id: String,
    pub display_name: String,
    pub max_capacity: u32,
    #[serde(default)]
    pub initial_servings: u32,
    #[serde(default)]
    pub unlock_cost: u32,
}

/// Per-size cooking profiles of an oven
#[derive(Debug, Clone, Deserialize)]
pub struct SizeProfiles {
    pub small: CookingProfile,
    pub medium: CookingProfile,
    pub large: CookingProfile,
    pub x_large: CookingProfile,
}

impl SizeProfiles {
    pub fn profile_for(&self, size: PizzaSize) -> CookingProfile {
        match size {
            PizzaSize::Small => self.small,
            PizzaSize::Medium => self.medium,
            PizzaSize::Large => self.large,
            PizzaSize::XLarge => self.x_large,
        }
    }
}

/// Immutable oven configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OvenConfig {
    pub id: String,
    pub display_name: String,
    /// Slot count — one pizza per slot
    pub max_pizzas: usize,
    pub supported_sizes: Vec<PizzaSize>,
    pub profiles: SizeProfiles,
    pub cooking_temperature: f32,
    /// Seconds from cold to cooking temperature
    pub heat_up_time: f32,
    #[serde(default)]
    pub unlock_cost: u32,
}

impl OvenConfig {
    pub fn supports_size(&self, size: PizzaSize) -> bool {
        self.supported_sizes.contains(&size)
    }
}

/// Immutable make-table configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MakeTableConfig {
    pub id: String,
    pub display_name: String,
    pub grid_width: u32,
    pub grid_depth: u32,
    pub assembly_zone_count: u32,
    /// Per-zone supported pizza size, indexed by zone
    pub supported_sizes: Vec<PizzaSize>,
    #[serde(default)]
    pub unlock_cost: u32,
}

/// On-disk catalog layout
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub ingredients: Vec<IngredientRecord>,
    #[serde(default)]
    pub containers: Vec<ContainerTypeRecord>,
    #[serde(default)]
    pub ovens: Vec<OvenConfig>,
    #[serde(default)]
    pub make_tables: Vec<MakeTableConfig>,
}

/// Errors raised while loading the catalog
#[derive(Debug)]
pub enum CatalogError {
    Parse(String),
    EmptyId { kind: &'static str },
    DuplicateId { kind: &'static str, id: String },
    /// A Sauce-category ingredient without a sauce kind
    MissingSauceKind { id: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Parse(msg) => write!(f, "catalog parse error: {}", msg),
            CatalogError::EmptyId { kind } => write!(f, "{} record with empty id", kind),
            CatalogError::DuplicateId { kind, id } => {
                write!(f, "duplicate {} id: {}", kind, id)
            }
            CatalogError::MissingSauceKind { id } => {
                write!(f, "sauce ingredient {} has no sauce kind", id)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// All static records, keyed by id. Read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct DataCatalog {
    ingredients: HashMap<String, IngredientRecord>,
    containers: HashMap<String, ContainerTypeRecord>,
    ovens: HashMap<String, OvenConfig>,
    make_tables: HashMap<String, MakeTableConfig>,
}

impl DataCatalog {
    /// Build the catalog from parsed data, validating ids.
    pub fn from_data(data: CatalogData) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();

        for record in data.ingredients {
            if record.id.is_empty() {
                return Err(CatalogError::EmptyId { kind: "ingredient" });
            }
            if record.category == IngredientCategory::Sauce && record.sauce.is_none() {
                return Err(CatalogError::MissingSauceKind { id: record.id });
            }
            if catalog
                .ingredients
                .insert(record.id.clone(), record.clone())
                .is_some()
            {
                return Err(CatalogError::DuplicateId {
                    kind: "ingredient",
                    id: record.id,
                });
            }
        }

        for record in data.containers {
            if record.id.is_empty() {
                return Err(CatalogError::EmptyId { kind: "container" });
            }
            if catalog
                .containers
                .insert(record.id.clone(), record.clone())
                .is_some()
            {
                return Err(CatalogError::DuplicateId {
                    kind: "container",
                    id: record.id,
                });
            }
        }

        for record in data.ovens {
            if record.id.is_empty() {
                return Err(CatalogError::EmptyId { kind: "oven" });
            }
            if catalog.ovens.insert(record.id.clone(), record.clone()).is_some() {
                return Err(CatalogError::DuplicateId {
                    kind: "oven",
                    id: record.id,
                });
            }
        }

        for record in data.make_tables {
            if record.id.is_empty() {
                return Err(CatalogError::EmptyId { kind: "make table" });
            }
            if catalog
                .make_tables
                .insert(record.id.clone(), record.clone())
                .is_some()
            {
                return Err(CatalogError::DuplicateId {
                    kind: "make table",
                    id: record.id,
                });
            }
        }

        log::info!(
            "catalog loaded: {} ingredients, {} containers, {} ovens, {} make tables",
            catalog.ingredients.len(),
            catalog.containers.len(),
            catalog.ovens.len(),
            catalog.make_tables.len()
        );

        Ok(catalog)
    }

    /// Parse and build the catalog from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::from_data(data)
    }

    pub fn try_get_ingredient(&self, id: &str) -> Option<&IngredientRecord> {
        self.ingredients.get(id)
    }

    pub fn try_get_container(&self, id: &str) -> Option<&ContainerTypeRecord> {
        self.containers.get(id)
    }

    pub fn try_get_oven(&self, id: &str) -> Option<&OvenConfig> {
        self.ovens.get(id)
    }

    pub fn try_get_make_table(&self, id: &str) -> Option<&MakeTableConfig> {
        self.make_tables.get(id)
    }

    pub fn ingredients(&self) -> impl Iterator<Item = &IngredientRecord> {
        self.ingredients.values()
    }

    pub fn ingredients_by_category(
        &self,
        category: IngredientCategory,
    ) -> Vec<&IngredientRecord> {
        self.ingredients
            .values()
            .filter(|i| i.category == category)
            .collect()
    }

    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    pub fn oven_count(&self) -> usize {
        self.ovens.len()
    }

    pub fn make_table_count(&self) -> usize {
        self.make_tables.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(id: &str, category: IngredientCategory) -> IngredientRecord {
        IngredientRecord {
            id: id.to_string(),
            display_name: id.to_string(),
            category,
            sauce: if category == IngredientCategory::Sauce {
                Some(SauceType::Marinara)
            } else {
                None
            },
            base_price: 5,
        }
    }

    #[test]
    fn test_lookup_hit_and_miss() {
        let catalog = DataCatalog::from_data(CatalogData {
            ingredients: vec![ingredient("dough", IngredientCategory::Base)],
            ..CatalogData::default()
        })
        .unwrap();

        assert!(catalog.try_get_ingredient("dough").is_some());
        assert!(catalog.try_get_ingredient("anchovies").is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = DataCatalog::from_data(CatalogData {
            ingredients: vec![
                ingredient("dough", IngredientCategory::Base),
                ingredient("dough", IngredientCategory::Base),
            ],
            ..CatalogData::default()
        });
        assert!(matches!(result, Err(CatalogError::DuplicateId { .. })));
    }

    #[test]
    fn test_sauce_without_kind_rejected() {
        let mut bad = ingredient("mystery", IngredientCategory::Sauce);
        bad.sauce = None;
        let result = DataCatalog::from_data(CatalogData {
            ingredients: vec![bad],
            ..CatalogData::default()
        });
        assert!(matches!(result, Err(CatalogError::MissingSauceKind { .. })));
    }

    #[test]
    fn test_by_category() {
        let catalog = DataCatalog::from_data(CatalogData {
            ingredients: vec![
                ingredient("dough", IngredientCategory::Base),
                ingredient("pepperoni", IngredientCategory::Topping),
                ingredient("olives", IngredientCategory::Topping),
            ],
            ..CatalogData::default()
        })
        .unwrap();

        assert_eq!(
            catalog
                .ingredients_by_category(IngredientCategory::Topping)
                .len(),
            2
        );
        assert_eq!(
            catalog.ingredients_by_category(IngredientCategory::Cheese).len(),
            0
        );
    }
}
