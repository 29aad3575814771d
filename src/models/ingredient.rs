//! Ingredient model
//!
//! Catalog entry with per-100g nutrition and ingredient-specific unit conversions.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::NutritionalInfo;
use crate::nutrition::Unit;

/// Ingredient catalog keyed by ingredient id
pub type IngredientMap = HashMap<String, Ingredient>;

/// Conversion rule: `quantity_in_from * factor = quantity_in_to`
///
/// Example: 1 cup of flour = 120 g is `{ from: cup, to: g, factor: 120 }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitConversion {
    pub from: Unit,
    pub to: Unit,
    pub factor: f64,
}

/// An ingredient document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Document id (normalized name, not an auto id)
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    /// Per 100 g
    #[serde(default)]
    pub nutrition: Option<NutritionalInfo>,
    /// Extra nutritional metadata, e.g. "sodium": "150"
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub supported_units: Vec<Unit>,
    /// Declaration order matters: the first matching rule wins
    #[serde(default)]
    pub unit_conversions: Vec<UnitConversion>,
    pub variant_of: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub created_by_group_id: String,
    #[serde(default)]
    pub updated_by_group_id: String,
    #[serde(default)]
    pub is_archived: bool,
}

impl Ingredient {
    /// Display name, falling back to the id for unnamed documents
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// Build the id -> ingredient map once per catalog snapshot
pub fn index_ingredients<I>(ingredients: I) -> IngredientMap
where
    I: IntoIterator<Item = Ingredient>,
{
    ingredients
        .into_iter()
        .map(|ingredient| (ingredient.id.clone(), ingredient))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_document() {
        let json = r#"{
            "id": "flour",
            "name": "Wheat flour",
            "aliases": ["plain flour"],
            "categories": ["baking"],
            "allergens": ["gluten"],
            "nutrition": {"calories": 364, "protein": 10},
            "unitConversions": [{"from": "cup", "to": "g", "factor": 120}],
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-02T00:00:00Z",
            "createdByGroupId": "team-a",
            "updatedByGroupId": "team-a",
            "isArchived": false
        }"#;
        let ingredient: Ingredient = serde_json::from_str(json).unwrap();

        assert_eq!(ingredient.id, "flour");
        assert_eq!(ingredient.nutrition.unwrap().calories, Some(364.0));
        assert_eq!(
            ingredient.unit_conversions,
            vec![UnitConversion { from: Unit::Cup, to: Unit::Gram, factor: 120.0 }]
        );
        assert_eq!(ingredient.created_by_group_id, "team-a");
    }

    #[test]
    fn test_index_ingredients_and_display_name() {
        let map = index_ingredients(vec![
            Ingredient { id: "egg".into(), name: "Egg".into(), ..Default::default() },
            Ingredient { id: "salt".into(), ..Default::default() },
        ]);

        assert_eq!(map.len(), 2);
        assert_eq!(map["egg"].display_name(), "Egg");
        assert_eq!(map["salt"].display_name(), "salt");
    }
}
