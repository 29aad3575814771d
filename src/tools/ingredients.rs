//! Ingredient MCP Tools

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{filter_by_group, CatalogSnapshot};
use crate::models::{Ingredient, NutritionalInfo, UnitConversion};
use crate::nutrition::{grams_per_unit, Unit, UnitCategory};

/// Ingredient row for listing
#[derive(Debug, Serialize)]
pub struct IngredientSummary {
    pub id: String,
    pub name: String,
    pub aliases: Vec<String>,
    pub categories: Vec<String>,
    pub allergens: Vec<String>,
    /// Per 100 g
    pub nutrition: Option<NutritionalInfo>,
    pub variant_of: Option<String>,
    pub created_by_group_id: String,
}

#[derive(Debug, Serialize)]
pub struct ListIngredientsResponse {
    pub ingredients: Vec<IngredientSummary>,
    pub total: usize,
}

/// A conversion rule as shown to the client, with its gram equivalent when known
#[derive(Debug, Serialize)]
pub struct ConversionView {
    pub from: Unit,
    pub to: Unit,
    pub factor: f64,
    /// Grams per one `from` unit, when `to` is a weight unit
    pub grams_per_unit: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct UnitView {
    pub unit: Unit,
    pub category: UnitCategory,
}

#[derive(Debug, Serialize)]
pub struct RecipeRef {
    pub id: String,
    pub slug: String,
    pub name: String,
}

/// Full ingredient detail
#[derive(Debug, Serialize)]
pub struct IngredientDetail {
    pub id: String,
    pub name: String,
    pub aliases: Vec<String>,
    pub categories: Vec<String>,
    pub allergens: Vec<String>,
    pub nutrition: Option<NutritionalInfo>,
    pub metadata: BTreeMap<String, String>,
    pub supported_units: Vec<UnitView>,
    pub unit_conversions: Vec<ConversionView>,
    pub variant_of: Option<String>,
    pub used_in_recipes: Vec<RecipeRef>,
    pub created_by_group_id: String,
    pub updated_at: String,
}

fn summarize(ingredient: &Ingredient) -> IngredientSummary {
    IngredientSummary {
        id: ingredient.id.clone(),
        name: ingredient.display_name().to_string(),
        aliases: ingredient.aliases.clone(),
        categories: ingredient.categories.clone(),
        allergens: ingredient.allergens.clone(),
        nutrition: ingredient.nutrition.filter(|n| !n.is_empty()),
        variant_of: ingredient.variant_of.clone(),
        created_by_group_id: ingredient.created_by_group_id.clone(),
    }
}

fn conversion_view(rule: &UnitConversion) -> ConversionView {
    ConversionView {
        from: rule.from,
        to: rule.to,
        factor: rule.factor,
        grams_per_unit: grams_per_unit(rule.to).map(|g| rule.factor * g),
    }
}

/// List active ingredients sorted by name, optionally for one group
pub fn list_ingredients(snapshot: &CatalogSnapshot, group_id: Option<&str>) -> ListIngredientsResponse {
    let ingredients: Vec<IngredientSummary> = filter_by_group(snapshot.ingredients_by_name(), group_id)
        .into_iter()
        .map(summarize)
        .collect();

    ListIngredientsResponse {
        total: ingredients.len(),
        ingredients,
    }
}

/// Get one ingredient with its conversions and the recipes that use it
pub fn get_ingredient(snapshot: &CatalogSnapshot, id: &str) -> Option<IngredientDetail> {
    let ingredient = snapshot.ingredient(id.trim())?;

    let used_in_recipes = snapshot
        .recipes
        .iter()
        .filter(|r| r.ingredients.iter().any(|line| line.ingredient_id == ingredient.id))
        .map(|r| RecipeRef {
            id: r.id.clone(),
            slug: r.slug.clone(),
            name: r.name.clone(),
        })
        .collect();

    Some(IngredientDetail {
        id: ingredient.id.clone(),
        name: ingredient.display_name().to_string(),
        aliases: ingredient.aliases.clone(),
        categories: ingredient.categories.clone(),
        allergens: ingredient.allergens.clone(),
        nutrition: ingredient.nutrition.filter(|n| !n.is_empty()),
        metadata: ingredient.metadata.clone(),
        supported_units: ingredient
            .supported_units
            .iter()
            .map(|&unit| UnitView { unit, category: unit.category() })
            .collect(),
        unit_conversions: ingredient.unit_conversions.iter().map(conversion_view).collect(),
        variant_of: ingredient.variant_of.clone(),
        used_in_recipes,
        created_by_group_id: ingredient.created_by_group_id.clone(),
        updated_at: ingredient.updated_at.clone(),
    })
}
