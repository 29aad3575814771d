//! Catalog snapshot
//!
//! An immutable view of all active documents at one store revision.

use rusqlite::Connection;

use crate::db::store::{get_revision, list_active};
use crate::db::{Collection, DbResult};
use crate::models::{
    index_ingredients, sort_by_updated_desc, Ingredient, IngredientMap, Recipe, Suggestion,
};
use crate::nutrition::{calculate_recipe_nutrition, NutritionSummary};

/// Active catalog documents at a given revision
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub revision: i64,
    /// Newest `updated_at` first
    pub recipes: Vec<Recipe>,
    /// Built once per snapshot, shared read-only by every nutrition calculation
    pub ingredients: IngredientMap,
    pub suggestions: Vec<Suggestion>,
}

impl CatalogSnapshot {
    pub fn new(
        revision: i64,
        mut recipes: Vec<Recipe>,
        ingredients: Vec<Ingredient>,
        suggestions: Vec<Suggestion>,
    ) -> Self {
        sort_by_updated_desc(&mut recipes);
        Self {
            revision,
            recipes,
            ingredients: index_ingredients(ingredients),
            suggestions,
        }
    }

    /// Find a recipe by slug or id
    pub fn find_recipe(&self, key: &str) -> Option<&Recipe> {
        let key = key.trim();
        self.recipes.iter().find(|r| r.matches_slug_or_id(key))
    }

    pub fn ingredient(&self, id: &str) -> Option<&Ingredient> {
        self.ingredients.get(id)
    }

    /// Ingredients sorted by display name
    pub fn ingredients_by_name(&self) -> Vec<&Ingredient> {
        let mut list: Vec<&Ingredient> = self.ingredients.values().collect();
        list.sort_by(|a, b| {
            a.display_name()
                .to_lowercase()
                .cmp(&b.display_name().to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
        list
    }

    /// Nutrition summary for a recipe against this snapshot's ingredients
    pub fn nutrition_for(&self, recipe: &Recipe) -> Option<NutritionSummary> {
        calculate_recipe_nutrition(recipe, &self.ingredients)
    }
}

/// Read a consistent snapshot of the store
pub fn load_snapshot(conn: &Connection) -> DbResult<CatalogSnapshot> {
    // One read transaction so the revision matches the documents
    let tx = conn.unchecked_transaction()?;

    let revision = get_revision(&tx)?;
    let recipes: Vec<Recipe> = list_active(&tx, Collection::Recipes)?;
    let ingredients: Vec<Ingredient> = list_active(&tx, Collection::Ingredients)?;
    let suggestions: Vec<Suggestion> = list_active(&tx, Collection::Suggestions)?;

    tx.commit()?;

    Ok(CatalogSnapshot::new(revision, recipes, ingredients, suggestions))
}
