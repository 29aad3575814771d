//! Recipe MCP Tools
//!
//! Recipe list and detail views, including the nutrition panel.

use serde::Serialize;

use crate::catalog::{filter_by_group, CatalogSnapshot, NutritionMemo};
use crate::models::{NutritionalInfo, Recipe, RecipeIngredient, RecipeStep};
use crate::nutrition::{NutritionSummary, Unit};

/// Shown in place of the panel when no line could be aggregated
pub const NO_NUTRITION_NOTE: &str = "No nutrition data available";

/// Whether the nutrition panel shows whole-recipe totals or per-serving values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    Total,
    #[default]
    PerServing,
}

impl DisplayMode {
    /// Parse a display mode; an empty value means per serving
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "total" | "totals" => Ok(DisplayMode::Total),
            "per_serving" | "" => Ok(DisplayMode::PerServing),
            other => Err(format!(
                "Invalid display '{}'. Valid values: total, per_serving",
                other
            )),
        }
    }
}

/// Rounded nutrition values plus the transparency counts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionPanel {
    pub display: DisplayMode,
    pub servings: f64,
    pub values: NutritionalInfo,
    pub compatible_count: usize,
    pub total_count: usize,
    /// "based on N of M ingredients", only when some lines were left out
    pub disclosure: Option<String>,
}

/// Recipe summary for listing
#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub servings: f64,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub ingredient_count: usize,
    pub calories_per_serving: Option<f64>,
    pub created_by_group_id: String,
    pub updated_at: String,
}

/// Response for list_recipes
#[derive(Debug, Serialize)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeSummary>,
    pub total: usize,
    pub group_id: Option<String>,
}

/// One rendered ingredient line
#[derive(Debug, Serialize)]
pub struct IngredientLineView {
    pub ingredient_id: String,
    pub text: String,
}

/// Full recipe detail
#[derive(Debug, Serialize)]
pub struct RecipeDetail {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub servings: f64,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub source_url: Option<String>,
    pub variant_of: Option<String>,
    pub ingredients: Vec<IngredientLineView>,
    pub steps: Vec<StepView>,
    pub nutrition: Option<NutritionPanel>,
    pub nutrition_note: Option<String>,
    pub created_by_group_id: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
pub struct StepView {
    pub number: usize,
    pub text: String,
    pub image_url: Option<String>,
    pub equipment: Vec<String>,
}

/// Response for get_recipe_nutrition
#[derive(Debug, Serialize)]
pub struct RecipeNutritionResponse {
    pub recipe_id: String,
    pub slug: String,
    pub name: String,
    pub nutrition: Option<NutritionPanel>,
    pub nutrition_note: Option<String>,
}

// ============================================================================
// Presentation helpers
// ============================================================================

/// "based on N of M ingredients" when some lines did not contribute
pub fn disclosure(summary: &NutritionSummary) -> Option<String> {
    summary.is_partial().then(|| {
        format!(
            "based on {} of {} ingredients",
            summary.compatible_count, summary.total_count
        )
    })
}

/// Build the display panel from an unrounded summary
pub fn build_nutrition_panel(summary: &NutritionSummary, servings: f64, display: DisplayMode) -> NutritionPanel {
    let values = match display {
        DisplayMode::Total => summary.totals,
        DisplayMode::PerServing => summary.per_serving(servings),
    };

    NutritionPanel {
        display,
        servings,
        values: values.rounded(),
        compatible_count: summary.compatible_count,
        total_count: summary.total_count,
        disclosure: disclosure(summary),
    }
}

/// Render an ingredient line, e.g. "200 g Wheat flour (sifted)" or "a pinch salt"
pub fn describe_line(line: &RecipeIngredient, snapshot: &CatalogSnapshot) -> String {
    let name = snapshot
        .ingredient(&line.ingredient_id)
        .map(|i| i.display_name())
        .unwrap_or(line.ingredient_id.as_str());

    let mut text = match (line.unit, line.quantity_text.as_deref(), line.quantity) {
        (Unit::FreeText, Some(quantity_text), _) if !quantity_text.trim().is_empty() => {
            format!("{} {}", quantity_text.trim(), name)
        }
        (Unit::FreeText, _, _) => name.to_string(),
        // A zero quantity reads as "no quantity"
        (_, _, Some(quantity)) if quantity == 0.0 => name.to_string(),
        (Unit::Unknown, _, Some(quantity)) => format!("{} {}", format_quantity(quantity), name),
        (unit, _, Some(quantity)) => format!("{} {} {}", format_quantity(quantity), unit, name),
        (_, _, None) => name.to_string(),
    };

    if let Some(note) = line.note.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        text.push_str(&format!(" ({})", note));
    }

    text
}

/// Whole numbers without a decimal point, everything else as-is
fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 && quantity.abs() < 1e15 {
        format!("{}", quantity as i64)
    } else {
        format!("{}", quantity)
    }
}

fn step_views(steps: &[RecipeStep]) -> Vec<StepView> {
    steps
        .iter()
        .enumerate()
        .map(|(index, step)| StepView {
            number: index + 1,
            text: step.text.clone(),
            image_url: step.image_url.clone(),
            equipment: step.equipment.clone(),
        })
        .collect()
}

fn panel_for(
    snapshot: &CatalogSnapshot,
    memo: &mut NutritionMemo,
    recipe: &Recipe,
    display: DisplayMode,
) -> (Option<NutritionPanel>, Option<String>) {
    match memo.summary_for(snapshot, recipe) {
        Some(summary) => (
            Some(build_nutrition_panel(&summary, recipe.servings_divisor(), display)),
            None,
        ),
        None => (None, Some(NO_NUTRITION_NOTE.to_string())),
    }
}

// ============================================================================
// Recipe Tools
// ============================================================================

/// List active recipes, newest first, optionally for one group
pub fn list_recipes(
    snapshot: &CatalogSnapshot,
    memo: &mut NutritionMemo,
    group_id: Option<&str>,
) -> ListRecipesResponse {
    let recipes: Vec<RecipeSummary> = filter_by_group(&snapshot.recipes, group_id)
        .into_iter()
        .map(|recipe| {
            let calories_per_serving = memo
                .summary_for(snapshot, recipe)
                .and_then(|s| s.per_serving(recipe.servings_divisor()).calories)
                .map(f64::round);

            RecipeSummary {
                id: recipe.id.clone(),
                slug: recipe.slug.clone(),
                name: recipe.name.clone(),
                description: recipe.description.clone(),
                servings: recipe.servings,
                tags: recipe.tags.clone(),
                categories: recipe.categories.clone(),
                ingredient_count: recipe.ingredients.len(),
                calories_per_serving,
                created_by_group_id: recipe.created_by_group_id.clone(),
                updated_at: recipe.updated_at.clone(),
            }
        })
        .collect();

    ListRecipesResponse {
        total: recipes.len(),
        recipes,
        group_id: crate::catalog::filter::normalize_group(group_id).map(str::to_string),
    }
}

/// Get a recipe with full details, looked up by slug or id
pub fn get_recipe(
    snapshot: &CatalogSnapshot,
    memo: &mut NutritionMemo,
    key: &str,
    display: DisplayMode,
) -> Option<RecipeDetail> {
    let recipe = snapshot.find_recipe(key)?;
    let (nutrition, nutrition_note) = panel_for(snapshot, memo, recipe, display);

    Some(RecipeDetail {
        id: recipe.id.clone(),
        slug: recipe.slug.clone(),
        name: recipe.name.clone(),
        description: recipe.description.clone(),
        servings: recipe.servings,
        tags: recipe.tags.clone(),
        categories: recipe.categories.clone(),
        source_url: recipe.source_url.clone(),
        variant_of: recipe.variant_of.clone(),
        ingredients: recipe
            .ingredients
            .iter()
            .map(|line| IngredientLineView {
                ingredient_id: line.ingredient_id.clone(),
                text: describe_line(line, snapshot),
            })
            .collect(),
        steps: step_views(&recipe.steps),
        nutrition,
        nutrition_note,
        created_by_group_id: recipe.created_by_group_id.clone(),
        updated_at: recipe.updated_at.clone(),
    })
}

/// Nutrition panel only
pub fn get_recipe_nutrition(
    snapshot: &CatalogSnapshot,
    memo: &mut NutritionMemo,
    key: &str,
    display: DisplayMode,
) -> Option<RecipeNutritionResponse> {
    let recipe = snapshot.find_recipe(key)?;
    let (nutrition, nutrition_note) = panel_for(snapshot, memo, recipe, display);

    Some(RecipeNutritionResponse {
        recipe_id: recipe.id.clone(),
        slug: recipe.slug.clone(),
        name: recipe.name.clone(),
        nutrition,
        nutrition_note,
    })
}
