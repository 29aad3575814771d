//! Recipe nutrition aggregation
//!
//! Sums per-100g ingredient profiles into absolute recipe totals.

use serde::Serialize;

use super::converter::convert_to_grams;
use crate::models::{IngredientMap, NutritionalInfo, Recipe};

/// Aggregated nutrition for a recipe
///
/// `totals` are unrounded absolute sums over the compatible lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionSummary {
    pub totals: NutritionalInfo,
    /// Lines that resolved to grams and had a nutrition record
    pub compatible_count: usize,
    /// All lines on the recipe
    pub total_count: usize,
}

impl NutritionSummary {
    /// Per-serving values derived from the totals; the totals are left as they are
    pub fn per_serving(&self, servings: f64) -> NutritionalInfo {
        self.totals.divided_by(servings)
    }

    /// True when some lines were left out of the totals
    pub fn is_partial(&self) -> bool {
        self.compatible_count < self.total_count
    }
}

/// Calculate total nutrition for a recipe from the ingredient catalog
///
/// A line is left out when it has no measured quantity (free text), its
/// ingredient is unknown or has no nutrition, or its unit cannot be resolved
/// to grams. Returns None when no line contributed, which is distinct from a
/// summary whose totals happen to be zero.
pub fn calculate_recipe_nutrition(
    recipe: &Recipe,
    ingredients: &IngredientMap,
) -> Option<NutritionSummary> {
    let mut totals = NutritionalInfo::empty();
    let mut compatible_count = 0;

    for line in &recipe.ingredients {
        let Some(quantity) = line.measured_quantity() else {
            tracing::debug!(recipe = %recipe.id, ingredient = %line.ingredient_id, "skipping line without measured quantity");
            continue;
        };

        let Some(ingredient) = ingredients.get(&line.ingredient_id) else {
            tracing::debug!(recipe = %recipe.id, ingredient = %line.ingredient_id, "skipping unknown ingredient");
            continue;
        };

        let Some(nutrition) = ingredient.nutrition.as_ref() else {
            tracing::debug!(recipe = %recipe.id, ingredient = %line.ingredient_id, "skipping ingredient without nutrition");
            continue;
        };

        let Some(grams) = convert_to_grams(quantity, line.unit, ingredient) else {
            tracing::debug!(
                recipe = %recipe.id,
                ingredient = %line.ingredient_id,
                unit = %line.unit,
                "skipping line with no gram conversion"
            );
            continue;
        };

        // Profiles are per 100 g
        let multiplier = grams / 100.0;
        totals.accumulate_scaled(nutrition, multiplier);
        compatible_count += 1;
    }

    if compatible_count == 0 {
        return None;
    }

    Some(NutritionSummary {
        totals,
        compatible_count,
        total_count: recipe.ingredients.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{index_ingredients, Ingredient, RecipeIngredient, UnitConversion};
    use crate::nutrition::Unit;

    fn line(ingredient_id: &str, quantity: Option<f64>, unit: Unit) -> RecipeIngredient {
        RecipeIngredient {
            ingredient_id: ingredient_id.into(),
            quantity,
            unit,
            quantity_text: None,
            note: None,
        }
    }

    fn recipe(servings: f64, ingredients: Vec<RecipeIngredient>) -> Recipe {
        Recipe {
            id: "r1".into(),
            slug: "test-recipe".into(),
            name: "Test recipe".into(),
            description: String::new(),
            servings,
            ingredients,
            steps: vec![],
            tags: vec![],
            categories: vec![],
            source_url: None,
            variant_of: None,
            created_at: String::new(),
            updated_at: String::new(),
            created_by_group_id: String::new(),
            updated_by_group_id: String::new(),
            is_archived: false,
        }
    }

    fn ingredient(id: &str, nutrition: Option<NutritionalInfo>, rules: Vec<UnitConversion>) -> Ingredient {
        Ingredient {
            id: id.into(),
            name: id.into(),
            nutrition,
            unit_conversions: rules,
            ..Default::default()
        }
    }

    fn flour() -> Ingredient {
        ingredient(
            "flour",
            Some(NutritionalInfo {
                calories: Some(364.0),
                protein: Some(10.0),
                ..Default::default()
            }),
            vec![],
        )
    }

    fn egg_without_conversions() -> Ingredient {
        ingredient(
            "egg",
            Some(NutritionalInfo {
                calories: Some(143.0),
                protein: Some(12.6),
                fat: Some(9.5),
                ..Default::default()
            }),
            vec![],
        )
    }

    #[test]
    fn test_flour_and_unconvertible_egg() {
        let catalog = index_ingredients(vec![flour(), egg_without_conversions()]);
        let r = recipe(
            4.0,
            vec![
                line("flour", Some(200.0), Unit::Gram),
                line("egg", Some(2.0), Unit::Piece),
            ],
        );

        let summary = calculate_recipe_nutrition(&r, &catalog).unwrap();

        assert_eq!(summary.compatible_count, 1);
        assert_eq!(summary.total_count, 2);
        assert!((summary.totals.calories.unwrap() - 728.0).abs() < 1e-9);
        assert!((summary.totals.protein.unwrap() - 20.0).abs() < 1e-9);
        assert_eq!(summary.totals.fat, None);
        assert!(summary.is_partial());

        let per_serving = summary.per_serving(r.servings);
        assert!((per_serving.calories.unwrap() - 182.0).abs() < 1e-9);
    }

    #[test]
    fn test_free_text_counts_only_toward_total() {
        let catalog = index_ingredients(vec![flour()]);
        let mut pinch = line("flour", None, Unit::FreeText);
        pinch.quantity_text = Some("a pinch".into());
        let r = recipe(1.0, vec![line("flour", Some(100.0), Unit::Gram), pinch]);

        let summary = calculate_recipe_nutrition(&r, &catalog).unwrap();
        assert_eq!(summary.compatible_count, 1);
        assert_eq!(summary.total_count, 2);
        assert!((summary.totals.calories.unwrap() - 364.0).abs() < 1e-9);
    }

    #[test]
    fn test_measured_line_without_quantity_is_excluded() {
        let catalog = index_ingredients(vec![flour()]);
        let r = recipe(
            1.0,
            vec![line("flour", None, Unit::Gram), line("flour", Some(100.0), Unit::Gram)],
        );

        let summary = calculate_recipe_nutrition(&r, &catalog).unwrap();
        assert_eq!(summary.compatible_count, 1);
        assert_eq!(summary.total_count, 2);
        assert!((summary.totals.calories.unwrap() - 364.0).abs() < 1e-9);

        let only_missing = recipe(1.0, vec![line("flour", None, Unit::Cup)]);
        assert!(calculate_recipe_nutrition(&only_missing, &catalog).is_none());
    }

    #[test]
    fn test_unrecognized_unit_excludes_only_that_line() {
        let mut sliced = flour();
        sliced.unit_conversions.push(UnitConversion {
            from: Unit::Unknown,
            to: Unit::Gram,
            factor: 30.0,
        });
        let catalog = index_ingredients(vec![sliced]);
        let r = recipe(
            1.0,
            vec![line("flour", Some(200.0), Unit::Gram), line("flour", Some(2.0), Unit::Unknown)],
        );

        let summary = calculate_recipe_nutrition(&r, &catalog).unwrap();
        assert_eq!(summary.compatible_count, 1);
        assert_eq!(summary.total_count, 2);
        assert!((summary.totals.calories.unwrap() - 728.0).abs() < 1e-9);
    }

    #[test]
    fn test_free_text_with_stray_quantity_is_excluded() {
        let with_rule = ingredient(
            "salt",
            Some(NutritionalInfo { calories: Some(0.0), ..Default::default() }),
            vec![UnitConversion { from: Unit::FreeText, to: Unit::Gram, factor: 1.0 }],
        );
        let catalog = index_ingredients(vec![with_rule]);
        let r = recipe(1.0, vec![line("salt", Some(3.0), Unit::FreeText)]);

        assert_eq!(calculate_recipe_nutrition(&r, &catalog), None);
    }

    #[test]
    fn test_all_incompatible_returns_none() {
        let no_nutrition = ingredient("water", None, vec![]);
        let catalog = index_ingredients(vec![egg_without_conversions(), no_nutrition]);
        let r = recipe(
            2.0,
            vec![
                line("egg", Some(2.0), Unit::Piece),
                line("water", Some(500.0), Unit::Gram),
                line("missing", Some(10.0), Unit::Gram),
                line("egg", None, Unit::FreeText),
            ],
        );

        assert_eq!(calculate_recipe_nutrition(&r, &catalog), None);
    }

    #[test]
    fn test_zero_totals_are_still_a_summary() {
        let zero = ingredient(
            "water",
            Some(NutritionalInfo { calories: Some(0.0), ..Default::default() }),
            vec![],
        );
        let catalog = index_ingredients(vec![zero]);
        let r = recipe(1.0, vec![line("water", Some(250.0), Unit::Gram)]);

        let summary = calculate_recipe_nutrition(&r, &catalog).unwrap();
        assert_eq!(summary.compatible_count, 1);
        assert_eq!(summary.totals.calories, Some(0.0));
    }

    #[test]
    fn test_empty_nutrition_record_still_counts_as_compatible() {
        let bare = ingredient("herb", Some(NutritionalInfo::empty()), vec![]);
        let catalog = index_ingredients(vec![bare]);
        let r = recipe(1.0, vec![line("herb", Some(5.0), Unit::Gram)]);

        let summary = calculate_recipe_nutrition(&r, &catalog).unwrap();
        assert_eq!(summary.compatible_count, 1);
        assert!(summary.totals.is_empty());
    }

    #[test]
    fn test_partial_fields_accumulate_independently() {
        let a = ingredient(
            "sugar",
            Some(NutritionalInfo { calories: Some(400.0), ..Default::default() }),
            vec![UnitConversion { from: Unit::Cup, to: Unit::Gram, factor: 200.0 }],
        );
        let b = ingredient(
            "whey",
            Some(NutritionalInfo { protein: Some(80.0), ..Default::default() }),
            vec![UnitConversion { from: Unit::Piece, to: Unit::Kilogram, factor: 0.03 }],
        );
        let catalog = index_ingredients(vec![a, b]);
        let r = recipe(
            1.0,
            vec![
                line("sugar", Some(0.5), Unit::Cup),
                line("whey", Some(2.0), Unit::Piece),
            ],
        );

        let summary = calculate_recipe_nutrition(&r, &catalog).unwrap();
        // 0.5 cup * 200 g = 100 g of sugar -> 400 kcal
        assert!((summary.totals.calories.unwrap() - 400.0).abs() < 1e-9);
        // 2 * 0.03 kg = 60 g of whey -> 48 g protein
        assert!((summary.totals.protein.unwrap() - 48.0).abs() < 1e-9);
        assert_eq!(summary.totals.carbohydrates, None);
        assert_eq!(summary.compatible_count, 2);
        assert!(!summary.is_partial());
    }

    #[test]
    fn test_per_serving_is_a_pure_view() {
        let catalog = index_ingredients(vec![flour()]);
        let r = recipe(4.0, vec![line("flour", Some(200.0), Unit::Gram)]);
        let summary = calculate_recipe_nutrition(&r, &catalog).unwrap();
        let before = summary.clone();

        let once = summary.per_serving(4.0);
        let twice = summary.per_serving(4.0);

        assert_eq!(once, twice);
        assert_eq!(summary, before);
        assert!((summary.totals.calories.unwrap() - 728.0).abs() < 1e-9);
    }

    #[test]
    fn test_recipe_without_lines() {
        let catalog = index_ingredients(vec![flour()]);
        let r = recipe(1.0, vec![]);
        assert_eq!(calculate_recipe_nutrition(&r, &catalog), None);
    }
}
