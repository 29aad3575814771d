//! Data models
//!
//! Rust structs for the catalog documents: recipes, ingredients, suggestions.

mod ingredient;
mod nutrition;
mod recipe;
mod suggestion;

pub use ingredient::{index_ingredients, Ingredient, IngredientMap, UnitConversion};
pub use nutrition::NutritionalInfo;
pub use recipe::{sort_by_updated_desc, Recipe, RecipeIngredient, RecipeStep};
pub use suggestion::{Suggestion, SuggestionCategory, SuggestionPriority, SuggestionStatus};
