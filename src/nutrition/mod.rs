//! Nutrition calculation module
//!
//! Unit resolution to grams and recipe nutrition aggregation. Pure functions
//! over catalog values: no I/O and no state kept between calls.

pub mod aggregate;
pub mod converter;
pub mod units;

pub use aggregate::{calculate_recipe_nutrition, NutritionSummary};
pub use converter::convert_to_grams;
pub use units::{grams_per_unit, Unit, UnitCategory};
