//! Unit conversion to grams
//!
//! Resolves a (quantity, unit) pair to grams for one ingredient.

use super::units::{grams_per_unit, Unit};
use crate::models::Ingredient;

/// Convert a quantity in the given unit to grams for this ingredient
///
/// Resolution order:
/// 1. Canonical weight units (g, kg, oz, lb) use fixed factors and never
///    consult the ingredient.
/// 2. The first ingredient rule `unit -> g`.
/// 3. The first ingredient rule `unit -> <weight unit>`, composed with the
///    fixed factor of that weight unit (e.g. piece -> kg -> g).
///
/// Only one ingredient-defined hop is followed: piece -> cup -> g is not
/// resolved. Rule factors are used as given, including zero or negative ones.
/// Unrecognized units never match a rule, since two different unknown strings
/// both decode to `Unit::Unknown`.
///
/// Returns None if conversion is not possible.
pub fn convert_to_grams(quantity: f64, unit: Unit, ingredient: &Ingredient) -> Option<f64> {
    if unit == Unit::Unknown {
        return None;
    }

    if let Some(factor) = grams_per_unit(unit) {
        return Some(quantity * factor);
    }

    let rules = &ingredient.unit_conversions;

    if let Some(direct) = rules
        .iter()
        .find(|rule| rule.from == unit && rule.to == Unit::Gram)
    {
        return Some(quantity * direct.factor);
    }

    rules.iter().find_map(|rule| {
        if rule.from != unit {
            return None;
        }
        grams_per_unit(rule.to).map(|grams_per| quantity * rule.factor * grams_per)
    })
}
