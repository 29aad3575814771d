//! Unit types and conversion constants
//!
//! The closed set of measurement units a recipe line or conversion rule may use,
//! plus the canonical weight factors to grams.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    // Metric weight
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "kg")]
    Kilogram,
    // Metric volume
    #[serde(rename = "ml")]
    Milliliter,
    #[serde(rename = "l")]
    Liter,
    // Imperial/US weight
    #[serde(rename = "oz")]
    Ounce,
    #[serde(rename = "lb")]
    Pound,
    // Imperial/US volume
    #[serde(rename = "tsp")]
    Teaspoon,
    #[serde(rename = "tbsp")]
    Tablespoon,
    #[serde(rename = "fl oz")]
    FluidOunce,
    #[serde(rename = "cup")]
    Cup,
    #[serde(rename = "pint")]
    Pint,
    #[serde(rename = "quart")]
    Quart,
    #[serde(rename = "gallon")]
    Gallon,
    // Count
    #[serde(rename = "piece")]
    Piece,
    /// Quantity is expressed in text and the unit is visually omitted
    #[serde(rename = "free_text")]
    FreeText,
    /// Any unit string outside the set above; never convertible
    #[serde(rename = "unknown", other)]
    Unknown,
}

/// Category of a measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitCategory {
    /// g, kg, oz, lb
    Weight,
    /// ml, l, tsp, tbsp, fl oz, cup, pint, quart, gallon
    Volume,
    /// piece
    Count,
    /// free_text
    FreeText,
    /// Unrecognized unit string
    Unknown,
}

// ============================================================================
// Weight Conversion Constants (to grams)
// ============================================================================

/// Grams per gram
pub const G_PER_G: f64 = 1.0;
/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Grams per ounce
pub const G_PER_OZ: f64 = 28.3495;
/// Grams per pound
pub const G_PER_LB: f64 = 453.592;

impl Unit {
    /// The stored string for this unit
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Milliliter => "ml",
            Unit::Liter => "l",
            Unit::Ounce => "oz",
            Unit::Pound => "lb",
            Unit::Teaspoon => "tsp",
            Unit::Tablespoon => "tbsp",
            Unit::FluidOunce => "fl oz",
            Unit::Cup => "cup",
            Unit::Pint => "pint",
            Unit::Quart => "quart",
            Unit::Gallon => "gallon",
            Unit::Piece => "piece",
            Unit::FreeText => "free_text",
            Unit::Unknown => "unknown",
        }
    }

    pub fn category(&self) -> UnitCategory {
        match self {
            Unit::Gram | Unit::Kilogram | Unit::Ounce | Unit::Pound => UnitCategory::Weight,
            Unit::Milliliter
            | Unit::Liter
            | Unit::Teaspoon
            | Unit::Tablespoon
            | Unit::FluidOunce
            | Unit::Cup
            | Unit::Pint
            | Unit::Quart
            | Unit::Gallon => UnitCategory::Volume,
            Unit::Piece => UnitCategory::Count,
            Unit::FreeText => UnitCategory::FreeText,
            Unit::Unknown => UnitCategory::Unknown,
        }
    }
}

/// Grams per one of `unit`, for the canonical weight units only
///
/// Ingredient-independent: a kilogram of anything is 1000 g. Every other unit
/// needs per-ingredient data and yields `None`.
pub fn grams_per_unit(unit: Unit) -> Option<f64> {
    match unit {
        Unit::Gram => Some(G_PER_G),
        Unit::Kilogram => Some(G_PER_KG),
        Unit::Ounce => Some(G_PER_OZ),
        Unit::Pound => Some(G_PER_LB),
        _ => None,
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
