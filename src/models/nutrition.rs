//! Shared nutrition data structure
//!
//! Used for per-100g ingredient profiles and for aggregated recipe totals.

use serde::{Deserialize, Serialize};

/// Nutritional information
///
/// On an ingredient every field is per 100 grams. On an aggregate every field
/// is an absolute sum. A field is `None` when it is unknown (ingredient) or
/// when nothing contributed to it (aggregate).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionalInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>, // kcal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>, // grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbohydrates: Option<f64>, // grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>, // grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>, // grams
}

impl NutritionalInfo {
    /// An empty record: every field unknown
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no field carries a value
    pub fn is_empty(&self) -> bool {
        self.calories.is_none()
            && self.protein.is_none()
            && self.carbohydrates.is_none()
            && self.fat.is_none()
            && self.fiber.is_none()
    }

    /// Add `other * multiplier` into this record, field by field
    ///
    /// Fields absent on `other` leave the running value untouched, so a field
    /// stays `None` until some contribution actually arrives.
    pub fn accumulate_scaled(&mut self, other: &NutritionalInfo, multiplier: f64) {
        add_scaled(&mut self.calories, other.calories, multiplier);
        add_scaled(&mut self.protein, other.protein, multiplier);
        add_scaled(&mut self.carbohydrates, other.carbohydrates, multiplier);
        add_scaled(&mut self.fat, other.fat, multiplier);
        add_scaled(&mut self.fiber, other.fiber, multiplier);
    }

    /// Apply `f` to every present field
    fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            calories: self.calories.map(&f),
            protein: self.protein.map(&f),
            carbohydrates: self.carbohydrates.map(&f),
            fat: self.fat.map(&f),
            fiber: self.fiber.map(&f),
        }
    }

    /// Divide every present field by `divisor`, returning a new record
    pub fn divided_by(&self, divisor: f64) -> Self {
        self.map(|v| v / divisor)
    }

    /// Round for display: whole kcal, one decimal for gram fields
    pub fn rounded(&self) -> Self {
        let grams = self.map(round_one_decimal);
        Self {
            calories: self.calories.map(f64::round),
            ..grams
        }
    }
}

fn add_scaled(total: &mut Option<f64>, value: Option<f64>, multiplier: f64) {
    if let Some(value) = value {
        *total = Some(total.unwrap_or(0.0) + value * multiplier);
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
