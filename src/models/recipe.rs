//! Recipe model
//!
//! Recipe documents with structured ingredient lines and ordered steps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::nutrition::Unit;

/// One ingredient line of a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    /// Ingredient document id (may not resolve)
    pub ingredient_id: String,
    /// Absent when `unit` is free text
    pub quantity: Option<f64>,
    pub unit: Unit,
    /// Only used with free text, e.g. "a pinch"
    pub quantity_text: Option<String>,
    /// e.g. "finely chopped"
    pub note: Option<String>,
}

impl RecipeIngredient {
    /// Quantity usable for aggregation: free-text lines never have one
    pub fn measured_quantity(&self) -> Option<f64> {
        match self.unit {
            Unit::FreeText => None,
            _ => self.quantity,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStep {
    pub text: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
}

/// A recipe document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default)]
    pub id: String,
    /// Kebab-case, unique (e.g. "chocolate-cake-2")
    #[serde(default)]
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_servings")]
    pub servings: f64,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(default)]
    pub steps: Vec<RecipeStep>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub source_url: Option<String>,
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

fn default_servings() -> f64 {
    1.0
}

impl Recipe {
    /// True when `key` is this recipe's slug or id
    pub fn matches_slug_or_id(&self, key: &str) -> bool {
        (!self.slug.is_empty() && self.slug == key) || self.id == key
    }

    /// Parsed `updated_at`, `None` when missing or not RFC 3339
    pub fn updated_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.updated_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Servings count for per-serving division (stored values below 1 count as 1)
    pub fn servings_divisor(&self) -> f64 {
        if self.servings.is_finite() && self.servings >= 1.0 {
            self.servings
        } else {
            1.0
        }
    }
}

/// Sort newest `updated_at` first; unparseable timestamps sort last
pub fn sort_by_updated_desc(recipes: &mut [Recipe]) {
    recipes.sort_by(|a, b| b.updated_at_utc().cmp(&a.updated_at_utc()));
}
