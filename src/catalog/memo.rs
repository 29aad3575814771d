//! Nutrition memoization
//!
//! Summaries cached per (recipe id, snapshot revision). A newer revision
//! drops everything computed against older ones.

use std::collections::HashMap;

use super::snapshot::CatalogSnapshot;
use crate::models::Recipe;
use crate::nutrition::NutritionSummary;

#[derive(Debug, Default)]
pub struct NutritionMemo {
    revision: Option<i64>,
    /// `None` values are cached too: "no summary" is a result
    entries: HashMap<String, Option<NutritionSummary>>,
}

impl NutritionMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summary for `recipe` under `snapshot`, computing it on first use
    pub fn summary_for(&mut self, snapshot: &CatalogSnapshot, recipe: &Recipe) -> Option<NutritionSummary> {
        if self.revision != Some(snapshot.revision) {
            if !self.entries.is_empty() {
                tracing::debug!(
                    old_revision = ?self.revision,
                    new_revision = snapshot.revision,
                    dropped = self.entries.len(),
                    "Invalidating nutrition memo"
                );
            }
            self.entries.clear();
            self.revision = Some(snapshot.revision);
        }

        self.entries
            .entry(recipe.id.clone())
            .or_insert_with(|| snapshot.nutrition_for(recipe))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
