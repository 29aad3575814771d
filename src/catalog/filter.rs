//! Group filtering
//!
//! A plain predicate over materialized documents by owning group.

use std::collections::BTreeSet;

use crate::models::{Ingredient, Recipe, Suggestion};

/// A document created by some group
pub trait GroupOwned {
    fn owner_group(&self) -> &str;
}

impl GroupOwned for Recipe {
    fn owner_group(&self) -> &str {
        &self.created_by_group_id
    }
}

impl GroupOwned for Ingredient {
    fn owner_group(&self) -> &str {
        &self.created_by_group_id
    }
}

impl GroupOwned for Suggestion {
    fn owner_group(&self) -> &str {
        &self.created_by_group_id
    }
}

/// Normalize a group filter: `None`, empty, and whitespace all mean "all groups"
pub fn normalize_group(group_id: Option<&str>) -> Option<&str> {
    group_id.map(str::trim).filter(|g| !g.is_empty())
}

/// Keep items owned by `group_id`, or everything when no group is selected
pub fn filter_by_group<'a, T, I>(items: I, group_id: Option<&str>) -> Vec<&'a T>
where
    T: GroupOwned + 'a,
    I: IntoIterator<Item = &'a T>,
{
    match normalize_group(group_id) {
        Some(group) => items
            .into_iter()
            .filter(|item| item.owner_group() == group)
            .collect(),
        None => items.into_iter().collect(),
    }
}

/// Sorted, deduplicated group ids across recipes and ingredients
pub fn all_group_ids<'a, R, I>(recipes: R, ingredients: I) -> Vec<String>
where
    R: IntoIterator<Item = &'a Recipe>,
    I: IntoIterator<Item = &'a Ingredient>,
{
    let groups: BTreeSet<&str> = recipes
        .into_iter()
        .map(GroupOwned::owner_group)
        .chain(ingredients.into_iter().map(GroupOwned::owner_group))
        .filter(|g| !g.is_empty())
        .collect();
    groups.into_iter().map(str::to_string).collect()
}
