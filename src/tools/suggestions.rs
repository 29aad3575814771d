//! Suggestion and group MCP Tools

use serde::Serialize;

use crate::catalog::{all_group_ids, filter_by_group, CatalogSnapshot};
use crate::models::{Suggestion, SuggestionCategory, SuggestionStatus};

#[derive(Debug, Serialize)]
pub struct ListSuggestionsResponse {
    pub suggestions: Vec<Suggestion>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ListGroupsResponse {
    pub groups: Vec<String>,
    pub total: usize,
}

/// List active suggestions, most voted first
pub fn list_suggestions(
    snapshot: &CatalogSnapshot,
    group_id: Option<&str>,
    status: Option<&str>,
    category: Option<&str>,
) -> Result<ListSuggestionsResponse, String> {
    let status = match status.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => Some(SuggestionStatus::from_str(s).ok_or_else(|| {
            format!(
                "Invalid status '{}'. Use: submitted, under-review, accepted, rejected, implemented",
                s
            )
        })?),
        None => None,
    };
    let category = match category.map(str::trim).filter(|c| !c.is_empty()) {
        Some(c) => Some(SuggestionCategory::from_str(c).ok_or_else(|| {
            format!("Invalid category '{}'. Use: feature, bug, improvement, other", c)
        })?),
        None => None,
    };

    let mut suggestions: Vec<Suggestion> = filter_by_group(&snapshot.suggestions, group_id)
        .into_iter()
        .filter(|s| status.map_or(true, |wanted| s.status == wanted))
        .filter(|s| category.map_or(true, |wanted| s.category == wanted))
        .cloned()
        .collect();

    suggestions.sort_by(|a, b| b.votes.cmp(&a.votes).then_with(|| b.submitted_at.cmp(&a.submitted_at)));

    Ok(ListSuggestionsResponse {
        total: suggestions.len(),
        suggestions,
    })
}

/// Every group that owns a recipe or an ingredient
pub fn list_groups(snapshot: &CatalogSnapshot) -> ListGroupsResponse {
    let groups = all_group_ids(&snapshot.recipes, snapshot.ingredients.values());
    ListGroupsResponse {
        total: groups.len(),
        groups,
    }
}
