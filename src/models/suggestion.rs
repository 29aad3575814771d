//! Suggestion model
//!
//! Feedback items (features, bugs, improvements) submitted by groups.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionCategory {
    Feature,
    Bug,
    Improvement,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionStatus {
    Submitted,
    UnderReview,
    Accepted,
    Rejected,
    Implemented,
}

impl SuggestionCategory {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "feature" => Some(SuggestionCategory::Feature),
            "bug" => Some(SuggestionCategory::Bug),
            "improvement" => Some(SuggestionCategory::Improvement),
            "other" => Some(SuggestionCategory::Other),
            _ => None,
        }
    }
}

impl SuggestionStatus {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "submitted" => Some(SuggestionStatus::Submitted),
            "under-review" => Some(SuggestionStatus::UnderReview),
            "accepted" => Some(SuggestionStatus::Accepted),
            "rejected" => Some(SuggestionStatus::Rejected),
            "implemented" => Some(SuggestionStatus::Implemented),
            _ => None,
        }
    }
}

/// A suggestion document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: SuggestionCategory,
    pub priority: SuggestionPriority,
    pub related_recipe_id: Option<String>,
    pub status: SuggestionStatus,
    #[serde(default)]
    pub votes: i64,
    #[serde(default)]
    pub voted_by_groups: Vec<String>,
    pub variant_of: Option<String>,
    #[serde(default)]
    pub submitted_at: String,
    #[serde(default)]
    pub submitted_by_group_id: String,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_status_kebab_case() {
        let s: Suggestion = serde_json::from_value(serde_json::json!({
            "id": "s1",
            "title": "Dark mode",
            "category": "feature",
            "priority": "high",
            "status": "under-review",
            "votes": 3,
        }))
        .unwrap();

        assert_eq!(s.status, SuggestionStatus::UnderReview);
        assert_eq!(s.category, SuggestionCategory::Feature);
        assert_eq!(s.priority, SuggestionPriority::High);
        assert_eq!(s.votes, 3);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(SuggestionStatus::from_str("Under-Review"), Some(SuggestionStatus::UnderReview));
        assert_eq!(SuggestionStatus::from_str("done"), None);
        assert_eq!(SuggestionCategory::from_str("bug"), Some(SuggestionCategory::Bug));
        assert_eq!(SuggestionCategory::from_str("idea"), None);
    }
}
