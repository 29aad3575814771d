//! Pantry MCP Server Implementation
//!
//! Read-only tools over the published catalog snapshot.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::catalog::{CatalogFeed, NutritionMemo};
use crate::tools::recipes::DisplayMode;
use crate::tools::status::StatusTracker;
use crate::tools::{ingredients, recipes, suggestions};

/// Pantry MCP Service
#[derive(Clone)]
pub struct PantryService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    feed: Arc<CatalogFeed>,
    /// Shared across tool calls; invalidates itself when the snapshot revision moves
    memo: Arc<std::sync::Mutex<NutritionMemo>>,
    tool_router: ToolRouter<PantryService>,
}

impl PantryService {
    pub fn new(database_path: PathBuf, feed: Arc<CatalogFeed>) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            feed,
            memo: Arc::new(std::sync::Mutex::new(NutritionMemo::new())),
            tool_router: Self::tool_router(),
        }
    }

    fn memo(&self) -> Result<std::sync::MutexGuard<'_, NutritionMemo>, McpError> {
        self.memo
            .lock()
            .map_err(|_| McpError::internal_error("Nutrition memo lock poisoned", None))
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn not_found(what: &str, key: &str) -> Result<CallToolResult, McpError> {
    json_result(&serde_json::json!({ "error": format!("{} not found", what), "id": key }))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GroupFilterParams {
    /// Only show documents created by this group (optional, empty means all)
    pub group_id: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetRecipeParams {
    /// Recipe slug or id
    pub recipe: String,
    /// Nutrition display: "total" or "per_serving" (default per_serving)
    #[serde(default = "default_display")]
    pub display: String,
}

fn default_display() -> String { "per_serving".to_string() }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetIngredientParams {
    /// Ingredient id
    pub id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListSuggestionsParams {
    /// Only show suggestions created by this group (optional)
    pub group_id: Option<String>,
    /// submitted, under-review, accepted, rejected, or implemented (optional)
    pub status: Option<String>,
    /// feature, bug, improvement, or other (optional)
    pub category: Option<String>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl PantryService {
    // --- Status ---

    #[tool(description = "Get the current status of the pantry service including build info, database status, catalog revision and sizes, and process information")]
    async fn pantry_status(&self) -> Result<CallToolResult, McpError> {
        let snapshot = self.feed.current();
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(&snapshot);
        json_result(&status)
    }

    // --- Recipes ---

    #[tool(description = "List active recipes, newest first, with ingredient count and calories per serving. Optionally filter by group_id.")]
    fn list_recipes(&self, Parameters(p): Parameters<GroupFilterParams>) -> Result<CallToolResult, McpError> {
        let snapshot = self.feed.current();
        let result = recipes::list_recipes(&snapshot, &mut *self.memo()?, p.group_id.as_deref());
        json_result(&result)
    }

    #[tool(description = "Get a recipe by slug or id with rendered ingredient lines, steps, and a nutrition panel. display: total or per_serving (default).")]
    fn get_recipe(&self, Parameters(p): Parameters<GetRecipeParams>) -> Result<CallToolResult, McpError> {
        let snapshot = self.feed.current();
        let display = DisplayMode::from_str(&p.display).map_err(|e| McpError::invalid_params(e, None))?;
        match recipes::get_recipe(&snapshot, &mut *self.memo()?, &p.recipe, display) {
            Some(detail) => json_result(&detail),
            None => not_found("Recipe", &p.recipe),
        }
    }

    #[tool(description = "Get only the nutrition panel for a recipe (slug or id). Values are rounded; a disclosure notes when only some ingredients could be counted.")]
    fn get_recipe_nutrition(&self, Parameters(p): Parameters<GetRecipeParams>) -> Result<CallToolResult, McpError> {
        let snapshot = self.feed.current();
        let display = DisplayMode::from_str(&p.display).map_err(|e| McpError::invalid_params(e, None))?;
        match recipes::get_recipe_nutrition(&snapshot, &mut *self.memo()?, &p.recipe, display) {
            Some(nutrition) => json_result(&nutrition),
            None => not_found("Recipe", &p.recipe),
        }
    }

    // --- Ingredients ---

    #[tool(description = "List active ingredients sorted by name with aliases, categories, allergens, and nutrition per 100 g. Optionally filter by group_id.")]
    fn list_ingredients(&self, Parameters(p): Parameters<GroupFilterParams>) -> Result<CallToolResult, McpError> {
        let snapshot = self.feed.current();
        json_result(&ingredients::list_ingredients(&snapshot, p.group_id.as_deref()))
    }

    #[tool(description = "Get an ingredient by id with its unit conversions, supported units, metadata, and the recipes that use it")]
    fn get_ingredient(&self, Parameters(p): Parameters<GetIngredientParams>) -> Result<CallToolResult, McpError> {
        let snapshot = self.feed.current();
        match ingredients::get_ingredient(&snapshot, &p.id) {
            Some(detail) => json_result(&detail),
            None => not_found("Ingredient", &p.id),
        }
    }

    // --- Suggestions & Groups ---

    #[tool(description = "List active suggestions, most voted first. Optional filters: group_id, status, category.")]
    fn list_suggestions(&self, Parameters(p): Parameters<ListSuggestionsParams>) -> Result<CallToolResult, McpError> {
        let snapshot = self.feed.current();
        let result = suggestions::list_suggestions(
            &snapshot,
            p.group_id.as_deref(),
            p.status.as_deref(),
            p.category.as_deref(),
        )
        .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "List every group id that owns a recipe or an ingredient, sorted")]
    fn list_groups(&self) -> Result<CallToolResult, McpError> {
        let snapshot = self.feed.current();
        json_result(&suggestions::list_groups(&snapshot))
    }
}

#[tool_handler]
impl ServerHandler for PantryService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: crate::build_info::NAME.into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Pantry catalog viewer".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Pantry - read-only recipe, ingredient, and suggestion catalog with nutrition. \
                 Recipes: list_recipes, get_recipe (slug or id, display total|per_serving), get_recipe_nutrition. \
                 Ingredients: list_ingredients, get_ingredient. \
                 Suggestions: list_suggestions (status/category filters). \
                 Groups: list_groups; pass group_id to the list tools to narrow to one group. \
                 Nutrition counts only measured lines whose unit converts to grams; \
                 the panel says \"based on N of M ingredients\" when some lines were left out. \
                 Status: pantry_status."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSnapshot;

    fn service() -> PantryService {
        let recipe = serde_json::from_value(serde_json::json!({
            "id": "r1", "slug": "toast", "name": "Toast", "servings": 2,
            "ingredients": [{"ingredientId": "bread", "quantity": 100, "unit": "g"}]
        }))
        .unwrap();
        let bread = crate::models::Ingredient {
            id: "bread".into(),
            nutrition: Some(crate::models::NutritionalInfo {
                calories: Some(265.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let feed = Arc::new(CatalogFeed::new(CatalogSnapshot::new(1, vec![recipe], vec![bread], vec![])));
        PantryService::new(PathBuf::from("/nonexistent/pantry.db"), feed)
    }

    fn text(result: &CallToolResult) -> String {
        result
            .content
            .iter()
            .filter_map(|c| c.as_text().map(|t| t.text.clone()))
            .collect()
    }

    #[test]
    fn test_get_recipe_tool() {
        let service = service();
        let result = service
            .get_recipe(Parameters(GetRecipeParams {
                recipe: "toast".into(),
                display: "total".into(),
            }))
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(&text(&result)).unwrap();
        assert_eq!(body["nutrition"]["values"]["calories"], 265.0);
        assert_eq!(body["nutrition"]["display"], "total");
    }

    #[test]
    fn test_missing_recipe_is_json_error() {
        let service = service();
        let result = service
            .get_recipe_nutrition(Parameters(GetRecipeParams {
                recipe: "nope".into(),
                display: default_display(),
            }))
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(&text(&result)).unwrap();
        assert_eq!(body["error"], "Recipe not found");
    }

    #[test]
    fn test_invalid_display_is_rejected() {
        let service = service();
        let result = service.get_recipe_nutrition(Parameters(GetRecipeParams {
            recipe: "toast".into(),
            display: "per_batch".into(),
        }));
        assert!(result.is_err());

        let result = service.get_recipe(Parameters(GetRecipeParams {
            recipe: "toast".into(),
            display: "Total".into(),
        }));
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_suggestion_filter_is_rejected() {
        let service = service();
        let result = service.list_suggestions(Parameters(ListSuggestionsParams {
            group_id: None,
            status: Some("done".into()),
            category: None,
        }));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_pantry_status_tool() {
        let service = service();
        let result = service.pantry_status().await.unwrap();
        let body: serde_json::Value = serde_json::from_str(&text(&result)).unwrap();
        assert_eq!(body["catalog"]["revision"], 1);
        assert_eq!(body["catalog"]["recipes"], 1);
    }
}
