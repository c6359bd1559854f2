//! FitDiary MCP Server Implementation
//!
//! Maps MCP tool calls onto `crate::tools` and records each call's outcome in
//! the shared metrics tracker.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::db::Database;
use crate::metrics::MetricsTracker;
use crate::tools::status::{StatusTracker, DIARY_INSTRUCTIONS};
use crate::tools::{diary, metrics, profile, recipes};

/// FitDiary MCP Service
#[derive(Clone)]
pub struct FitDiaryService {
    status_tracker: Arc<StatusTracker>,
    metrics: Arc<MetricsTracker>,
    database: Database,
    tool_router: ToolRouter<FitDiaryService>,
}

impl FitDiaryService {
    pub fn new(database_path: PathBuf, database: Database, metrics: Arc<MetricsTracker>) -> Self {
        Self {
            status_tracker: Arc::new(StatusTracker::new(database_path)),
            metrics,
            database,
            tool_router: Self::tool_router(),
        }
    }

    /// Serialize a tool result and count it as one request
    fn respond<T: Serialize>(
        &self,
        tool: &str,
        result: Result<T, String>,
    ) -> Result<CallToolResult, McpError> {
        let json = result.and_then(|value| {
            serde_json::to_string_pretty(&value).map_err(|e| format!("Serialization error: {}", e))
        });

        match json {
            Ok(json) => {
                self.metrics.record_request(true);
                Ok(CallToolResult::success(vec![Content::text(json)]))
            }
            Err(e) => {
                self.metrics.record_request(false);
                tracing::warn!(tool, "Tool call failed: {}", e);
                Err(McpError::internal_error(e, None))
            }
        }
    }

    /// Like `respond`, but a missing record becomes the `missing` payload
    fn respond_found<T: Serialize>(
        &self,
        tool: &str,
        result: Result<Option<T>, String>,
        missing: serde_json::Value,
    ) -> Result<CallToolResult, McpError> {
        let result = result.and_then(|found| match found {
            Some(value) => serde_json::to_value(value).map_err(|e| format!("Serialization error: {}", e)),
            None => Ok(missing),
        });
        self.respond(tool, result)
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

// ============================================================================
// Profile Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateProfileParams {
    /// Display name. Required on first save, kept when omitted afterwards.
    pub nickname: Option<String>,
    /// Height in centimeters
    pub height_cm: u32,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Age in years
    pub age: u32,
    /// Free text, e.g. "male", "female", "Мужчина"
    pub sex: String,
    /// Free text, e.g. "lose", "maintain", "gain weight", "Похудеть"
    pub goal: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateCalorieNormParams {
    pub weight_kg: f64,
    pub height_cm: u32,
    pub age: u32,
    pub sex: String,
    pub goal: String,
}

// ============================================================================
// Diary Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddMealParams {
    pub dish_name: String,
    /// Whole kilocalories
    pub calories: u32,
    /// ISO date (YYYY-MM-DD); defaults to today
    pub meal_date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MealIdParams {
    /// Meal ID
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateMealParams {
    pub id: i64,
    pub dish_name: Option<String>,
    pub calories: Option<u32>,
    /// ISO date (YYYY-MM-DD)
    pub meal_date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DateParams {
    /// ISO date (YYYY-MM-DD)
    pub date: String,
}

// ============================================================================
// Recipe Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddRecipeParams {
    pub name: String,
    /// breakfast, lunch, dinner, snack... (default "any")
    pub meal_type: Option<String>,
    pub calories: u32,
    pub recipe_text: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetRecipeParams {
    /// Recipe ID
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListRecipesParams {
    /// Only this meal type (optional)
    pub meal_type: Option<String>,
    /// Page number, starting at 1
    #[serde(default = "default_page")]
    pub page: i64,
    /// Recipes per page (default 10, max 100)
    #[serde(default = "default_page_size")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    recipes::PAGE_SIZE
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RateAppParams {
    /// Stars, 1 to 5
    pub rating: u8,
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router]
impl FitDiaryService {
    // --- Status ---

    #[tool(description = "Get the current status of the FitDiary service including build info, database status, process information and usage metrics")]
    fn fitdiary_status(&self) -> Result<CallToolResult, McpError> {
        let status = self.status_tracker.get_status(self.metrics.snapshot());
        self.respond("fitdiary_status", Ok(status))
    }

    #[tool(description = "Get instructions for setting up the profile, logging meals and reading progress. Call this when starting a diary session.")]
    fn diary_instructions(&self) -> Result<CallToolResult, McpError> {
        self.metrics.record_request(true);
        Ok(CallToolResult::success(vec![Content::text(DIARY_INSTRUCTIONS)]))
    }

    // --- Profile ---

    #[tool(description = "Get the stored profile and its daily calorie norm (null until all biometrics are set)")]
    fn get_profile(&self) -> Result<CallToolResult, McpError> {
        let result = profile::get_profile(&self.database);
        self.respond_found("get_profile", result, json!({ "error": "Profile not set" }))
    }

    #[tool(description = "Save height, weight, age, sex and goal. Sex and goal accept free text in English or Russian.")]
    fn update_profile(&self, Parameters(p): Parameters<UpdateProfileParams>) -> Result<CallToolResult, McpError> {
        let result = profile::update_profile(
            &self.database, p.nickname, p.height_cm, p.weight_kg, p.age, &p.sex, &p.goal,
        );
        self.respond("update_profile", result)
    }

    #[tool(description = "Calculate a daily calorie norm from explicit biometrics without saving anything")]
    fn calculate_calorie_norm(&self, Parameters(p): Parameters<CalculateCalorieNormParams>) -> Result<CallToolResult, McpError> {
        let result = profile::calculate_calorie_norm(p.weight_kg, p.height_cm, p.age, &p.sex, &p.goal);
        self.respond("calculate_calorie_norm", result)
    }

    #[tool(description = "Get the daily calorie norm with BMR/TDEE breakdown for the stored profile")]
    fn get_calorie_norm(&self) -> Result<CallToolResult, McpError> {
        let result = profile::get_calorie_norm(&self.database);
        self.respond("get_calorie_norm", result)
    }

    // --- Diary ---

    #[tool(description = "Log a meal with its calories. meal_date defaults to today.")]
    fn add_meal(&self, Parameters(p): Parameters<AddMealParams>) -> Result<CallToolResult, McpError> {
        let result = diary::add_meal(&self.database, &p.dish_name, p.calories, p.meal_date.as_deref(), today());
        self.respond("add_meal", result)
    }

    #[tool(description = "Get a logged meal by ID")]
    fn get_meal(&self, Parameters(p): Parameters<MealIdParams>) -> Result<CallToolResult, McpError> {
        let result = diary::get_meal(&self.database, p.id);
        self.respond_found("get_meal", result, json!({ "error": "Meal not found", "id": p.id }))
    }

    #[tool(description = "List meals logged on a date with the day's calorie total")]
    fn list_meals_by_date(&self, Parameters(p): Parameters<DateParams>) -> Result<CallToolResult, McpError> {
        let result = diary::list_meals_by_date(&self.database, &p.date);
        self.respond("list_meals_by_date", result)
    }

    #[tool(description = "Update a meal's dish name, calories or date")]
    fn update_meal(&self, Parameters(p): Parameters<UpdateMealParams>) -> Result<CallToolResult, McpError> {
        let result = diary::update_meal(
            &self.database, p.id, p.dish_name.as_deref(), p.calories, p.meal_date.as_deref(),
        );
        self.respond_found("update_meal", result, json!({ "error": "Meal not found", "id": p.id }))
    }

    #[tool(description = "Delete a logged meal")]
    fn delete_meal(&self, Parameters(p): Parameters<MealIdParams>) -> Result<CallToolResult, McpError> {
        let result = diary::delete_meal(&self.database, p.id);
        self.respond("delete_meal", result)
    }

    #[tool(description = "Get calories eaten on a date against the daily norm, with progress fraction (capped at 1.0) and remaining calories")]
    fn get_daily_progress(&self, Parameters(p): Parameters<DateParams>) -> Result<CallToolResult, McpError> {
        let result = diary::get_daily_progress(&self.database, &p.date);
        self.respond("get_daily_progress", result)
    }

    #[tool(description = "Get the current and longest streaks of consecutive days with logged meals")]
    fn get_streaks(&self) -> Result<CallToolResult, McpError> {
        let result = diary::get_streaks(&self.database, today());
        self.respond("get_streaks", result)
    }

    // --- Recipes ---

    #[tool(description = "Add a recipe to the catalogue")]
    fn add_recipe(&self, Parameters(p): Parameters<AddRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::add_recipe(
            &self.database, &p.name, p.meal_type.as_deref(), p.calories, &p.recipe_text, p.image_url,
        );
        self.respond("add_recipe", result)
    }

    #[tool(description = "Get a recipe by ID")]
    fn get_recipe(&self, Parameters(p): Parameters<GetRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::get_recipe(&self.database, p.id);
        self.respond_found("get_recipe", result, json!({ "error": "Recipe not found", "id": p.id }))
    }

    #[tool(description = "List recipes one page at a time. Keep paging while can_load_more is true.")]
    fn list_recipes(&self, Parameters(p): Parameters<ListRecipesParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::list_recipes(&self.database, p.meal_type.as_deref(), p.page, p.limit);
        self.respond("list_recipes", result)
    }

    #[tool(description = "Rate the app from 1 to 5 stars")]
    fn rate_app(&self, Parameters(p): Parameters<RateAppParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::rate_app(&self.database, p.rating);
        self.respond("rate_app", result)
    }

    // --- Metrics ---

    #[tool(description = "Get live usage metrics: startup time, session length, request count and error rate")]
    fn get_metrics(&self) -> Result<CallToolResult, McpError> {
        let snapshot = metrics::get_metrics(self.metrics.as_ref());
        self.respond("get_metrics", Ok(snapshot))
    }

    #[tool(description = "Save the current usage metrics as a report")]
    fn save_metrics_report(&self) -> Result<CallToolResult, McpError> {
        let result = metrics::save_metrics_report(&self.database, self.metrics.as_ref());
        self.respond("save_metrics_report", result)
    }

    #[tool(description = "Get the most recently saved metrics report")]
    fn get_latest_metrics_report(&self) -> Result<CallToolResult, McpError> {
        let result = metrics::get_latest_metrics_report(&self.database);
        self.respond_found("get_latest_metrics_report", result, json!({ "error": "No metrics report saved" }))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for FitDiaryService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "fitdiary".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("FitDiary".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "FitDiary - food diary with a daily calorie norm. \
                 IMPORTANT: Call diary_instructions before the first meal of a session. \
                 Profile: get_profile/update_profile, calculate_calorie_norm/get_calorie_norm. \
                 Meals: add_meal/get_meal/update_meal/delete_meal, list_meals_by_date. \
                 Progress: get_daily_progress, get_streaks. \
                 Recipes: add_recipe/get_recipe/list_recipes, rate_app. \
                 Metrics: get_metrics, save_metrics_report/get_latest_metrics_report, fitdiary_status."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_recipes_params_defaults() {
        let params: ListRecipesParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, recipes::PAGE_SIZE);
        assert!(params.meal_type.is_none());
    }
}
