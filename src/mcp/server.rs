//! Nutrifacts MCP Server Implementation
//!
//! Exposes measurement conversion, recipe calculation and label values as MCP tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::models::{NutrientProfile, RecipeIngredient};
use crate::nutrition::NutritionCalculator;
use crate::tools::labels;
use crate::tools::recipes::{self, ServingRequest};
use crate::tools::status::StatusTracker;

/// Nutrifacts MCP Service
#[derive(Clone)]
pub struct NutrifactsService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    calculator: Arc<NutritionCalculator>,
    tool_router: ToolRouter<NutrifactsService>,
}

impl NutrifactsService {
    pub fn new(calculator: NutritionCalculator) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(&calculator))),
            calculator: Arc::new(calculator),
            tool_router: Self::tool_router(),
        }
    }
}

fn default_quantity() -> f64 {
    1.0
}

fn default_servings() -> f64 {
    1.0
}

// ============================================================================
// Parameter types
// ============================================================================

/// Per-100g nutrient values; omit anything unknown
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct NutrientsParam {
    pub calories: Option<f64>,
    pub total_fat_g: Option<f64>,
    pub saturated_fat_g: Option<f64>,
    pub trans_fat_g: Option<f64>,
    pub cholesterol_mg: Option<f64>,
    pub sodium_mg: Option<f64>,
    pub total_carbohydrate_g: Option<f64>,
    pub dietary_fiber_g: Option<f64>,
    pub total_sugars_g: Option<f64>,
    pub added_sugars_g: Option<f64>,
    pub protein_g: Option<f64>,
    pub vitamin_d_mcg: Option<f64>,
    pub calcium_mg: Option<f64>,
    pub iron_mg: Option<f64>,
    pub potassium_mg: Option<f64>,
}

impl From<NutrientsParam> for NutrientProfile {
    fn from(p: NutrientsParam) -> Self {
        NutrientProfile {
            calories: p.calories,
            total_fat_g: p.total_fat_g,
            saturated_fat_g: p.saturated_fat_g,
            trans_fat_g: p.trans_fat_g,
            cholesterol_mg: p.cholesterol_mg,
            sodium_mg: p.sodium_mg,
            total_carbohydrate_g: p.total_carbohydrate_g,
            dietary_fiber_g: p.dietary_fiber_g,
            total_sugars_g: p.total_sugars_g,
            added_sugars_g: p.added_sugars_g,
            protein_g: p.protein_g,
            vitamin_d_mcg: p.vitamin_d_mcg,
            calcium_mg: p.calcium_mg,
            iron_mg: p.iron_mg,
            potassium_mg: p.potassium_mg,
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ResolveMeasurementParams {
    /// Ingredient as written in the recipe (e.g., "all-purpose flour, sifted")
    pub ingredient: String,
    /// Amount (default 1)
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    /// Unit as written (e.g., "cups", "tbsp", "large", "g")
    pub unit: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecipeIngredientParam {
    /// Ingredient name
    pub name: String,
    /// Amount (default 1)
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    /// Unit as written
    pub unit: String,
    /// Known weight in grams; skips conversion
    pub grams: Option<f64>,
    /// USDA FoodData Central ID for the nutrient lookup
    pub fdc_id: Option<u64>,
    /// Per-100g nutrients; skips the lookup
    pub nutrients: Option<NutrientsParam>,
}

impl From<RecipeIngredientParam> for RecipeIngredient {
    fn from(p: RecipeIngredientParam) -> Self {
        RecipeIngredient {
            name: p.name,
            quantity: p.quantity,
            unit: p.unit,
            fdc_id: p.fdc_id,
            grams: p.grams,
            nutrients: p.nutrients.map(NutrientProfile::from),
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateRecipeParams {
    /// Ingredient lines in recipe order
    pub ingredients: Vec<RecipeIngredientParam>,
    /// Final (cooked) weight in grams; raw ingredient weight is used if omitted
    pub yield_weight_g: Option<f64>,
    /// Serving size in grams; adds per-serving label values when set
    pub serving_size_g: Option<f64>,
    /// Servings per container (default yield weight / serving size)
    pub servings_per_container: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ComputePerServingParams {
    /// Per-100g nutrients
    pub nutrients: NutrientsParam,
    /// Serving size in grams
    pub serving_size_g: f64,
    /// Servings per container (default 1)
    #[serde(default = "default_servings")]
    pub servings_per_container: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListSupportedIngredientsParams {
    /// Only names containing this text
    pub filter: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CheckNutrientProfileParams {
    /// Per-100g nutrients to check
    pub nutrients: NutrientsParam,
}

// ============================================================================
// Tool implementations
// ============================================================================

#[tool_router]
impl NutrifactsService {
    // --- Status ---

    #[tool(description = "Get the current status of the nutrifacts service including build info, configured lookups, and process information")]
    async fn nutrifacts_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get instructions for converting measurements and calculating recipe nutrition. Call this before the first recipe calculation in a session.")]
    fn recipe_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::RECIPE_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(RECIPE_INSTRUCTIONS)]))
    }

    // --- Conversion ---

    #[tool(description = "Convert a recipe measurement (e.g., 2 cups flour) to grams with source and confidence")]
    async fn resolve_measurement(&self, Parameters(p): Parameters<ResolveMeasurementParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::resolve_measurement(&self.calculator, &p.ingredient, p.quantity, &p.unit)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List ingredients with built-in volume/count conversions")]
    fn list_supported_ingredients(&self, Parameters(p): Parameters<ListSupportedIngredientsParams>) -> Result<CallToolResult, McpError> {
        let result = labels::list_supported_ingredients(p.filter.as_deref());
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Recipes ---

    #[tool(description = "Calculate recipe nutrition: converts every ingredient to grams, looks up nutrients, sums totals and normalizes to per 100g of the final weight. Returns data-quality flags.")]
    async fn calculate_recipe(&self, Parameters(p): Parameters<CalculateRecipeParams>) -> Result<CallToolResult, McpError> {
        let serving = p.serving_size_g.map(|serving_size_g| ServingRequest {
            serving_size_g,
            servings_per_container: p.servings_per_container,
        });
        let ingredients = p.ingredients.into_iter().map(RecipeIngredient::from).collect();
        let result = recipes::calculate_recipe(&self.calculator, ingredients, p.yield_weight_g, serving)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Labels ---

    #[tool(description = "Compute FDA-rounded per-serving label values and %DV from a per-100g profile")]
    fn compute_per_serving(&self, Parameters(p): Parameters<ComputePerServingParams>) -> Result<CallToolResult, McpError> {
        let profile = NutrientProfile::from(p.nutrients);
        let result = labels::compute_per_serving(&self.calculator, &profile, p.serving_size_g, p.servings_per_container)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Check a per-100g nutrient profile for impossible or suspicious values")]
    fn check_nutrient_profile(&self, Parameters(p): Parameters<CheckNutrientProfileParams>) -> Result<CallToolResult, McpError> {
        let result = labels::check_nutrient_profile(&NutrientProfile::from(p.nutrients));
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for NutrifactsService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "nutrifacts".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Nutrifacts".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Nutrifacts - recipe measurement conversion and FDA nutrition label values. \
                 IMPORTANT: Call recipe_instructions before the first recipe calculation. \
                 Conversion: resolve_measurement, list_supported_ingredients. \
                 Recipes: calculate_recipe (optionally with serving_size_g for label values). \
                 Labels: compute_per_serving, check_nutrient_profile. \
                 Status: nutrifacts_status."
                    .into(),
            ),
        }
    }
}
