//! Recipe tools
//!
//! Measurement resolution and whole-recipe calculation.

use serde::Serialize;
use tracing::{info, warn};

use crate::models::{ConversionResult, PerServing, RecipeAggregate, RecipeIngredient};
use crate::nutrition::NutritionCalculator;

/// Optional label request attached to a recipe calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServingRequest {
    pub serving_size_g: f64,
    /// Defaults to yield weight / serving size
    pub servings_per_container: Option<f64>,
}

/// Response for calculate_recipe
#[derive(Debug, Serialize)]
pub struct CalculateRecipeResponse {
    #[serde(flatten)]
    pub recipe: RecipeAggregate,
    pub has_errors: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<PerServing>,
}

/// Convert one measurement to grams
pub async fn resolve_measurement(
    calculator: &NutritionCalculator,
    ingredient: &str,
    quantity: f64,
    unit: &str,
) -> Result<ConversionResult, String> {
    if ingredient.trim().is_empty() {
        return Err("Ingredient name cannot be empty".to_string());
    }
    calculator
        .resolve_measurement(ingredient, quantity, unit)
        .await
        .map_err(|e| e.to_string())
}

/// Resolve, look up and aggregate a recipe; optionally produce label values
pub async fn calculate_recipe(
    calculator: &NutritionCalculator,
    ingredients: Vec<RecipeIngredient>,
    yield_weight_g: Option<f64>,
    serving: Option<ServingRequest>,
) -> Result<CalculateRecipeResponse, String> {
    if ingredients.is_empty() {
        return Err("Recipe must have at least one ingredient".to_string());
    }
    if let Some(i) = ingredients.iter().position(|i| i.name.trim().is_empty()) {
        return Err(format!("Ingredient {} has an empty name", i + 1));
    }

    let recipe = calculator
        .calculate_recipe(&ingredients, yield_weight_g)
        .await
        .map_err(|e| e.to_string())?;

    // A recipe without usable weight still returns its aggregate and flags
    let label = match serving {
        Some(_) if !(recipe.yield_weight_g.is_finite() && recipe.yield_weight_g > 0.0) => {
            warn!(
                "Skipping label values: recipe yield is {}g",
                recipe.yield_weight_g
            );
            None
        }
        Some(request) => {
            let servings = request
                .servings_per_container
                .unwrap_or(recipe.yield_weight_g / request.serving_size_g);
            Some(
                calculator
                    .compute_per_serving(&recipe.per_100g, request.serving_size_g, servings)
                    .map_err(|e| e.to_string())?,
            )
        }
        None => None,
    };

    info!(
        "Calculated recipe: {} ingredients, {:.1}g yield, {} flags",
        recipe.ingredients.len(),
        recipe.yield_weight_g,
        recipe.flags.len()
    );

    Ok(CalculateRecipeResponse {
        has_errors: recipe.has_errors(),
        recipe,
        label,
    })
}
