//! Label tools
//!
//! Per-serving label values, the supported-ingredient list and profile checks.

use serde::Serialize;

use crate::models::{NutrientProfile, PerServing};
use crate::nutrition::{detect_anomalies, supported_ingredients, Anomaly, NutritionCalculator, SupportedIngredient};

/// Response for list_supported_ingredients
#[derive(Debug, Serialize)]
pub struct SupportedIngredientsResponse {
    pub ingredients: Vec<SupportedIngredient>,
    pub count: usize,
}

/// Response for check_nutrient_profile
#[derive(Debug, Serialize)]
pub struct ProfileCheckResponse {
    pub plausible: bool,
    pub anomalies: Vec<Anomaly>,
}

pub fn compute_per_serving(
    calculator: &NutritionCalculator,
    profile: &NutrientProfile,
    serving_size_g: f64,
    servings_per_container: f64,
) -> Result<PerServing, String> {
    calculator
        .compute_per_serving(profile, serving_size_g, servings_per_container)
        .map_err(|e| e.to_string())
}

/// Ingredients with curated conversions, optionally filtered by substring
pub fn list_supported_ingredients(filter: Option<&str>) -> SupportedIngredientsResponse {
    let filter = filter
        .map(|f| f.trim().to_lowercase())
        .filter(|f| !f.is_empty());

    let ingredients: Vec<SupportedIngredient> = supported_ingredients()
        .into_iter()
        .filter(|i| filter.as_deref().map_or(true, |f| i.name.contains(f)))
        .collect();

    SupportedIngredientsResponse {
        count: ingredients.len(),
        ingredients,
    }
}

pub fn check_nutrient_profile(profile: &NutrientProfile) -> ProfileCheckResponse {
    let anomalies = detect_anomalies(profile);
    ProfileCheckResponse {
        plausible: anomalies.is_empty(),
        anomalies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_supported_ingredients() {
        let all = list_supported_ingredients(None);
        assert_eq!(all.count, all.ingredients.len());
        assert!(all.count > 50);

        let flours = list_supported_ingredients(Some(" FLOUR "));
        assert!(flours.count > 0);
        assert!(flours.ingredients.iter().all(|i| i.name.contains("flour")));
        assert!(flours.count < all.count);

        assert_eq!(list_supported_ingredients(Some("")).count, all.count);
    }

    #[test]
    fn test_check_nutrient_profile() {
        let ok = check_nutrient_profile(&NutrientProfile { calories: Some(250.0), ..Default::default() });
        assert!(ok.plausible);

        let bad = check_nutrient_profile(&NutrientProfile { calories: Some(-1.0), ..Default::default() });
        assert!(!bad.plausible);
        assert_eq!(bad.anomalies.len(), 1);
    }

    #[test]
    fn test_compute_per_serving_errors_are_strings() {
        let calc = NutritionCalculator::default();
        let err = compute_per_serving(&calc, &NutrientProfile::default(), 0.0, 1.0).unwrap_err();
        assert_eq!(err, "Serving size must be greater than 0 (got 0)");

        let label = compute_per_serving(&calc, &NutrientProfile::default(), 30.0, 1.0).unwrap();
        assert_eq!(label.formatted_servings_per_container, "1 serving");
    }
}
