//! Per-serving label values

use tracing::debug;

use crate::error::{ValidationError, ValidationResult};
use crate::models::{NutrientKey, NutrientProfile, PerServing, RoundedNutrientValue};

use super::daily_values::percent_dv;
use super::format::{format_servings_per_container, format_value};
use super::rounding::{round_nutrient, round_serving_size};

/// Scale a per-100g profile to one serving, round it for the label and compute %DV
///
/// %DV comes from the unrounded scaled amount, never from the rounded one.
pub fn compute_per_serving(
    profile: &NutrientProfile,
    serving_grams: f64,
    servings_per_container: f64,
) -> ValidationResult<PerServing> {
    if !(serving_grams.is_finite() && serving_grams > 0.0) {
        return Err(ValidationError::InvalidServingSize(serving_grams));
    }
    if !(servings_per_container.is_finite() && servings_per_container > 0.0) {
        return Err(ValidationError::InvalidServingsPerContainer(servings_per_container));
    }

    let scaled = profile.scale(serving_grams / 100.0);

    let rounded_values = NutrientKey::ALL
        .iter()
        .map(|&key| {
            let raw = scaled.get(key);
            let rounded = raw.map(|v| round_nutrient(key, v));
            RoundedNutrientValue {
                key,
                raw,
                rounded,
                percent_dv: raw.and_then(|v| percent_dv(key, v)),
                display: format_value(key, rounded),
            }
        })
        .collect();

    debug!(
        "Per-serving values for {}g serving, {} servings",
        serving_grams, servings_per_container
    );

    Ok(PerServing {
        serving_size_g: serving_grams,
        serving_size_rounded_g: round_serving_size(serving_grams),
        servings_per_container,
        formatted_servings_per_container: format_servings_per_container(servings_per_container),
        rounded_values,
    })
}
