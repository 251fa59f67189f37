//! Plausibility checks for per-100g nutrient profiles
//!
//! Used to catch lookup or data-entry mistakes before a profile goes into
//! aggregation. Nothing here modifies the profile.

use serde::Serialize;

use crate::models::{NutrientKey, NutrientProfile};

const IU_PER_MCG_VITAMIN_D: f64 = 40.0;
const KJ_PER_KCAL: f64 = 4.184;

/// Max believable energy density (pure fat is ~900 kcal/100g)
const MAX_CALORIES_PER_100G: f64 = 900.0;

/// An implausible value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anomaly {
    pub field: NutrientKey,
    pub value: f64,
    pub message: &'static str,
}

/// Check a per-100g profile for physically impossible or suspicious values
pub fn detect_anomalies(profile: &NutrientProfile) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();
    let mut flag = |field: NutrientKey, value: f64, message: &'static str| {
        anomalies.push(Anomaly { field, value, message });
    };

    if let Some(calories) = profile.calories {
        if calories < 0.0 {
            flag(NutrientKey::Calories, calories, "Negative calorie value detected");
        } else if calories > MAX_CALORIES_PER_100G {
            flag(NutrientKey::Calories, calories, "Unusually high calorie value (>900 per 100g)");
        }
    }

    for (key, message) in [
        (NutrientKey::TotalFat, "Fat exceeds 100g per 100g serving"),
        (NutrientKey::Protein, "Protein exceeds 100g per 100g serving"),
        (NutrientKey::TotalCarbohydrate, "Carbohydrate exceeds 100g per 100g serving"),
    ] {
        if let Some(value) = profile.get(key).filter(|v| *v > 100.0) {
            flag(key, value, message);
        }
    }

    // part must not exceed whole
    for (part, whole, message) in [
        (NutrientKey::SaturatedFat, NutrientKey::TotalFat, "Saturated fat exceeds total fat"),
        (NutrientKey::AddedSugars, NutrientKey::TotalSugars, "Added sugars exceeds total sugars"),
        (
            NutrientKey::DietaryFiber,
            NutrientKey::TotalCarbohydrate,
            "Dietary fiber exceeds total carbohydrate",
        ),
    ] {
        if let (Some(p), Some(w)) = (profile.get(part), profile.get(whole)) {
            if p > w {
                flag(part, p, message);
            }
        }
    }

    anomalies
}

pub fn vitamin_d_iu_to_mcg(iu: f64) -> f64 {
    iu / IU_PER_MCG_VITAMIN_D
}

pub fn kilojoules_to_kcal(kj: f64) -> f64 {
    kj / KJ_PER_KCAL
}
