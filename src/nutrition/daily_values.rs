//! FDA Daily Values (2,000 calorie diet, 2020 label) and %DV rounding

use crate::models::NutrientKey;

use super::rounding::round_to_increment;

/// Reference amounts by wire name
pub const DAILY_VALUES: &[(&str, f64)] = &[
    // Macronutrients
    ("total_fat_g", 78.0),
    ("saturated_fat_g", 20.0),
    ("cholesterol_mg", 300.0),
    ("sodium_mg", 2300.0),
    ("total_carbohydrate_g", 275.0),
    ("dietary_fiber_g", 28.0),
    ("added_sugars_g", 50.0),
    ("protein_g", 50.0),
    // Required vitamins and minerals
    ("vitamin_d_mcg", 20.0),
    ("calcium_mg", 1300.0),
    ("iron_mg", 18.0),
    ("potassium_mg", 4700.0),
    // Optional vitamins
    ("vitamin_a_mcg", 900.0),
    ("vitamin_c_mg", 90.0),
    ("vitamin_e_mg", 15.0),
    ("vitamin_k_mcg", 120.0),
    ("thiamin_mg", 1.2),
    ("riboflavin_mg", 1.3),
    ("niacin_mg", 16.0),
    ("vitamin_b6_mg", 1.7),
    ("folate_mcg", 400.0),
    ("vitamin_b12_mcg", 2.4),
    ("biotin_mcg", 30.0),
    ("pantothenic_acid_mg", 5.0),
    ("choline_mg", 550.0),
    // Optional minerals
    ("phosphorus_mg", 1250.0),
    ("magnesium_mg", 420.0),
    ("zinc_mg", 11.0),
    ("copper_mg", 0.9),
    ("manganese_mg", 2.3),
    ("selenium_mcg", 55.0),
    ("chromium_mcg", 35.0),
    ("molybdenum_mcg", 45.0),
    ("chloride_mg", 2300.0),
];

/// Nutrients that never carry a %DV
pub const NO_DV: &[&str] = &["trans_fat_g", "total_sugars_g"];

/// Nutrients whose %DV uses the 2/5/10 tiers
pub const VITAMINS_AND_MINERALS: &[&str] = &[
    "vitamin_d_mcg",
    "calcium_mg",
    "iron_mg",
    "potassium_mg",
    "vitamin_a_mcg",
    "vitamin_c_mg",
    "vitamin_e_mg",
    "vitamin_k_mcg",
    "thiamin_mg",
    "riboflavin_mg",
    "niacin_mg",
    "vitamin_b6_mg",
    "folate_mcg",
    "vitamin_b12_mcg",
    "biotin_mcg",
    "pantothenic_acid_mg",
    "choline_mg",
    "phosphorus_mg",
    "magnesium_mg",
    "zinc_mg",
    "copper_mg",
    "manganese_mg",
    "selenium_mcg",
    "chromium_mcg",
    "molybdenum_mcg",
    "chloride_mg",
];

pub fn daily_value(nutrient: &str) -> Option<f64> {
    DAILY_VALUES
        .iter()
        .find(|(name, _)| *name == nutrient)
        .map(|(_, dv)| *dv)
}

pub fn is_vitamin_or_mineral(nutrient: &str) -> bool {
    VITAMINS_AND_MINERALS.contains(&nutrient)
}

/// %DV for any nutrient by wire name, from the unrounded amount
///
/// Macronutrients round to the nearest 1%. Vitamins and minerals round to
/// the nearest 2% up to 10%, 5% up to 50%, then 10%.
pub fn percent_dv_by_name(nutrient: &str, amount: f64) -> Option<u32> {
    if NO_DV.contains(&nutrient) || !amount.is_finite() {
        return None;
    }
    let dv = daily_value(nutrient)?;
    let percent = (amount.max(0.0) / dv) * 100.0;

    let increment = if is_vitamin_or_mineral(nutrient) {
        if percent <= 10.0 {
            2.0
        } else if percent <= 50.0 {
            5.0
        } else {
            10.0
        }
    } else {
        1.0
    };

    Some(round_to_increment(percent, increment) as u32)
}

/// %DV for a label nutrient
pub fn percent_dv(key: NutrientKey, amount: f64) -> Option<u32> {
    percent_dv_by_name(key.as_str(), amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_dv_nutrients() {
        assert_eq!(percent_dv(NutrientKey::TransFat, 2.0), None);
        assert_eq!(percent_dv(NutrientKey::TotalSugars, 12.0), None);
        assert_eq!(percent_dv(NutrientKey::Calories, 200.0), None);
        assert_eq!(percent_dv_by_name("fluoride_mg", 1.0), None);
    }

    #[test]
    fn test_macronutrient_nearest_one() {
        // 7.8 / 78 = 10%
        assert_eq!(percent_dv(NutrientKey::TotalFat, 7.8), Some(10));
        // 3 / 20 = 15%
        assert_eq!(percent_dv(NutrientKey::SaturatedFat, 3.0), Some(15));
        // 2.5% rounds up
        assert_eq!(percent_dv(NutrientKey::Protein, 1.25), Some(3));
        assert_eq!(percent_dv(NutrientKey::Sodium, 0.0), Some(0));
    }

    #[test]
    fn test_vitamin_tiers() {
        // 8.7% → nearest 2
        assert_eq!(percent_dv(NutrientKey::VitaminD, 1.74), Some(8));
        // 32% → nearest 5
        assert_eq!(percent_dv(NutrientKey::VitaminD, 6.4), Some(30));
        // 63% → nearest 10
        assert_eq!(percent_dv(NutrientKey::VitaminD, 12.6), Some(60));
        // 9% rounds half-up to 10
        assert_eq!(percent_dv(NutrientKey::Iron, 1.62), Some(10));
    }

    #[test]
    fn test_optional_vitamins() {
        assert_eq!(daily_value("vitamin_c_mg"), Some(90.0));
        // 45 / 90 = 50% → nearest 5
        assert_eq!(percent_dv_by_name("vitamin_c_mg", 45.0), Some(50));
    }
}
