//! FDA label rounding (21 CFR 101.9)
//!
//! All rounding is half-up on `value / increment`. Binary floating point
//! turns exact halves like 0.15 / 0.1 into 1.4999999999999998, so the
//! quotient is snapped to 9 decimals before the half-up step.

use crate::models::{NutrientKey, RoundedValue};

/// Round `value` to the nearest multiple of `increment`, halves rounding up
pub fn round_to_increment(value: f64, increment: f64) -> f64 {
    if !value.is_finite() || increment <= 0.0 {
        return value;
    }
    let steps = (value / increment * 1e9).round() / 1e9;
    let rounded = (steps + 0.5).floor() * increment;
    (rounded * 1e6).round() / 1e6
}

/// Rounding class of a label nutrient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingClass {
    Calories,
    Fat,
    Cholesterol,
    SodiumPotassium,
    CarbProtein,
    /// Vitamin D, calcium, iron: amounts are shown as computed
    Unrounded,
}

impl RoundingClass {
    pub fn of(key: NutrientKey) -> Self {
        match key {
            NutrientKey::Calories => RoundingClass::Calories,
            NutrientKey::TotalFat | NutrientKey::SaturatedFat | NutrientKey::TransFat => {
                RoundingClass::Fat
            }
            NutrientKey::Cholesterol => RoundingClass::Cholesterol,
            NutrientKey::Sodium | NutrientKey::Potassium => RoundingClass::SodiumPotassium,
            NutrientKey::TotalCarbohydrate
            | NutrientKey::DietaryFiber
            | NutrientKey::TotalSugars
            | NutrientKey::AddedSugars
            | NutrientKey::Protein => RoundingClass::CarbProtein,
            NutrientKey::VitaminD | NutrientKey::Calcium | NutrientKey::Iron => {
                RoundingClass::Unrounded
            }
        }
    }
}

fn amount(value: f64) -> RoundedValue {
    if value == 0.0 {
        RoundedValue::Zero
    } else {
        RoundedValue::Amount(value)
    }
}

/// Round a per-serving amount for the label
pub fn round_nutrient(key: NutrientKey, value: f64) -> RoundedValue {
    let value = value.max(0.0);
    match RoundingClass::of(key) {
        RoundingClass::Calories => round_calories(value),
        RoundingClass::Fat => round_fat(value),
        RoundingClass::Cholesterol => round_cholesterol(value),
        RoundingClass::SodiumPotassium => round_sodium_potassium(value),
        RoundingClass::CarbProtein => round_carb_protein(value),
        RoundingClass::Unrounded => amount(value),
    }
}

/// <5 → 0; ≤50 → nearest 5; else nearest 10
pub fn round_calories(value: f64) -> RoundedValue {
    if value < 5.0 {
        RoundedValue::Zero
    } else if value <= 50.0 {
        amount(round_to_increment(value, 5.0))
    } else {
        amount(round_to_increment(value, 10.0))
    }
}

/// Total, saturated and trans fat: <0.5 → 0; <5 → nearest 0.5; else nearest 1
pub fn round_fat(value: f64) -> RoundedValue {
    if value < 0.5 {
        RoundedValue::Zero
    } else if value < 5.0 {
        amount(round_to_increment(value, 0.5))
    } else {
        amount(round_to_increment(value, 1.0))
    }
}

/// <2 → 0; 2 to 5 → "less than 5mg"; else nearest 5
pub fn round_cholesterol(value: f64) -> RoundedValue {
    if value < 2.0 {
        RoundedValue::Zero
    } else if value <= 5.0 {
        RoundedValue::LessThan(5.0)
    } else {
        amount(round_to_increment(value, 5.0))
    }
}

/// <5 → 0; ≤140 → nearest 5; else nearest 10
pub fn round_sodium_potassium(value: f64) -> RoundedValue {
    if value < 5.0 {
        RoundedValue::Zero
    } else if value <= 140.0 {
        amount(round_to_increment(value, 5.0))
    } else {
        amount(round_to_increment(value, 10.0))
    }
}

/// Carbohydrate, fiber, sugars, protein: <0.5 → 0; <1 → "less than 1g"; else nearest 1
pub fn round_carb_protein(value: f64) -> RoundedValue {
    if value < 0.5 {
        RoundedValue::Zero
    } else if value < 1.0 {
        RoundedValue::LessThan(1.0)
    } else {
        amount(round_to_increment(value, 1.0))
    }
}

/// <0.1 → 0; ≤0.8 → nearest 0.1; else nearest 0.2
pub fn round_fluoride(value: f64) -> RoundedValue {
    if value < 0.1 {
        RoundedValue::Zero
    } else if value <= 0.8 {
        amount(round_to_increment(value, 0.1))
    } else {
        amount(round_to_increment(value, 0.2))
    }
}

/// Serving size in g or mL: ≥5 → nearest 1; ≥2 → nearest 0.5; else nearest 0.1
pub fn round_serving_size(value: f64) -> f64 {
    if value >= 5.0 {
        round_to_increment(value, 1.0)
    } else if value >= 2.0 {
        round_to_increment(value, 0.5)
    } else {
        round_to_increment(value, 0.1)
    }
}

/// Servings per container and whether the label needs "about"
///
/// >5 → nearest whole; 2 to 5 → nearest 0.5 with "about"; <2 → nearest whole.
pub fn round_servings_per_container(value: f64) -> (f64, bool) {
    if value > 5.0 {
        (round_to_increment(value, 1.0), false)
    } else if value >= 2.0 {
        (round_to_increment(value, 0.5), true)
    } else {
        (round_to_increment(value, 1.0), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amt(v: RoundedValue) -> f64 {
        v.amount().unwrap()
    }

    #[test]
    fn test_half_up() {
        assert_eq!(round_to_increment(47.5, 5.0), 50.0);
        assert_eq!(round_to_increment(55.0, 10.0), 60.0);
        assert_eq!(round_to_increment(2.5, 1.0), 3.0);
        assert_eq!(round_to_increment(0.15, 0.1), 0.2);
        assert_eq!(round_to_increment(0.25, 0.5), 0.5);
        assert_eq!(round_to_increment(3.2, 0.5), 3.0);
        assert_eq!(round_to_increment(3.25, 0.5), 3.5);
    }

    #[test]
    fn test_calories() {
        assert_eq!(round_calories(4.9), RoundedValue::Zero);
        assert_eq!(amt(round_calories(45.0)), 45.0);
        assert_eq!(amt(round_calories(47.5)), 50.0);
        assert_eq!(amt(round_calories(50.0)), 50.0);
        assert_eq!(amt(round_calories(52.5)), 50.0);
        assert_eq!(amt(round_calories(55.0)), 60.0);
        assert_eq!(amt(round_calories(5.0)), 5.0);
    }

    #[test]
    fn test_fat() {
        assert_eq!(round_fat(0.49), RoundedValue::Zero);
        assert_eq!(amt(round_fat(0.5)), 0.5);
        assert_eq!(amt(round_fat(4.99)), 5.0);
        assert_eq!(amt(round_fat(4.74)), 4.5);
        assert_eq!(amt(round_fat(5.0)), 5.0);
        assert_eq!(amt(round_fat(5.5)), 6.0);
    }

    #[test]
    fn test_cholesterol() {
        assert_eq!(round_cholesterol(1.9), RoundedValue::Zero);
        assert_eq!(round_cholesterol(2.0), RoundedValue::LessThan(5.0));
        assert_eq!(round_cholesterol(3.0), RoundedValue::LessThan(5.0));
        assert_eq!(round_cholesterol(5.0), RoundedValue::LessThan(5.0));
        assert_eq!(amt(round_cholesterol(7.0)), 5.0);
        assert_eq!(amt(round_cholesterol(7.5)), 10.0);
    }

    #[test]
    fn test_sodium_potassium() {
        assert_eq!(round_sodium_potassium(4.0), RoundedValue::Zero);
        assert_eq!(amt(round_sodium_potassium(100.0)), 100.0);
        assert_eq!(amt(round_sodium_potassium(137.5)), 140.0);
        assert_eq!(amt(round_sodium_potassium(140.0)), 140.0);
        assert_eq!(amt(round_sodium_potassium(145.0)), 150.0);
        assert_eq!(amt(round_nutrient(NutrientKey::Potassium, 212.0)), 210.0);
    }

    #[test]
    fn test_carb_protein() {
        assert_eq!(round_carb_protein(0.4), RoundedValue::Zero);
        assert_eq!(round_carb_protein(0.5), RoundedValue::LessThan(1.0));
        assert_eq!(round_carb_protein(0.99), RoundedValue::LessThan(1.0));
        assert_eq!(amt(round_carb_protein(1.0)), 1.0);
        assert_eq!(amt(round_carb_protein(12.5)), 13.0);
    }

    #[test]
    fn test_fluoride() {
        assert_eq!(round_fluoride(0.05), RoundedValue::Zero);
        assert_eq!(amt(round_fluoride(0.35)), 0.4);
        assert_eq!(amt(round_fluoride(0.8)), 0.8);
        assert_eq!(amt(round_fluoride(0.9)), 1.0);
    }

    #[test]
    fn test_unrounded_minerals() {
        assert_eq!(round_nutrient(NutrientKey::Iron, 1.234), RoundedValue::Amount(1.234));
        assert_eq!(round_nutrient(NutrientKey::Calcium, 0.0), RoundedValue::Zero);
    }

    #[test]
    fn test_serving_size() {
        assert_eq!(round_serving_size(28.4), 28.0);
        assert_eq!(round_serving_size(5.0), 5.0);
        assert_eq!(round_serving_size(3.3), 3.5);
        assert_eq!(round_serving_size(1.26), 1.3);
    }

    #[test]
    fn test_servings_per_container() {
        assert_eq!(round_servings_per_container(8.4), (8.0, false));
        assert_eq!(round_servings_per_container(5.0), (5.0, true));
        assert_eq!(round_servings_per_container(3.3), (3.5, true));
        assert_eq!(round_servings_per_container(3.2), (3.0, true));
        assert_eq!(round_servings_per_container(2.0), (2.0, true));
        assert_eq!(round_servings_per_container(1.4), (1.0, false));
        assert_eq!(round_servings_per_container(1.5), (2.0, false));
    }
}
