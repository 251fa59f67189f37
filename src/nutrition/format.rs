//! Label display strings

use crate::models::{NutrientKey, RoundedValue};

use super::rounding::round_servings_per_container;

/// Placeholder for an unknown value
pub const MISSING: &str = "—";

/// Whole numbers without decimals, everything else to one decimal place
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Display string for a rounded label value
pub fn format_value(key: NutrientKey, value: Option<RoundedValue>) -> String {
    let unit = key.unit();
    match value {
        None => MISSING.to_string(),
        Some(RoundedValue::LessThan(threshold)) => {
            format!("Less than {}{}", format_number(threshold), unit)
        }
        Some(RoundedValue::Zero) => format!("0{}", unit),
        Some(RoundedValue::Amount(v)) if key == NutrientKey::Calories => {
            format!("{}", v.trunc() as i64)
        }
        Some(RoundedValue::Amount(v)) => format!("{}{}", format_number(v), unit),
    }
}

/// "about 3.5 servings", "8 servings", "1 serving"
pub fn format_servings_per_container(value: f64) -> String {
    let (rounded, about) = round_servings_per_container(value);
    let prefix = if about { "about " } else { "" };
    let suffix = if rounded == 1.0 { " serving" } else { " servings" };
    format!("{}{}{}", prefix, format_number(rounded), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_value() {
        assert_eq!(format_value(NutrientKey::Sodium, None), "—");
    }

    #[test]
    fn test_less_than_markers() {
        assert_eq!(
            format_value(NutrientKey::Cholesterol, Some(RoundedValue::LessThan(5.0))),
            "Less than 5mg"
        );
        assert_eq!(
            format_value(NutrientKey::DietaryFiber, Some(RoundedValue::LessThan(1.0))),
            "Less than 1g"
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(format_value(NutrientKey::Calories, Some(RoundedValue::Amount(230.0))), "230");
        assert_eq!(format_value(NutrientKey::Calories, Some(RoundedValue::Zero)), "0");
        assert_eq!(format_value(NutrientKey::TotalFat, Some(RoundedValue::Amount(4.5))), "4.5g");
        assert_eq!(format_value(NutrientKey::Sodium, Some(RoundedValue::Amount(160.0))), "160mg");
        assert_eq!(format_value(NutrientKey::VitaminD, Some(RoundedValue::Amount(1.26))), "1.3mcg");
        assert_eq!(format_value(NutrientKey::Protein, Some(RoundedValue::Zero)), "0g");
    }

    #[test]
    fn test_servings_per_container() {
        assert_eq!(format_servings_per_container(3.3), "about 3.5 servings");
        assert_eq!(format_servings_per_container(3.2), "about 3 servings");
        assert_eq!(format_servings_per_container(8.4), "8 servings");
        assert_eq!(format_servings_per_container(1.2), "1 serving");
        assert_eq!(format_servings_per_container(2.0), "about 2 servings");
    }
}
