//! Label-ready rounded values

use serde::Serialize;

use super::nutrition::NutrientKey;

/// A regulation-rounded amount
///
/// `LessThan` carries the threshold shown on the label ("Less than 5mg",
/// "Less than 1g") instead of a numeric placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RoundedValue {
    Zero,
    Amount(f64),
    LessThan(f64),
}

impl RoundedValue {
    /// Numeric value for arithmetic; `LessThan` has none
    pub fn amount(&self) -> Option<f64> {
        match self {
            RoundedValue::Zero => Some(0.0),
            RoundedValue::Amount(v) => Some(*v),
            RoundedValue::LessThan(_) => None,
        }
    }
}

/// One nutrient line of a per-serving label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundedNutrientValue {
    pub key: NutrientKey,
    /// Scaled to the serving, unrounded
    pub raw: Option<f64>,
    pub rounded: Option<RoundedValue>,
    pub percent_dv: Option<u32>,
    pub display: String,
}

/// Per-serving label values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerServing {
    pub serving_size_g: f64,
    pub serving_size_rounded_g: f64,
    pub servings_per_container: f64,
    pub formatted_servings_per_container: String,
    pub rounded_values: Vec<RoundedNutrientValue>,
}

impl PerServing {
    pub fn value(&self, key: NutrientKey) -> Option<&RoundedNutrientValue> {
        self.rounded_values.iter().find(|v| v.key == key)
    }
}
