//! Recipe input lines, aggregation results and data-quality flags

use serde::{Deserialize, Serialize};

use super::conversion::ConversionResult;
use super::measurement::Measurement;
use super::nutrition::NutrientProfile;

/// One ingredient line of a recipe calculation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    /// Known FoodData Central record for the nutrient lookup
    #[serde(default)]
    pub fdc_id: Option<u64>,
    /// Weight entered by the user; skips resolution when present
    #[serde(default)]
    pub grams: Option<f64>,
    /// Per-100g nutrients supplied by the caller; skips the lookup when present
    #[serde(default)]
    pub nutrients: Option<NutrientProfile>,
}

impl RecipeIngredient {
    pub fn measurement(&self) -> Measurement {
        Measurement::new(self.name.clone(), self.quantity, self.unit.clone())
    }
}

impl From<Measurement> for RecipeIngredient {
    fn from(m: Measurement) -> Self {
        Self {
            name: m.ingredient,
            quantity: m.quantity,
            unit: m.unit,
            fdc_id: None,
            grams: None,
            nutrients: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagKind {
    LowConfidenceConversion,
    MissingNutrition,
    NoWeight,
    NoYieldWeight,
}

impl FlagKind {
    pub fn severity(&self) -> Severity {
        match self {
            FlagKind::LowConfidenceConversion | FlagKind::MissingNutrition => Severity::Warning,
            FlagKind::NoWeight => Severity::Error,
            FlagKind::NoYieldWeight => Severity::Info,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A data-quality issue found during aggregation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flag {
    pub kind: FlagKind,
    pub severity: Severity,
    /// Position of the ingredient in the input list, for per-ingredient flags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<String>,
    pub message: String,
}

impl Flag {
    pub fn for_ingredient(kind: FlagKind, index: usize, ingredient: &str, message: String) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            index: Some(index),
            ingredient: Some(ingredient.to_string()),
            message,
        }
    }

    pub fn for_recipe(kind: FlagKind, message: String) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            index: None,
            ingredient: None,
            message,
        }
    }
}

/// One ingredient line after aggregation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedIngredient {
    pub conversion: ConversionResult,
    /// Per-100g profile used, if any
    pub profile: Option<NutrientProfile>,
    /// Absolute nutrient amounts this ingredient adds to the recipe
    pub contribution: NutrientProfile,
    /// Share of total raw weight, one decimal
    pub weight_percent: f64,
}

/// Whole-recipe totals and per-100g profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeAggregate {
    /// Input order is preserved
    pub ingredients: Vec<AggregatedIngredient>,
    pub total_raw_weight_g: f64,
    pub yield_weight_g: f64,
    pub yield_weight_supplied: bool,
    pub totals: NutrientProfile,
    pub per_100g: NutrientProfile,
    pub flags: Vec<Flag>,
}

impl RecipeAggregate {
    pub fn has_errors(&self) -> bool {
        self.flags.iter().any(|f| f.severity == Severity::Error)
    }
}
