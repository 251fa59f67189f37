//! Conversion results produced by the volume-to-weight resolver
//!
//! Results are immutable once built; the constructors enforce the
//! source/confidence pairing rules.

use serde::{Deserialize, Serialize};

use super::measurement::NormalizedUnit;

/// Where a gram weight came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionSource {
    /// Already a weight unit
    Direct,
    /// Curated table, density, or built-in constant
    Table,
    /// USDA FoodData Central portion record
    UsdaPortion,
    /// LLM or default-weight estimate; always needs review
    LlmEstimate,
    /// Weight entered by the user
    UserProvided,
}

/// Qualitative trust level of a derived weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Some(Confidence::High),
            "medium" => Some(Confidence::Medium),
            "low" => Some(Confidence::Low),
            _ => None,
        }
    }
}

/// A resolved measurement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    ingredient: String,
    quantity: f64,
    unit: NormalizedUnit,
    /// Unit text as entered, e.g. "Tbs."
    original_unit: String,
    grams: f64,
    source: ConversionSource,
    confidence: Confidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl ConversionResult {
    /// Weight unit pass-through, always high confidence
    pub fn direct(ingredient: &str, quantity: f64, unit: NormalizedUnit, grams: f64) -> Self {
        Self::build(ingredient, quantity, unit, grams, ConversionSource::Direct, Confidence::High, None)
    }

    pub fn table(
        ingredient: &str,
        quantity: f64,
        unit: NormalizedUnit,
        grams: f64,
        confidence: Confidence,
        note: Option<String>,
    ) -> Self {
        Self::build(ingredient, quantity, unit, grams, ConversionSource::Table, confidence, note)
    }

    pub fn usda_portion(
        ingredient: &str,
        quantity: f64,
        unit: NormalizedUnit,
        grams: f64,
        note: Option<String>,
    ) -> Self {
        Self::build(
            ingredient,
            quantity,
            unit,
            grams,
            ConversionSource::UsdaPortion,
            Confidence::High,
            note,
        )
    }

    /// Estimated weight; a reported high confidence is capped at medium
    pub fn estimate(
        ingredient: &str,
        quantity: f64,
        unit: NormalizedUnit,
        grams: f64,
        confidence: Confidence,
        note: Option<String>,
    ) -> Self {
        let confidence = confidence.min(Confidence::Medium);
        Self::build(
            ingredient,
            quantity,
            unit,
            grams,
            ConversionSource::LlmEstimate,
            confidence,
            note,
        )
    }

    pub fn user_provided(ingredient: &str, quantity: f64, unit: NormalizedUnit, grams: f64) -> Self {
        Self::build(
            ingredient,
            quantity,
            unit,
            grams,
            ConversionSource::UserProvided,
            Confidence::High,
            None,
        )
    }

    /// Terminal stage: nothing could produce a weight
    pub fn unresolved(ingredient: &str, quantity: f64, unit: NormalizedUnit) -> Self {
        let note = format!(
            "Could not convert {} {} of {}. Please enter weight manually.",
            quantity, unit, ingredient
        );
        Self::build(
            ingredient,
            quantity,
            unit,
            0.0,
            ConversionSource::LlmEstimate,
            Confidence::Low,
            Some(note),
        )
    }

    fn build(
        ingredient: &str,
        quantity: f64,
        unit: NormalizedUnit,
        grams: f64,
        source: ConversionSource,
        confidence: Confidence,
        note: Option<String>,
    ) -> Self {
        let grams = if grams.is_finite() { grams.max(0.0) } else { 0.0 };
        Self {
            ingredient: ingredient.to_string(),
            quantity,
            original_unit: unit.to_string(),
            unit,
            grams,
            source,
            confidence,
            note,
        }
    }

    /// Record the unit text the caller actually typed
    pub fn with_original_unit(mut self, raw_unit: &str) -> Self {
        self.original_unit = raw_unit.trim().to_string();
        self
    }

    pub fn ingredient(&self) -> &str {
        &self.ingredient
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn unit(&self) -> &NormalizedUnit {
        &self.unit
    }

    pub fn original_unit(&self) -> &str {
        &self.original_unit
    }

    pub fn grams(&self) -> f64 {
        self.grams
    }

    pub fn source(&self) -> ConversionSource {
        self.source
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}
