//! Error types
//!
//! Validation failures are the only errors the calculation core returns.
//! Resolution ambiguity and aggregation problems are reported as data
//! (confidence levels and flags), never as errors.

use thiserror::Error;

/// Input rejected before any computation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Serving size must be greater than 0 (got {0})")]
    InvalidServingSize(f64),

    #[error("Servings per container must be greater than 0 (got {0})")]
    InvalidServingsPerContainer(f64),

    #[error("Quantity for '{ingredient}' must be a non-negative number (got {quantity})")]
    NegativeQuantity { ingredient: String, quantity: f64 },

    #[error("Got {profiles} nutrient profiles for {ingredients} ingredients")]
    ProfileCountMismatch { ingredients: usize, profiles: usize },
}

/// Result type for validated operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Environment configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}' ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

pub(crate) fn check_quantity(ingredient: &str, quantity: f64) -> ValidationResult<()> {
    if quantity.is_finite() && quantity >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NegativeQuantity {
            ingredient: ingredient.to_string(),
            quantity,
        })
    }
}
