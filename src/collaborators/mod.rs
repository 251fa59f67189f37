//! External collaborators
//!
//! The resolver and calculator only see these traits. Failures are logged by
//! the caller and treated the same as "nothing found".

pub mod estimator;
pub mod usda;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::models::{Confidence, NormalizedUnit, NutrientProfile};

pub use estimator::LlmWeightEstimator;
pub use usda::{UsdaClient, UsdaClientConfig};

/// Collaborator call failure
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned status {status}")]
    Status { service: &'static str, status: u16 },

    #[error("Could not parse {service} response: {message}")]
    Parse {
        service: &'static str,
        message: String,
    },
}

/// A household measure for a food, e.g. "1 cup = 125 g"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Portion {
    pub gram_weight: f64,
    pub amount: f64,
    pub description: String,
}

/// Estimated weight of a measurement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightEstimate {
    pub grams: f64,
    pub confidence: Confidence,
    pub reasoning: String,
}

/// Per-100g nutrient lookup
#[async_trait]
pub trait NutrientLookup: Send + Sync {
    /// `raw_name` is what the user typed, tried when the canonical name finds nothing
    async fn lookup(
        &self,
        canonical_name: &str,
        raw_name: &str,
        fdc_id_hint: Option<u64>,
    ) -> Result<Option<NutrientProfile>, CollaboratorError>;
}

/// Portion (household measure) lookup
#[async_trait]
pub trait PortionLookup: Send + Sync {
    async fn find_portion(
        &self,
        canonical_name: &str,
        unit: &NormalizedUnit,
    ) -> Result<Option<Portion>, CollaboratorError>;
}

/// Last-resort weight estimator
#[async_trait]
pub trait WeightEstimator: Send + Sync {
    async fn estimate(
        &self,
        ingredient: &str,
        quantity: f64,
        unit: &str,
    ) -> Result<Option<WeightEstimate>, CollaboratorError>;
}
