//! Volume-to-weight resolver
//!
//! Turns a (ingredient, quantity, unit) measurement into grams by trying a
//! fixed sequence of stages and stopping at the first one that answers:
//!
//! 1. weight units pass through
//! 2. pinch / dash constants
//! 3. curated table, exact unit
//! 4. curated table, generic "whole" weight for size units
//! 5. curated table, density
//! 6. any volume unit at water density
//! 7. default weight per count unit
//! 8. USDA portion lookup (collaborator)
//! 9. weight estimator (collaborator)
//! 10. unresolved, 0 g
//!
//! Stages 1-7 are pure. Collaborators are only consulted when the local
//! stages found nothing or only a low-confidence answer.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::collaborators::{PortionLookup, WeightEstimator};
use crate::error::{check_quantity, ValidationResult};
use crate::models::{Confidence, ConversionResult, NormalizedUnit, Unit, UnitCategory};

use super::conversion_table::{self, ConversionEntry};
use super::normalize::normalize;
use super::units::{
    default_count_grams, grams_per_unit, to_ml, DASH_GRAMS, PINCH_GRAMS, WATER_DENSITY_G_PER_ML,
};

/// A normalized measurement, with its table entry if the ingredient has one
struct Request {
    ingredient: String,
    quantity: f64,
    unit: NormalizedUnit,
    entry: Option<&'static ConversionEntry>,
}

impl Request {
    fn new(ingredient: &str, quantity: f64, unit: &str) -> Self {
        let (name, unit) = normalize(ingredient, unit);
        match conversion_table::lookup(&name) {
            Some((canonical, entry)) => Self {
                ingredient: canonical.to_string(),
                quantity,
                unit,
                entry: Some(entry),
            },
            None => Self {
                ingredient: name,
                quantity,
                unit,
                entry: None,
            },
        }
    }

    fn known_unit(&self) -> Option<Unit> {
        self.unit.known()
    }
}

type Stage = fn(&Request) -> Option<ConversionResult>;

const LOCAL_STAGES: &[(&str, Stage)] = &[
    ("direct weight", direct_weight),
    ("pinch/dash", pinch_or_dash),
    ("table unit", table_unit),
    ("table whole fallback", table_whole_fallback),
    ("table density", table_density),
    ("water density", water_density),
    ("count default", count_default),
];

fn direct_weight(req: &Request) -> Option<ConversionResult> {
    let factor = grams_per_unit(req.known_unit()?)?;
    Some(ConversionResult::direct(
        &req.ingredient,
        req.quantity,
        req.unit.clone(),
        req.quantity * factor,
    ))
}

fn pinch_or_dash(req: &Request) -> Option<ConversionResult> {
    let (grams_each, note) = match req.known_unit()? {
        Unit::Pinch => (PINCH_GRAMS, "Pinch estimated as ~1/16 tsp"),
        Unit::Dash => (DASH_GRAMS, "Dash estimated as ~1/8 tsp"),
        _ => return None,
    };
    Some(ConversionResult::table(
        &req.ingredient,
        req.quantity,
        req.unit.clone(),
        req.quantity * grams_each,
        Confidence::Medium,
        Some(note.to_string()),
    ))
}

fn table_unit(req: &Request) -> Option<ConversionResult> {
    let grams_each = req.entry?.grams_per(req.known_unit()?)?;
    Some(ConversionResult::table(
        &req.ingredient,
        req.quantity,
        req.unit.clone(),
        req.quantity * grams_each,
        Confidence::High,
        None,
    ))
}

fn table_whole_fallback(req: &Request) -> Option<ConversionResult> {
    if !req.known_unit()?.is_size_count() {
        return None;
    }
    let grams_each = req.entry?.whole?;
    Some(ConversionResult::table(
        &req.ingredient,
        req.quantity,
        req.unit.clone(),
        req.quantity * grams_each,
        Confidence::High,
        None,
    ))
}

fn table_density(req: &Request) -> Option<ConversionResult> {
    let density = req.entry?.density_g_per_ml?;
    let ml = to_ml(req.quantity, req.known_unit()?)?;
    Some(ConversionResult::table(
        &req.ingredient,
        req.quantity,
        req.unit.clone(),
        ml * density,
        Confidence::High,
        Some("Converted using density".to_string()),
    ))
}

fn water_density(req: &Request) -> Option<ConversionResult> {
    let ml = to_ml(req.quantity, req.known_unit()?)?;
    Some(ConversionResult::table(
        &req.ingredient,
        req.quantity,
        req.unit.clone(),
        ml * WATER_DENSITY_G_PER_ML,
        Confidence::Medium,
        Some("Estimated using water density (1.0 g/ml). Adjust if needed.".to_string()),
    ))
}

fn count_default(req: &Request) -> Option<ConversionResult> {
    let unit = req.known_unit()?;
    if unit.category() != UnitCategory::Count {
        return None;
    }
    let grams_each = default_count_grams(unit)?;
    Some(ConversionResult::estimate(
        &req.ingredient,
        req.quantity,
        req.unit.clone(),
        req.quantity * grams_each,
        Confidence::Low,
        Some(format!(
            "Estimated {}g per {}. Please verify and adjust.",
            grams_each, unit
        )),
    ))
}

fn run_local_stages(req: &Request) -> Option<ConversionResult> {
    LOCAL_STAGES.iter().find_map(|(name, stage)| {
        let result = stage(req)?;
        debug!(
            "Resolved {} {} {} via {} ({:?})",
            req.quantity,
            req.unit,
            req.ingredient,
            name,
            result.confidence()
        );
        Some(result)
    })
}

/// Resolve using only the built-in stages; never touches the network
pub fn resolve_local(ingredient: &str, quantity: f64, unit: &str) -> ValidationResult<ConversionResult> {
    check_quantity(ingredient, quantity)?;
    let req = Request::new(ingredient, quantity, unit);
    let result = run_local_stages(&req).unwrap_or_else(|| {
        ConversionResult::unresolved(&req.ingredient, req.quantity, req.unit.clone())
    });
    Ok(result.with_original_unit(unit))
}

/// Full resolver with optional collaborators
#[derive(Clone, Default)]
pub struct VolumeResolver {
    portion_lookup: Option<Arc<dyn PortionLookup>>,
    estimator: Option<Arc<dyn WeightEstimator>>,
}

impl VolumeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_portion_lookup(mut self, lookup: Arc<dyn PortionLookup>) -> Self {
        self.portion_lookup = Some(lookup);
        self
    }

    pub fn with_estimator(mut self, estimator: Arc<dyn WeightEstimator>) -> Self {
        self.estimator = Some(estimator);
        self
    }

    pub fn has_portion_lookup(&self) -> bool {
        self.portion_lookup.is_some()
    }

    pub fn has_estimator(&self) -> bool {
        self.estimator.is_some()
    }

    /// Resolve a measurement to grams
    ///
    /// Only a negative or non-finite quantity is an error; everything else
    /// yields a result, possibly 0 g at low confidence.
    pub async fn resolve(
        &self,
        ingredient: &str,
        quantity: f64,
        unit: &str,
    ) -> ValidationResult<ConversionResult> {
        check_quantity(ingredient, quantity)?;
        let req = Request::new(ingredient, quantity, unit);
        let result = self.resolve_request(ingredient, unit, &req).await;
        Ok(result.with_original_unit(unit))
    }

    async fn resolve_request(&self, ingredient: &str, unit: &str, req: &Request) -> ConversionResult {
        let local = match run_local_stages(req) {
            Some(result) if result.confidence() != Confidence::Low => return result,
            other => other,
        };

        if let Some(result) = self.try_portion(req).await {
            return result;
        }

        if let Some(result) = local {
            return result;
        }

        if let Some(result) = self.try_estimate(ingredient, unit, req).await {
            return result;
        }

        debug!("Could not resolve {} {} {}", req.quantity, req.unit, req.ingredient);
        ConversionResult::unresolved(&req.ingredient, req.quantity, req.unit.clone())
    }

    async fn try_portion(&self, req: &Request) -> Option<ConversionResult> {
        let lookup = self.portion_lookup.as_ref()?;

        let portion = match lookup.find_portion(&req.ingredient, &req.unit).await {
            Ok(Some(portion)) => portion,
            Ok(None) => return None,
            Err(e) => {
                warn!("Portion lookup failed for '{}': {}", req.ingredient, e);
                return None;
            }
        };

        if !(portion.amount > 0.0 && portion.gram_weight > 0.0) {
            warn!(
                "Ignoring unusable portion for '{}': {} = {}g",
                req.ingredient, portion.amount, portion.gram_weight
            );
            return None;
        }

        let grams = req.quantity / portion.amount * portion.gram_weight;
        debug!("Resolved {} {} {} via USDA portion", req.quantity, req.unit, req.ingredient);
        Some(ConversionResult::usda_portion(
            &req.ingredient,
            req.quantity,
            req.unit.clone(),
            grams,
            Some(format!("From USDA: {}", portion.description)),
        ))
    }

    async fn try_estimate(&self, raw_ingredient: &str, raw_unit: &str, req: &Request) -> Option<ConversionResult> {
        let estimator = self.estimator.as_ref()?;

        let estimate = match estimator.estimate(raw_ingredient, req.quantity, raw_unit).await {
            Ok(Some(estimate)) => estimate,
            Ok(None) => return None,
            Err(e) => {
                warn!("Weight estimate failed for '{}': {}", raw_ingredient, e);
                return None;
            }
        };

        if !estimate.grams.is_finite() || estimate.grams < 0.0 {
            warn!("Ignoring estimate of {}g for '{}'", estimate.grams, raw_ingredient);
            return None;
        }

        debug!("Resolved {} {} {} via weight estimator", req.quantity, req.unit, req.ingredient);
        Some(ConversionResult::estimate(
            &req.ingredient,
            req.quantity,
            req.unit.clone(),
            estimate.grams,
            estimate.confidence,
            Some(format!("LLM estimate: {}", estimate.reasoning)),
        ))
    }
}
