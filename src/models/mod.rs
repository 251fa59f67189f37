//! Data models
//!
//! Plain data passed between the normalizer, resolver, aggregator and label engine.

mod conversion;
mod label;
mod measurement;
mod nutrition;
mod recipe;

pub use conversion::{Confidence, ConversionResult, ConversionSource};
pub use label::{PerServing, RoundedNutrientValue, RoundedValue};
pub use measurement::{Measurement, NormalizedUnit, Unit, UnitCategory};
pub use nutrition::{NutrientKey, NutrientProfile};
pub use recipe::{
    AggregatedIngredient, Flag, FlagKind, RecipeAggregate, RecipeIngredient, Severity,
};
