//! Nutrition calculation module
//!
//! Name and unit normalization, volume-to-weight resolution, recipe
//! aggregation and FDA label rounding.

pub mod aggregate;
pub mod calculator;
pub mod conversion_table;
pub mod daily_values;
pub mod format;
pub mod label;
pub mod normalize;
pub mod resolver;
pub mod rounding;
pub mod sanity;
pub mod units;

pub use aggregate::aggregate;
pub use calculator::NutritionCalculator;
pub use conversion_table::{supported_ingredients, SupportedIngredient};
pub use daily_values::{percent_dv, percent_dv_by_name};
pub use format::{format_servings_per_container, format_value};
pub use label::compute_per_serving;
pub use normalize::{normalize, normalize_ingredient_name};
pub use resolver::{resolve_local, VolumeResolver};
pub use rounding::{round_nutrient, round_serving_size, round_servings_per_container};
pub use sanity::{detect_anomalies, Anomaly};
pub use units::normalize_unit;
