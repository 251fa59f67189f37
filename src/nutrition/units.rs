//! Unit spellings and conversion constants
//!
//! Maps free-text unit tokens to canonical units and provides the fixed
//! volume, weight and count factors the resolver works with.

use crate::models::{NormalizedUnit, Unit};

// ============================================================================
// Volume Conversion Constants (to milliliters)
// ============================================================================

/// Milliliters per US cup
pub const ML_PER_CUP: f64 = 236.588;
/// Milliliters per tablespoon
pub const ML_PER_TBSP: f64 = 14.787;
/// Milliliters per teaspoon
pub const ML_PER_TSP: f64 = 4.929;
/// Milliliters per fluid ounce
pub const ML_PER_FL_OZ: f64 = 29.574;
/// Milliliters per liter
pub const ML_PER_LITER: f64 = 1000.0;

// ============================================================================
// Weight Conversion Constants (to grams)
// ============================================================================

pub const G_PER_KG: f64 = 1000.0;
pub const G_PER_OZ: f64 = 28.35;
pub const G_PER_LB: f64 = 453.6;

/// About 1/16 tsp
pub const PINCH_GRAMS: f64 = 0.3;
/// About 1/8 tsp
pub const DASH_GRAMS: f64 = 0.6;

/// Water density, assumed for volume measures of unknown ingredients
pub const WATER_DENSITY_G_PER_ML: f64 = 1.0;

// ============================================================================
// Unit Recognition
// ============================================================================

/// Canonicalize a unit token; unrecognized tokens pass through lower-cased
pub fn normalize_unit(raw: &str) -> NormalizedUnit {
    let lower = raw.to_lowercase();
    let trimmed = lower.trim();

    let unit = match trimmed {
        "cup" | "cups" | "c" | "c." => Unit::Cup,
        "tablespoon" | "tablespoons" | "tbsp" | "tbsp." | "tbs" | "tbs." | "tb" => Unit::Tbsp,
        "teaspoon" | "teaspoons" | "tsp" | "tsp." | "t" | "t." => Unit::Tsp,
        "fluid ounce" | "fluid ounces" | "fl oz" | "fl. oz." | "fl oz." | "fl_oz" => Unit::FlOz,
        "milliliter" | "milliliters" | "ml" => Unit::Ml,
        "liter" | "liters" | "l" => Unit::L,
        "gram" | "grams" | "g" => Unit::G,
        "kilogram" | "kilograms" | "kg" => Unit::Kg,
        "ounce" | "ounces" | "oz" | "oz." => Unit::Oz,
        "pound" | "pounds" | "lb" | "lbs" | "lb." => Unit::Lb,
        "whole" | "each" => Unit::Whole,
        "large" => Unit::Large,
        "medium" => Unit::Medium,
        "small" => Unit::Small,
        "piece" | "pieces" => Unit::Piece,
        "slice" | "slices" => Unit::Slice,
        "clove" | "cloves" => Unit::Clove,
        "stick" | "sticks" => Unit::Stick,
        "packet" | "packets" => Unit::Packet,
        "pinch" => Unit::Pinch,
        "dash" => Unit::Dash,
        other => return NormalizedUnit::Other(other.to_string()),
    };

    NormalizedUnit::Known(unit)
}

/// Grams per unit for weight units
pub fn grams_per_unit(unit: Unit) -> Option<f64> {
    match unit {
        Unit::G => Some(1.0),
        Unit::Kg => Some(G_PER_KG),
        Unit::Oz => Some(G_PER_OZ),
        Unit::Lb => Some(G_PER_LB),
        _ => None,
    }
}

/// Milliliters per unit for volume units
pub fn ml_per_unit(unit: Unit) -> Option<f64> {
    match unit {
        Unit::Cup => Some(ML_PER_CUP),
        Unit::Tbsp => Some(ML_PER_TBSP),
        Unit::Tsp => Some(ML_PER_TSP),
        Unit::FlOz => Some(ML_PER_FL_OZ),
        Unit::Ml => Some(1.0),
        Unit::L => Some(ML_PER_LITER),
        _ => None,
    }
}

/// Convert a volume amount to milliliters
pub fn to_ml(quantity: f64, unit: Unit) -> Option<f64> {
    ml_per_unit(unit).map(|factor| quantity * factor)
}

/// Rough default weight of one count unit for ingredients the table doesn't know
pub fn default_count_grams(unit: Unit) -> Option<f64> {
    match unit {
        Unit::Whole => Some(50.0),
        Unit::Large => Some(60.0),
        Unit::Medium => Some(50.0),
        Unit::Small => Some(40.0),
        Unit::Piece => Some(30.0),
        Unit::Slice => Some(30.0),
        Unit::Clove => Some(3.0),
        Unit::Stick => Some(113.0),
        Unit::Packet => Some(7.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(raw: &str) -> Option<Unit> {
        normalize_unit(raw).known()
    }

    #[test]
    fn test_normalize_volume_spellings() {
        assert_eq!(known("Cups"), Some(Unit::Cup));
        assert_eq!(known("c."), Some(Unit::Cup));
        assert_eq!(known("Tbs."), Some(Unit::Tbsp));
        assert_eq!(known("tsp."), Some(Unit::Tsp));
        assert_eq!(known("fl. oz."), Some(Unit::FlOz));
        assert_eq!(known(" milliliters "), Some(Unit::Ml));
        assert_eq!(known("L"), Some(Unit::L));
    }

    #[test]
    fn test_normalize_weight_and_count_spellings() {
        assert_eq!(known("lbs"), Some(Unit::Lb));
        assert_eq!(known("oz."), Some(Unit::Oz));
        assert_eq!(known("each"), Some(Unit::Whole));
        assert_eq!(known("cloves"), Some(Unit::Clove));
        assert_eq!(known("packets"), Some(Unit::Packet));
    }

    #[test]
    fn test_canonical_tokens_are_fixed_points() {
        for unit in Unit::ALL {
            assert_eq!(known(unit.as_str()), Some(unit));
        }
    }

    #[test]
    fn test_unknown_unit_passes_through() {
        assert_eq!(normalize_unit(" Scoop "), NormalizedUnit::Other("scoop".to_string()));
    }

    #[test]
    fn test_factors() {
        assert_eq!(grams_per_unit(Unit::Lb), Some(G_PER_LB));
        assert_eq!(grams_per_unit(Unit::Cup), None);
        assert_eq!(ml_per_unit(Unit::L), Some(1000.0));
        assert_eq!(ml_per_unit(Unit::G), None);
        assert!((to_ml(2.0, Unit::Tbsp).unwrap() - 29.574).abs() < 0.001);
        assert_eq!(default_count_grams(Unit::Clove), Some(3.0));
        assert_eq!(default_count_grams(Unit::Pinch), None);
    }
}
