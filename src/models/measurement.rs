//! Measurement and canonical unit types

use serde::{Deserialize, Serialize};

/// Canonical measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    // Volume
    Cup,
    Tbsp,
    Tsp,
    FlOz,
    Ml,
    L,
    // Weight
    G,
    Kg,
    Oz,
    Lb,
    // Count
    Whole,
    Large,
    Medium,
    Small,
    Piece,
    Slice,
    Clove,
    Stick,
    Packet,
    Pinch,
    Dash,
}

/// Unit family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    Volume,
    Weight,
    Count,
}

impl Unit {
    pub const ALL: [Unit; 21] = [
        Unit::Cup,
        Unit::Tbsp,
        Unit::Tsp,
        Unit::FlOz,
        Unit::Ml,
        Unit::L,
        Unit::G,
        Unit::Kg,
        Unit::Oz,
        Unit::Lb,
        Unit::Whole,
        Unit::Large,
        Unit::Medium,
        Unit::Small,
        Unit::Piece,
        Unit::Slice,
        Unit::Clove,
        Unit::Stick,
        Unit::Packet,
        Unit::Pinch,
        Unit::Dash,
    ];

    /// Canonical token
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Cup => "cup",
            Unit::Tbsp => "tbsp",
            Unit::Tsp => "tsp",
            Unit::FlOz => "fl_oz",
            Unit::Ml => "ml",
            Unit::L => "l",
            Unit::G => "g",
            Unit::Kg => "kg",
            Unit::Oz => "oz",
            Unit::Lb => "lb",
            Unit::Whole => "whole",
            Unit::Large => "large",
            Unit::Medium => "medium",
            Unit::Small => "small",
            Unit::Piece => "piece",
            Unit::Slice => "slice",
            Unit::Clove => "clove",
            Unit::Stick => "stick",
            Unit::Packet => "packet",
            Unit::Pinch => "pinch",
            Unit::Dash => "dash",
        }
    }

    pub fn category(&self) -> UnitCategory {
        match self {
            Unit::Cup | Unit::Tbsp | Unit::Tsp | Unit::FlOz | Unit::Ml | Unit::L => {
                UnitCategory::Volume
            }
            Unit::G | Unit::Kg | Unit::Oz | Unit::Lb => UnitCategory::Weight,
            _ => UnitCategory::Count,
        }
    }

    /// whole/large/medium/small, the units that may fall back to a generic "whole" weight
    pub fn is_size_count(&self) -> bool {
        matches!(self, Unit::Whole | Unit::Large | Unit::Medium | Unit::Small)
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of unit normalization: a known canonical unit, or the
/// unrecognized token passed through unchanged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NormalizedUnit {
    Known(Unit),
    Other(String),
}

impl NormalizedUnit {
    pub fn known(&self) -> Option<Unit> {
        match self {
            NormalizedUnit::Known(unit) => Some(*unit),
            NormalizedUnit::Other(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NormalizedUnit::Known(unit) => unit.as_str(),
            NormalizedUnit::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for NormalizedUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recipe line as entered: raw ingredient name, amount and unit text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub ingredient: String,
    pub quantity: f64,
    pub unit: String,
}

impl Measurement {
    pub fn new(ingredient: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            ingredient: ingredient.into(),
            quantity,
            unit: unit.into(),
        }
    }
}
