//! Nutrient keys and per-100g nutrient profiles
//!
//! Used by the aggregator, the rounding engine and the USDA lookup.

use serde::{Deserialize, Serialize};

/// One of the fifteen tracked label nutrients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NutrientKey {
    #[serde(rename = "calories")]
    Calories,
    #[serde(rename = "total_fat_g")]
    TotalFat,
    #[serde(rename = "saturated_fat_g")]
    SaturatedFat,
    #[serde(rename = "trans_fat_g")]
    TransFat,
    #[serde(rename = "cholesterol_mg")]
    Cholesterol,
    #[serde(rename = "sodium_mg")]
    Sodium,
    #[serde(rename = "total_carbohydrate_g")]
    TotalCarbohydrate,
    #[serde(rename = "dietary_fiber_g")]
    DietaryFiber,
    #[serde(rename = "total_sugars_g")]
    TotalSugars,
    #[serde(rename = "added_sugars_g")]
    AddedSugars,
    #[serde(rename = "protein_g")]
    Protein,
    #[serde(rename = "vitamin_d_mcg")]
    VitaminD,
    #[serde(rename = "calcium_mg")]
    Calcium,
    #[serde(rename = "iron_mg")]
    Iron,
    #[serde(rename = "potassium_mg")]
    Potassium,
}

impl NutrientKey {
    /// All keys in label order
    pub const ALL: [NutrientKey; 15] = [
        NutrientKey::Calories,
        NutrientKey::TotalFat,
        NutrientKey::SaturatedFat,
        NutrientKey::TransFat,
        NutrientKey::Cholesterol,
        NutrientKey::Sodium,
        NutrientKey::TotalCarbohydrate,
        NutrientKey::DietaryFiber,
        NutrientKey::TotalSugars,
        NutrientKey::AddedSugars,
        NutrientKey::Protein,
        NutrientKey::VitaminD,
        NutrientKey::Calcium,
        NutrientKey::Iron,
        NutrientKey::Potassium,
    ];

    /// Field name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            NutrientKey::Calories => "calories",
            NutrientKey::TotalFat => "total_fat_g",
            NutrientKey::SaturatedFat => "saturated_fat_g",
            NutrientKey::TransFat => "trans_fat_g",
            NutrientKey::Cholesterol => "cholesterol_mg",
            NutrientKey::Sodium => "sodium_mg",
            NutrientKey::TotalCarbohydrate => "total_carbohydrate_g",
            NutrientKey::DietaryFiber => "dietary_fiber_g",
            NutrientKey::TotalSugars => "total_sugars_g",
            NutrientKey::AddedSugars => "added_sugars_g",
            NutrientKey::Protein => "protein_g",
            NutrientKey::VitaminD => "vitamin_d_mcg",
            NutrientKey::Calcium => "calcium_mg",
            NutrientKey::Iron => "iron_mg",
            NutrientKey::Potassium => "potassium_mg",
        }
    }

    /// Parse a wire field name
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == s)
    }

    /// Display unit, derived from the key suffix
    pub fn unit(&self) -> &'static str {
        let name = self.as_str();
        if name.ends_with("_mcg") {
            "mcg"
        } else if name.ends_with("_mg") {
            "mg"
        } else if name.ends_with("_g") {
            "g"
        } else {
            ""
        }
    }
}

/// Nutrient amounts per 100 g of an ingredient (or of a finished recipe)
///
/// `None` means the value is unknown, which is different from zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub total_fat_g: Option<f64>,
    #[serde(default)]
    pub saturated_fat_g: Option<f64>,
    #[serde(default)]
    pub trans_fat_g: Option<f64>,
    #[serde(default)]
    pub cholesterol_mg: Option<f64>,
    #[serde(default)]
    pub sodium_mg: Option<f64>,
    #[serde(default)]
    pub total_carbohydrate_g: Option<f64>,
    #[serde(default)]
    pub dietary_fiber_g: Option<f64>,
    #[serde(default)]
    pub total_sugars_g: Option<f64>,
    #[serde(default)]
    pub added_sugars_g: Option<f64>,
    #[serde(default)]
    pub protein_g: Option<f64>,
    #[serde(default)]
    pub vitamin_d_mcg: Option<f64>,
    #[serde(default)]
    pub calcium_mg: Option<f64>,
    #[serde(default)]
    pub iron_mg: Option<f64>,
    #[serde(default)]
    pub potassium_mg: Option<f64>,
}

impl NutrientProfile {
    /// Profile with every key known and zero
    pub fn zeroed() -> Self {
        let mut profile = Self::default();
        for key in NutrientKey::ALL {
            profile.set(key, Some(0.0));
        }
        profile
    }

    pub fn get(&self, key: NutrientKey) -> Option<f64> {
        *self.slot(key)
    }

    pub fn set(&mut self, key: NutrientKey, value: Option<f64>) {
        *self.slot_mut(key) = value;
    }

    /// Scale every known value by a multiplier; unknown values stay unknown
    pub fn scale(&self, multiplier: f64) -> Self {
        let mut scaled = Self::default();
        for key in NutrientKey::ALL {
            scaled.set(key, self.get(key).map(|v| v * multiplier));
        }
        scaled
    }

    /// Iterate (key, value) pairs in label order
    pub fn iter(&self) -> impl Iterator<Item = (NutrientKey, Option<f64>)> + '_ {
        NutrientKey::ALL.iter().map(move |&k| (k, self.get(k)))
    }

    /// True when no key carries a value
    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, v)| v.is_none())
    }

    fn slot(&self, key: NutrientKey) -> &Option<f64> {
        match key {
            NutrientKey::Calories => &self.calories,
            NutrientKey::TotalFat => &self.total_fat_g,
            NutrientKey::SaturatedFat => &self.saturated_fat_g,
            NutrientKey::TransFat => &self.trans_fat_g,
            NutrientKey::Cholesterol => &self.cholesterol_mg,
            NutrientKey::Sodium => &self.sodium_mg,
            NutrientKey::TotalCarbohydrate => &self.total_carbohydrate_g,
            NutrientKey::DietaryFiber => &self.dietary_fiber_g,
            NutrientKey::TotalSugars => &self.total_sugars_g,
            NutrientKey::AddedSugars => &self.added_sugars_g,
            NutrientKey::Protein => &self.protein_g,
            NutrientKey::VitaminD => &self.vitamin_d_mcg,
            NutrientKey::Calcium => &self.calcium_mg,
            NutrientKey::Iron => &self.iron_mg,
            NutrientKey::Potassium => &self.potassium_mg,
        }
    }

    fn slot_mut(&mut self, key: NutrientKey) -> &mut Option<f64> {
        match key {
            NutrientKey::Calories => &mut self.calories,
            NutrientKey::TotalFat => &mut self.total_fat_g,
            NutrientKey::SaturatedFat => &mut self.saturated_fat_g,
            NutrientKey::TransFat => &mut self.trans_fat_g,
            NutrientKey::Cholesterol => &mut self.cholesterol_mg,
            NutrientKey::Sodium => &mut self.sodium_mg,
            NutrientKey::TotalCarbohydrate => &mut self.total_carbohydrate_g,
            NutrientKey::DietaryFiber => &mut self.dietary_fiber_g,
            NutrientKey::TotalSugars => &mut self.total_sugars_g,
            NutrientKey::AddedSugars => &mut self.added_sugars_g,
            NutrientKey::Protein => &mut self.protein_g,
            NutrientKey::VitaminD => &mut self.vitamin_d_mcg,
            NutrientKey::Calcium => &mut self.calcium_mg,
            NutrientKey::Iron => &mut self.iron_mg,
            NutrientKey::Potassium => &mut self.potassium_mg,
        }
    }
}
