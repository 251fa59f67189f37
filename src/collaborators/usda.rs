//! USDA FoodData Central client
//!
//! Provides per-100g nutrient profiles and household portions. Searches are
//! restricted to the Foundation and SR Legacy datasets, which report
//! nutrients per 100 g.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::{DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_USDA_BASE_URL};
use crate::models::{NormalizedUnit, NutrientKey, NutrientProfile};
use crate::nutrition::normalize_unit;

use super::{CollaboratorError, NutrientLookup, Portion, PortionLookup};

const SERVICE: &str = "USDA FoodData Central";

/// Datasets searched for generic ingredients
pub const GENERIC_DATA_TYPES: &[&str] = &["Foundation", "SR Legacy"];

/// FoodData Central nutrient number → label nutrient
const NUTRIENT_IDS: &[(u32, NutrientKey)] = &[
    (1008, NutrientKey::Calories),
    (1004, NutrientKey::TotalFat),
    (1258, NutrientKey::SaturatedFat),
    (1257, NutrientKey::TransFat),
    (1253, NutrientKey::Cholesterol),
    (1093, NutrientKey::Sodium),
    (1005, NutrientKey::TotalCarbohydrate),
    (1079, NutrientKey::DietaryFiber),
    (2000, NutrientKey::TotalSugars),
    (1235, NutrientKey::AddedSugars),
    (1003, NutrientKey::Protein),
    (1114, NutrientKey::VitaminD),
    (1087, NutrientKey::Calcium),
    (1089, NutrientKey::Iron),
    (1092, NutrientKey::Potassium),
];

#[derive(Debug, Clone)]
pub struct UsdaClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for UsdaClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_USDA_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

/// One search hit
#[derive(Debug, Clone, Deserialize)]
pub struct FoodSearchHit {
    #[serde(rename = "fdcId")]
    pub fdc_id: u64,
    pub description: String,
    #[serde(rename = "dataType", default)]
    pub data_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<FoodSearchHit>,
}

/// Food record as returned by `/food/{fdcId}`
#[derive(Debug, Clone, Deserialize)]
pub struct FoodDetail {
    #[serde(rename = "fdcId")]
    pub fdc_id: u64,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "foodNutrients", default)]
    pub food_nutrients: Vec<FoodNutrient>,
    #[serde(rename = "foodPortions", default)]
    pub food_portions: Vec<FoodPortion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FoodNutrient {
    #[serde(default)]
    pub nutrient: Option<NutrientRef>,
    #[serde(default)]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NutrientRef {
    pub id: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FoodPortion {
    #[serde(rename = "measureUnit", default)]
    pub measure_unit: Option<MeasureUnit>,
    #[serde(rename = "gramWeight", default)]
    pub gram_weight: Option<f64>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub modifier: Option<String>,
    #[serde(rename = "portionDescription", default)]
    pub portion_description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeasureUnit {
    #[serde(default)]
    pub name: String,
}

impl FoodDetail {
    /// Per-100g profile from the nutrient list; unmapped nutrients are ignored
    pub fn profile(&self) -> NutrientProfile {
        let mut profile = NutrientProfile::default();
        for entry in &self.food_nutrients {
            let (Some(nutrient), Some(amount)) = (&entry.nutrient, entry.amount) else {
                continue;
            };
            if let Some((_, key)) = NUTRIENT_IDS.iter().find(|(id, _)| *id == nutrient.id) {
                profile.set(*key, Some(amount));
            }
        }
        profile
    }

    /// First portion whose measure unit normalizes to `unit`
    pub fn portion_for(&self, unit: &NormalizedUnit) -> Option<Portion> {
        self.food_portions.iter().find_map(|p| {
            let measure = p.measure_unit.as_ref()?;
            if normalize_unit(&measure.name) != *unit {
                return None;
            }
            let gram_weight = p.gram_weight.filter(|g| *g > 0.0)?;
            let amount = p.amount.filter(|a| *a > 0.0).unwrap_or(1.0);
            let description = p
                .portion_description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| {
                    let mut d = format!("{} {}", amount, measure.name);
                    if let Some(modifier) = p.modifier.as_deref().filter(|m| !m.is_empty()) {
                        d.push_str(", ");
                        d.push_str(modifier);
                    }
                    format!("{} = {}g", d, gram_weight)
                });
            Some(Portion {
                gram_weight,
                amount,
                description,
            })
        })
    }
}

pub struct UsdaClient {
    client: reqwest::Client,
    config: UsdaClientConfig,
}

impl UsdaClient {
    pub fn new(config: UsdaClientConfig) -> Result<Self, CollaboratorError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Search foods by free text
    pub async fn search(
        &self,
        query: &str,
        data_types: &[&str],
        page_size: u32,
    ) -> Result<Vec<FoodSearchHit>, CollaboratorError> {
        let url = format!("{}/foods/search", self.config.base_url);
        let mut params = vec![
            ("query", query.to_string()),
            ("pageSize", page_size.to_string()),
            ("api_key", self.config.api_key.clone()),
        ];
        if !data_types.is_empty() {
            params.push(("dataType", data_types.join(",")));
        }

        let response = self.client.get(&url).query(&params).send().await?;
        if !response.status().is_success() {
            return Err(CollaboratorError::Status {
                service: SERVICE,
                status: response.status().as_u16(),
            });
        }

        let body: SearchResponse = response.json().await?;
        debug!("USDA search '{}' returned {} foods", query, body.foods.len());
        Ok(body.foods)
    }

    /// Fetch one food record
    pub async fn get_food(&self, fdc_id: u64) -> Result<FoodDetail, CollaboratorError> {
        let url = format!("{}/food/{}", self.config.base_url, fdc_id);
        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.config.api_key.as_str())])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(CollaboratorError::Status {
                service: SERVICE,
                status: response.status().as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    async fn first_hit(&self, query: &str) -> Result<Option<FoodSearchHit>, CollaboratorError> {
        Ok(self.search(query, GENERIC_DATA_TYPES, 1).await?.into_iter().next())
    }
}

#[async_trait]
impl NutrientLookup for UsdaClient {
    async fn lookup(
        &self,
        canonical_name: &str,
        raw_name: &str,
        fdc_id_hint: Option<u64>,
    ) -> Result<Option<NutrientProfile>, CollaboratorError> {
        if let Some(fdc_id) = fdc_id_hint {
            return Ok(Some(self.get_food(fdc_id).await?.profile()));
        }

        let mut queries = vec![canonical_name];
        let raw_name = raw_name.trim();
        if !raw_name.is_empty() && !raw_name.eq_ignore_ascii_case(canonical_name) {
            queries.push(raw_name);
        }

        for query in queries {
            if let Some(hit) = self.first_hit(query).await? {
                debug!("USDA match for '{}': {} ({})", canonical_name, hit.description, hit.fdc_id);
                return Ok(Some(self.get_food(hit.fdc_id).await?.profile()));
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl PortionLookup for UsdaClient {
    async fn find_portion(
        &self,
        canonical_name: &str,
        unit: &NormalizedUnit,
    ) -> Result<Option<Portion>, CollaboratorError> {
        let Some(hit) = self.first_hit(canonical_name).await? else {
            return Ok(None);
        };
        let food = self.get_food(hit.fdc_id).await?;
        Ok(food.portion_for(unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Unit;

    fn butter_json() -> serde_json::Value {
        serde_json::json!({
            "fdcId": 789828,
            "description": "Butter, stick, unsalted",
            "dataType": "Foundation",
            "foodNutrients": [
                { "nutrient": { "id": 1008, "name": "Energy", "unitName": "kcal" }, "amount": 717.0 },
                { "nutrient": { "id": 1004, "name": "Total lipid (fat)" }, "amount": 81.1 },
                { "nutrient": { "id": 1093, "name": "Sodium, Na" }, "amount": 11.0 },
                { "nutrient": { "id": 1051, "name": "Water" }, "amount": 15.9 },
                { "nutrient": { "id": 1003, "name": "Protein" } },
                { "amount": 3.0 }
            ],
            "foodPortions": [
                { "measureUnit": { "name": "tbsp" }, "gramWeight": 14.2, "amount": 1.0 },
                { "measureUnit": { "name": "cup" }, "gramWeight": 227.0, "modifier": "" },
                { "measureUnit": { "name": "stick" }, "gramWeight": 0.0, "amount": 1.0 },
                { "measureUnit": { "name": "undetermined" }, "gramWeight": 5.0,
                  "portionDescription": "1 pat" }
            ]
        })
    }

    fn butter() -> FoodDetail {
        serde_json::from_value(butter_json()).unwrap()
    }

    #[test]
    fn test_profile_maps_known_ids() {
        let profile = butter().profile();
        assert_eq!(profile.calories, Some(717.0));
        assert_eq!(profile.total_fat_g, Some(81.1));
        assert_eq!(profile.sodium_mg, Some(11.0));
        // present but without an amount
        assert_eq!(profile.protein_g, None);
        assert_eq!(profile.saturated_fat_g, None);
    }

    #[test]
    fn test_portion_matching() {
        let food = butter();

        let tbsp = food.portion_for(&NormalizedUnit::Known(Unit::Tbsp)).unwrap();
        assert!((tbsp.gram_weight - 14.2).abs() < 0.001);

        // missing amount defaults to 1
        let cup = food.portion_for(&NormalizedUnit::Known(Unit::Cup)).unwrap();
        assert!((cup.amount - 1.0).abs() < 0.001);
        assert_eq!(cup.description, "1 cup = 227g");

        // zero gram weight is unusable
        assert!(food.portion_for(&NormalizedUnit::Known(Unit::Stick)).is_none());
        assert!(food.portion_for(&NormalizedUnit::Known(Unit::Tsp)).is_none());

        let other = food
            .portion_for(&NormalizedUnit::Other("undetermined".to_string()))
            .unwrap();
        assert_eq!(other.description, "1 pat");
    }

    #[test]
    fn test_search_response() {
        let body: SearchResponse = serde_json::from_value(serde_json::json!({
            "totalHits": 1,
            "foods": [{ "fdcId": 169761, "description": "Flour, wheat, all-purpose", "dataType": "SR Legacy" }]
        }))
        .unwrap();
        assert_eq!(body.foods.len(), 1);
        assert_eq!(body.foods[0].fdc_id, 169761);
        assert_eq!(body.foods[0].data_type.as_deref(), Some("SR Legacy"));

        let empty: SearchResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(empty.foods.is_empty());
    }

    #[test]
    fn test_client_builds() {
        let client = UsdaClient::new(UsdaClientConfig {
            api_key: "DEMO_KEY".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.config.base_url, "https://api.nal.usda.gov/fdc/v1");
    }
}
