//! Calculator facade
//!
//! Ties the resolver, the nutrient lookup and the aggregator together.
//! Ingredient lines are resolved concurrently up to a fixed limit; results
//! always come back in input order.

use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::collaborators::{
    CollaboratorError, LlmWeightEstimator, NutrientLookup, UsdaClient, UsdaClientConfig,
};
use crate::config::{Settings, DEFAULT_RESOLVE_CONCURRENCY};
use crate::error::{check_quantity, ValidationError, ValidationResult};
use crate::models::{
    ConversionResult, Measurement, NutrientProfile, PerServing, RecipeAggregate, RecipeIngredient,
};

use super::aggregate::aggregate;
use super::conversion_table;
use super::label;
use super::normalize::normalize;
use super::resolver::VolumeResolver;

#[derive(Clone)]
pub struct NutritionCalculator {
    resolver: VolumeResolver,
    nutrient_lookup: Option<Arc<dyn NutrientLookup>>,
    concurrency: usize,
}

impl Default for NutritionCalculator {
    fn default() -> Self {
        Self::new(VolumeResolver::new())
    }
}

impl NutritionCalculator {
    pub fn new(resolver: VolumeResolver) -> Self {
        Self {
            resolver,
            nutrient_lookup: None,
            concurrency: DEFAULT_RESOLVE_CONCURRENCY,
        }
    }

    pub fn with_nutrient_lookup(mut self, lookup: Arc<dyn NutrientLookup>) -> Self {
        self.nutrient_lookup = Some(lookup);
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Build a calculator with whichever collaborators the settings enable
    pub fn from_settings(settings: &Settings) -> Result<Self, CollaboratorError> {
        let mut resolver = VolumeResolver::new();
        let mut nutrient_lookup: Option<Arc<dyn NutrientLookup>> = None;

        if let Some(api_key) = &settings.usda_api_key {
            let usda = Arc::new(UsdaClient::new(UsdaClientConfig {
                api_key: api_key.clone(),
                base_url: settings.usda_base_url.clone(),
                timeout: settings.http_timeout,
            })?);
            resolver = resolver.with_portion_lookup(usda.clone());
            nutrient_lookup = Some(usda);
            info!("USDA FoodData Central lookups enabled");
        }

        if let Some(api_key) = &settings.anthropic_api_key {
            let estimator = LlmWeightEstimator::new(
                api_key.clone(),
                settings.estimator_model.clone(),
                settings.http_timeout,
            )?
            .with_url(settings.estimator_url.clone());
            resolver = resolver.with_estimator(Arc::new(estimator));
            info!("LLM weight estimator enabled ({})", settings.estimator_model);
        }

        Ok(Self {
            resolver,
            nutrient_lookup,
            concurrency: settings.resolve_concurrency.max(1),
        })
    }

    pub fn resolver(&self) -> &VolumeResolver {
        &self.resolver
    }

    pub fn has_nutrient_lookup(&self) -> bool {
        self.nutrient_lookup.is_some()
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Resolve one measurement through the full chain, collaborators included
    pub async fn resolve_measurement(
        &self,
        ingredient: &str,
        quantity: f64,
        unit: &str,
    ) -> ValidationResult<ConversionResult> {
        self.resolver.resolve(ingredient, quantity, unit).await
    }

    /// Resolve every measurement and aggregate with caller-supplied profiles
    ///
    /// `profiles[i]` belongs to `measurements[i]`; `None` means no data.
    pub async fn aggregate_recipe(
        &self,
        measurements: &[Measurement],
        profiles: Vec<Option<NutrientProfile>>,
        yield_weight_g: Option<f64>,
    ) -> ValidationResult<RecipeAggregate> {
        if measurements.len() != profiles.len() {
            return Err(ValidationError::ProfileCountMismatch {
                ingredients: measurements.len(),
                profiles: profiles.len(),
            });
        }
        for m in measurements {
            check_quantity(&m.ingredient, m.quantity)?;
        }

        // Futures are built up front so the stream holds no borrowing closure
        // and the whole call stays Send.
        let pending: Vec<_> = measurements
            .iter()
            .map(|m| self.resolver.resolve(&m.ingredient, m.quantity, &m.unit))
            .collect();
        let conversions: Vec<ConversionResult> = stream::iter(pending)
            .buffered(self.concurrency)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .collect::<ValidationResult<_>>()?;

        Ok(aggregate(conversions.into_iter().zip(profiles).collect(), yield_weight_g))
    }

    /// Resolve weights and fetch missing nutrient profiles, then aggregate
    ///
    /// A user-entered weight skips resolution. Caller-supplied nutrients skip
    /// the lookup. The lookup only runs for lines that resolved to some weight.
    pub async fn calculate_recipe(
        &self,
        ingredients: &[RecipeIngredient],
        yield_weight_g: Option<f64>,
    ) -> ValidationResult<RecipeAggregate> {
        for ingredient in ingredients {
            check_quantity(&ingredient.name, ingredient.quantity)?;
            if let Some(grams) = ingredient.grams {
                check_quantity(&ingredient.name, grams)?;
            }
        }

        let pending: Vec<_> = ingredients.iter().map(|i| self.calculate_line(i)).collect();
        let lines: Vec<(ConversionResult, Option<NutrientProfile>)> = stream::iter(pending)
            .buffered(self.concurrency)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .collect::<ValidationResult<_>>()?;

        debug!("Calculated {} recipe lines", lines.len());
        Ok(aggregate(lines, yield_weight_g))
    }

    async fn calculate_line(
        &self,
        ingredient: &RecipeIngredient,
    ) -> ValidationResult<(ConversionResult, Option<NutrientProfile>)> {
        let conversion = match ingredient.grams {
            Some(grams) => {
                let (name, unit) = normalize(&ingredient.name, &ingredient.unit);
                let name = match conversion_table::lookup(&name) {
                    Some((canonical, _)) => canonical.to_string(),
                    None => name,
                };
                ConversionResult::user_provided(&name, ingredient.quantity, unit, grams)
                    .with_original_unit(&ingredient.unit)
            }
            None => {
                self.resolver
                    .resolve(&ingredient.name, ingredient.quantity, &ingredient.unit)
                    .await?
            }
        };

        let profile = match &ingredient.nutrients {
            Some(profile) => Some(profile.clone()),
            None if conversion.grams() > 0.0 => {
                self.lookup_profile(conversion.ingredient(), &ingredient.name, ingredient.fdc_id)
                    .await
            }
            None => None,
        };

        Ok((conversion, profile))
    }

    async fn lookup_profile(
        &self,
        canonical_name: &str,
        raw_name: &str,
        fdc_id: Option<u64>,
    ) -> Option<NutrientProfile> {
        let lookup = self.nutrient_lookup.as_ref()?;
        match lookup.lookup(canonical_name, raw_name, fdc_id).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!("Nutrient lookup failed for '{}': {}", canonical_name, e);
                None
            }
        }
    }

    pub fn compute_per_serving(
        &self,
        profile: &NutrientProfile,
        serving_grams: f64,
        servings_per_container: f64,
    ) -> ValidationResult<PerServing> {
        label::compute_per_serving(profile, serving_grams, servings_per_container)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{Portion, PortionLookup};
    use crate::models::{ConversionSource, FlagKind, NormalizedUnit};
    use async_trait::async_trait;
    use futures_util::future::BoxFuture;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    fn flour_profile() -> NutrientProfile {
        NutrientProfile {
            calories: Some(364.0),
            total_fat_g: Some(1.0),
            protein_g: Some(10.0),
            ..Default::default()
        }
    }

    struct MockNutrients {
        calls: AtomicUsize,
        seen: Mutex<Vec<(String, Option<u64>)>>,
        fail: bool,
    }

    impl MockNutrients {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self { calls: AtomicUsize::new(0), seen: Mutex::new(Vec::new()), fail })
        }
    }

    #[async_trait]
    impl NutrientLookup for MockNutrients {
        async fn lookup(
            &self,
            canonical_name: &str,
            _raw_name: &str,
            fdc_id_hint: Option<u64>,
        ) -> Result<Option<NutrientProfile>, CollaboratorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push((canonical_name.to_string(), fdc_id_hint));
            if self.fail {
                return Err(CollaboratorError::Status { service: "mock", status: 500 });
            }
            if canonical_name == "all-purpose flour" {
                Ok(Some(flour_profile()))
            } else {
                Ok(None)
            }
        }
    }

    fn line(name: &str, quantity: f64, unit: &str) -> RecipeIngredient {
        Measurement::new(name, quantity, unit).into()
    }

    #[tokio::test]
    async fn test_aggregate_recipe_preserves_order() {
        let calc = NutritionCalculator::default().with_concurrency(2);
        let measurements = vec![
            Measurement::new("flour", 2.0, "cups"),
            Measurement::new("sugar", 100.0, "g"),
            Measurement::new("butter", 1.0, "stick"),
        ];
        let profiles = vec![Some(flour_profile()), None, None];

        let agg = calc.aggregate_recipe(&measurements, profiles, None).await.unwrap();
        let names: Vec<&str> = agg.ingredients.iter().map(|i| i.conversion.ingredient()).collect();
        assert_eq!(names, vec!["all-purpose flour", "granulated sugar", "butter unsalted"]);
        assert!((agg.ingredients[0].conversion.grams() - 250.0).abs() < 0.001);
        assert!((agg.ingredients[1].conversion.grams() - 100.0).abs() < 0.001);
        assert!((agg.ingredients[2].conversion.grams() - 113.0).abs() < 0.001);
        // 250g of flour at 364 kcal/100g
        assert!((agg.totals.calories.unwrap() - 910.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_aggregate_recipe_validates_first() {
        let calc = NutritionCalculator::default();
        let measurements = vec![Measurement::new("flour", 1.0, "cup")];

        assert_eq!(
            calc.aggregate_recipe(&measurements, vec![], None).await.unwrap_err(),
            ValidationError::ProfileCountMismatch { ingredients: 1, profiles: 0 }
        );

        let bad = vec![Measurement::new("flour", -1.0, "cup")];
        assert!(matches!(
            calc.aggregate_recipe(&bad, vec![None], None).await,
            Err(ValidationError::NegativeQuantity { .. })
        ));
    }

    #[tokio::test]
    async fn test_calculate_recipe_fetches_profiles() {
        let lookup = MockNutrients::new(false);
        let calc = NutritionCalculator::default().with_nutrient_lookup(lookup.clone());

        let mut flour = line("All-Purpose Flour", 1.0, "cup");
        flour.fdc_id = Some(789_890);
        let ingredients = vec![flour, line("mystery powder", 1.0, "scoop")];

        let agg = calc.calculate_recipe(&ingredients, Some(100.0)).await.unwrap();

        // the unresolved line weighs 0g so it is never looked up
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            lookup.seen.lock().unwrap()[0],
            ("all-purpose flour".to_string(), Some(789_890))
        );
        assert!(agg.ingredients[0].profile.is_some());
        assert!(agg.ingredients[1].profile.is_none());
        // 125g flour → 455 kcal in 100g yield
        assert!((agg.per_100g.calories.unwrap() - 455.0).abs() < 0.001);
        assert!(agg.flags.iter().any(|f| f.kind == FlagKind::LowConfidenceConversion));
        assert!(!agg.flags.iter().any(|f| f.kind == FlagKind::MissingNutrition));
    }

    #[tokio::test]
    async fn test_calculate_recipe_lookup_failure_is_missing_data() {
        let calc = NutritionCalculator::default().with_nutrient_lookup(MockNutrients::new(true));
        let agg = calc.calculate_recipe(&[line("flour", 1.0, "cup")], None).await.unwrap();

        assert!(agg.ingredients[0].profile.is_none());
        assert!(agg.flags.iter().any(|f| f.kind == FlagKind::MissingNutrition));
    }

    #[tokio::test]
    async fn test_calculate_recipe_overrides() {
        let lookup = MockNutrients::new(false);
        let calc = NutritionCalculator::default().with_nutrient_lookup(lookup.clone());

        let mut chocolate = line("dark chocolate", 1.0, "bar");
        chocolate.grams = Some(85.0);
        chocolate.nutrients = Some(NutrientProfile { calories: Some(600.0), ..Default::default() });

        let agg = calc.calculate_recipe(&[chocolate], None).await.unwrap();
        let conversion = &agg.ingredients[0].conversion;
        assert_eq!(conversion.source(), ConversionSource::UserProvided);
        assert!((conversion.grams() - 85.0).abs() < 0.001);
        assert!((agg.totals.calories.unwrap() - 510.0).abs() < 0.001);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_calculate_recipe_rejects_negative_weight() {
        let calc = NutritionCalculator::default();
        let mut l = line("flour", 1.0, "cup");
        l.grams = Some(-3.0);
        assert!(calc.calculate_recipe(&[l], None).await.is_err());
    }

    /// Slow portion lookup that records how many calls overlap
    struct SlowPortions {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PortionLookup for SlowPortions {
        async fn find_portion(
            &self,
            _canonical_name: &str,
            _unit: &NormalizedUnit,
        ) -> Result<Option<Portion>, CollaboratorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(Some(Portion { gram_weight: 10.0, amount: 1.0, description: "1 scoop = 10g".to_string() }))
        }
    }

    #[tokio::test]
    async fn test_calculate_recipe_bounded_concurrency() {
        let portions = Arc::new(SlowPortions {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        });
        let resolver = VolumeResolver::new().with_portion_lookup(portions.clone());
        let calc = NutritionCalculator::new(resolver).with_concurrency(3);

        let ingredients: Vec<RecipeIngredient> = (1..=8)
            .map(|n| line(&format!("mystery powder {}", n), n as f64, "scoop"))
            .collect();
        let agg = calc.calculate_recipe(&ingredients, None).await.unwrap();

        assert_eq!(portions.calls.load(Ordering::SeqCst), 8);
        let peak = portions.peak.load(Ordering::SeqCst);
        assert!(peak > 1, "lines ran one at a time");
        assert!(peak <= 3, "peak {} exceeds limit", peak);

        // still in input order
        for (n, item) in agg.ingredients.iter().enumerate() {
            assert_eq!(item.conversion.source(), ConversionSource::UsdaPortion);
            assert!((item.conversion.grams() - 10.0 * (n + 1) as f64).abs() < 0.001);
        }
    }

    #[tokio::test]
    async fn test_aggregate_recipe_bounded_concurrency() {
        let portions = Arc::new(SlowPortions {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        });
        let resolver = VolumeResolver::new().with_portion_lookup(portions.clone());
        let calc = NutritionCalculator::new(resolver).with_concurrency(2);

        let measurements: Vec<Measurement> = (0..5).map(|_| Measurement::new("mystery powder", 1.0, "scoop")).collect();
        let agg = calc.aggregate_recipe(&measurements, vec![None; 5], None).await.unwrap();

        assert_eq!(agg.ingredients.len(), 5);
        assert_eq!(portions.peak.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_recipe_futures_are_send() {
        let calc = NutritionCalculator::default();
        let ingredients = vec![line("flour", 1.0, "cup")];
        let measurements = vec![Measurement::new("flour", 1.0, "cup")];

        let _: BoxFuture<'_, ValidationResult<RecipeAggregate>> =
            Box::pin(calc.calculate_recipe(&ingredients, None));
        let _: BoxFuture<'_, ValidationResult<RecipeAggregate>> =
            Box::pin(calc.aggregate_recipe(&measurements, vec![None], None));
    }

    #[test]
    fn test_from_settings_without_keys() {
        let calc = NutritionCalculator::from_settings(&Settings::default()).unwrap();
        assert!(!calc.has_nutrient_lookup());
        assert!(!calc.resolver().has_portion_lookup());
        assert!(!calc.resolver().has_estimator());
        assert_eq!(calc.concurrency(), DEFAULT_RESOLVE_CONCURRENCY);
    }

    #[test]
    fn test_from_settings_with_keys() {
        let settings = Settings {
            usda_api_key: Some("DEMO_KEY".to_string()),
            anthropic_api_key: Some("sk-test".to_string()),
            resolve_concurrency: 3,
            ..Settings::default()
        };
        let calc = NutritionCalculator::from_settings(&settings).unwrap();
        assert!(calc.has_nutrient_lookup());
        assert!(calc.resolver().has_portion_lookup());
        assert!(calc.resolver().has_estimator());
        assert_eq!(calc.concurrency(), 3);
    }
}
