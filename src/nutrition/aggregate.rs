//! Recipe nutrient aggregation
//!
//! Pure: every weight and nutrient profile is already resolved by the caller.

use tracing::debug;

use crate::models::{
    AggregatedIngredient, Confidence, ConversionResult, Flag, FlagKind, NutrientKey,
    NutrientProfile, RecipeAggregate,
};

use super::rounding::round_to_increment;

/// Sum per-ingredient contributions and normalize to the yield weight
///
/// `yield_weight_g` is the cooked/final weight. Without it the raw weight is
/// used and an info flag is raised. A yield of 0 g or less zeroes the per-100g
/// profile and raises an error flag.
pub fn aggregate(
    results: Vec<(ConversionResult, Option<NutrientProfile>)>,
    yield_weight_g: Option<f64>,
) -> RecipeAggregate {
    let total_raw_weight_g: f64 = results.iter().map(|(r, _)| r.grams()).sum();

    let mut flags = Vec::new();
    let mut ingredients = Vec::with_capacity(results.len());
    let mut totals = NutrientProfile::zeroed();

    for (index, (conversion, profile)) in results.into_iter().enumerate() {
        let grams = conversion.grams();

        if conversion.confidence() == Confidence::Low {
            flags.push(Flag::for_ingredient(
                FlagKind::LowConfidenceConversion,
                index,
                conversion.ingredient(),
                format!(
                    "Low confidence conversion for {} {} {}. Please verify weight.",
                    conversion.quantity(),
                    conversion.unit(),
                    conversion.ingredient()
                ),
            ));
        }

        if grams > 0.0 && profile.is_none() {
            flags.push(Flag::for_ingredient(
                FlagKind::MissingNutrition,
                index,
                conversion.ingredient(),
                format!(
                    "Could not find nutrition data for {}. Using zeros.",
                    conversion.ingredient()
                ),
            ));
        }

        let contribution = match &profile {
            Some(p) if grams > 0.0 => p.scale(grams / 100.0),
            _ => NutrientProfile::zeroed(),
        };

        for key in NutrientKey::ALL {
            if let Some(amount) = contribution.get(key) {
                let running = totals.get(key).unwrap_or(0.0);
                totals.set(key, Some(running + amount));
            }
        }

        let weight_percent = if total_raw_weight_g > 0.0 {
            round_to_increment(grams / total_raw_weight_g * 100.0, 0.1)
        } else {
            0.0
        };

        ingredients.push(AggregatedIngredient {
            conversion,
            profile,
            contribution,
            weight_percent,
        });
    }

    let yield_weight_supplied = yield_weight_g.is_some();
    let yield_weight = match yield_weight_g {
        Some(w) => w,
        None => {
            flags.push(Flag::for_recipe(
                FlagKind::NoYieldWeight,
                "Using raw ingredient weight as final weight. Consider providing cooked/final weight for accuracy."
                    .to_string(),
            ));
            total_raw_weight_g
        }
    };

    let per_100g = if yield_weight.is_finite() && yield_weight > 0.0 {
        let mut per_100g = NutrientProfile::default();
        for (key, total) in totals.iter() {
            per_100g.set(key, total.map(|t| t / yield_weight * 100.0));
        }
        per_100g
    } else {
        let message = if yield_weight_supplied {
            format!("Final weight must be greater than 0 (got {}g).", yield_weight)
        } else {
            "Could not calculate total weight. All conversions failed.".to_string()
        };
        flags.push(Flag::for_recipe(FlagKind::NoWeight, message));
        NutrientProfile::zeroed()
    };

    debug!(
        "Aggregated {} ingredients: raw {:.1}g, yield {:.1}g, {} flags",
        ingredients.len(),
        total_raw_weight_g,
        yield_weight,
        flags.len()
    );

    RecipeAggregate {
        ingredients,
        total_raw_weight_g,
        yield_weight_g: yield_weight,
        yield_weight_supplied,
        totals,
        per_100g,
        flags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NormalizedUnit, Severity, Unit};

    fn grams(name: &str, g: f64) -> ConversionResult {
        ConversionResult::direct(name, g, NormalizedUnit::Known(Unit::G), g)
    }

    fn flour_profile() -> NutrientProfile {
        NutrientProfile {
            calories: Some(364.0),
            total_fat_g: Some(1.0),
            protein_g: Some(10.3),
            total_carbohydrate_g: Some(76.3),
            sodium_mg: Some(2.0),
            ..Default::default()
        }
    }

    fn sugar_profile() -> NutrientProfile {
        NutrientProfile {
            calories: Some(387.0),
            total_carbohydrate_g: Some(100.0),
            total_sugars_g: Some(100.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_totals_and_per_100g() {
        let agg = aggregate(
            vec![
                (grams("flour", 250.0), Some(flour_profile())),
                (grams("sugar", 200.0), Some(sugar_profile())),
            ],
            Some(400.0),
        );

        assert!((agg.total_raw_weight_g - 450.0).abs() < 0.001);
        assert!((agg.yield_weight_g - 400.0).abs() < 0.001);

        let calories = agg.totals.calories.unwrap();
        assert!((calories - (910.0 + 774.0)).abs() < 0.001);
        assert!((agg.per_100g.calories.unwrap() - calories / 400.0 * 100.0).abs() < 0.001);
        assert!(agg.flags.is_empty());
    }

    #[test]
    fn test_contributions_sum_to_totals() {
        let agg = aggregate(
            vec![
                (grams("flour", 125.0), Some(flour_profile())),
                (grams("sugar", 50.0), Some(sugar_profile())),
                (grams("water", 100.0), Some(NutrientProfile::zeroed())),
            ],
            None,
        );

        for key in NutrientKey::ALL {
            let sum: f64 = agg
                .ingredients
                .iter()
                .map(|i| i.contribution.get(key).unwrap_or(0.0))
                .sum();
            let total = agg.totals.get(key).unwrap();
            assert!((sum - total).abs() < 1e-9, "{:?}", key);
            let per_100g = agg.per_100g.get(key).unwrap();
            assert!((per_100g - total / agg.yield_weight_g * 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_no_yield_weight_flag() {
        let agg = aggregate(vec![(grams("flour", 100.0), Some(flour_profile()))], None);
        assert!((agg.yield_weight_g - 100.0).abs() < 0.001);
        assert!(!agg.yield_weight_supplied);
        assert_eq!(agg.flags.len(), 1);
        assert_eq!(agg.flags[0].kind, FlagKind::NoYieldWeight);
        assert_eq!(agg.flags[0].severity, Severity::Info);
    }

    #[test]
    fn test_missing_nutrition_still_counts_weight() {
        let agg = aggregate(
            vec![
                (grams("flour", 100.0), Some(flour_profile())),
                (grams("mystery spice", 100.0), None),
            ],
            Some(200.0),
        );
        assert!((agg.total_raw_weight_g - 200.0).abs() < 0.001);
        assert!((agg.per_100g.calories.unwrap() - 182.0).abs() < 0.001);

        let missing: Vec<_> = agg
            .flags
            .iter()
            .filter(|f| f.kind == FlagKind::MissingNutrition)
            .collect();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].index, Some(1));
        assert_eq!(missing[0].ingredient.as_deref(), Some("mystery spice"));
    }

    #[test]
    fn test_zero_weight_is_error_flag() {
        let unresolved = ConversionResult::unresolved("mystery", 1.0, NormalizedUnit::Other("scoop".into()));
        let agg = aggregate(vec![(unresolved, None)], None);

        assert_eq!(agg.total_raw_weight_g, 0.0);
        assert!(agg.has_errors());
        assert!(agg.per_100g.iter().all(|(_, v)| v == Some(0.0)));
        assert!(agg.flags.iter().any(|f| f.kind == FlagKind::LowConfidenceConversion));
        // 0 g lines don't need nutrition
        assert!(!agg.flags.iter().any(|f| f.kind == FlagKind::MissingNutrition));
        assert_eq!(agg.ingredients[0].weight_percent, 0.0);
    }

    #[test]
    fn test_supplied_zero_yield_not_replaced() {
        let agg = aggregate(vec![(grams("flour", 100.0), Some(flour_profile()))], Some(0.0));
        assert_eq!(agg.yield_weight_g, 0.0);
        assert!(agg.has_errors());
        assert_eq!(agg.per_100g.calories, Some(0.0));
        assert!(!agg.flags.iter().any(|f| f.kind == FlagKind::NoYieldWeight));
    }

    #[test]
    fn test_weight_percent_and_order() {
        let agg = aggregate(
            vec![
                (grams("flour", 200.0), Some(flour_profile())),
                (grams("sugar", 100.0), Some(sugar_profile())),
            ],
            None,
        );
        assert_eq!(agg.ingredients[0].conversion.ingredient(), "flour");
        assert!((agg.ingredients[0].weight_percent - 66.7).abs() < 1e-9);
        assert!((agg.ingredients[1].weight_percent - 33.3).abs() < 1e-9);
    }

    #[test]
    fn test_empty_recipe() {
        let agg = aggregate(Vec::new(), None);
        assert!(agg.ingredients.is_empty());
        assert!(agg.has_errors());
    }
}
