//! Nutrifacts Status Tool
//!
//! Runtime status of the service and usage instructions for AI assistants.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::nutrition::{supported_ingredients, NutritionCalculator};

/// Recipe calculation instructions for AI assistants
pub const RECIPE_INSTRUCTIONS: &str = r#"
# Nutrifacts Recipe Instructions

## Converting a measurement

Call `resolve_measurement` with the ingredient name, quantity and unit exactly
as written in the recipe ("2 cups all-purpose flour, sifted" →
ingredient "all-purpose flour, sifted", quantity 2, unit "cups").

Each result carries:
- **grams**: the resolved weight (0 when nothing could convert it)
- **source**: direct, table, usda_portion, llm_estimate or user_provided
- **confidence**: high, medium or low
- **note**: where the number came from

Always show low-confidence results to the user and ask them to confirm the weight.

## Calculating a recipe

Call `calculate_recipe` with every ingredient line. Optional per line:
- `grams`: a weight the user already knows (skips conversion)
- `fdc_id`: a USDA FoodData Central ID for the nutrient lookup
- `nutrients`: per-100g values from a package label (skips the lookup)

Pass `yield_weight_g` whenever the finished weight is known. Cooking loses
water, so raw weight understates nutrients per 100g.

Check `flags` in the response:
- **low_confidence_conversion** (warning): verify that ingredient's weight
- **missing_nutrition** (warning): that ingredient counted as zero
- **no_yield_weight** (info): raw weight was used as final weight
- **no_weight** (error): per-100g values are meaningless

## Label values

Pass `serving_size_g` to `calculate_recipe`, or call `compute_per_serving`
with a per-100g profile. Displayed amounts follow FDA rounding; %DV is always
computed from the unrounded amount.

## Checking data

Run `check_nutrient_profile` on any per-100g profile typed in by hand before
using it. Values like 120g fat per 100g mean a unit or serving mix-up.
"#;

/// Status information for the service
#[derive(Debug, Clone, Serialize)]
pub struct NutrifactsStatus {
    // Build info
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    // Collaborators
    pub usda_configured: bool,
    pub estimator_configured: bool,
    pub resolve_concurrency: usize,
    pub supported_ingredient_count: usize,

    // Process info
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Tracks service uptime and reports status
pub struct StatusTracker {
    start_time: Instant,
    started_at: DateTime<Utc>,
    usda_configured: bool,
    estimator_configured: bool,
    resolve_concurrency: usize,
}

impl StatusTracker {
    pub fn new(calculator: &NutritionCalculator) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: Utc::now(),
            usda_configured: calculator.has_nutrient_lookup(),
            estimator_configured: calculator.resolver().has_estimator(),
            resolve_concurrency: calculator.concurrency(),
        }
    }

    pub fn get_status(&self) -> NutrifactsStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        NutrifactsStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            usda_configured: self.usda_configured,
            estimator_configured: self.estimator_configured,
            resolve_concurrency: self.resolve_concurrency,
            supported_ingredient_count: supported_ingredients().len(),
            started_at: self.started_at,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
