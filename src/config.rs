//! Runtime configuration
//!
//! Everything comes from environment variables; unset or empty means default.

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_USDA_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
pub const DEFAULT_ESTIMATOR_MODEL: &str = "claude-3-5-haiku-latest";
pub const DEFAULT_ESTIMATOR_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_RESOLVE_CONCURRENCY: usize = 8;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Service settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// USDA FoodData Central API key; lookups are disabled without it
    pub usda_api_key: Option<String>,
    pub usda_base_url: String,
    /// Anthropic API key; the LLM weight estimator is disabled without it
    pub anthropic_api_key: Option<String>,
    pub estimator_model: String,
    /// Messages endpoint, overridable for proxies
    pub estimator_url: String,
    /// Max in-flight ingredient resolutions per recipe
    pub resolve_concurrency: usize,
    pub http_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            usda_api_key: None,
            usda_base_url: DEFAULT_USDA_BASE_URL.to_string(),
            anthropic_api_key: None,
            estimator_model: DEFAULT_ESTIMATOR_MODEL.to_string(),
            estimator_url: DEFAULT_ESTIMATOR_URL.to_string(),
            resolve_concurrency: DEFAULT_RESOLVE_CONCURRENCY,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();

        let resolve_concurrency = match get("NUTRIFACTS_RESOLVE_CONCURRENCY") {
            Some(raw) => parse_number::<usize>("NUTRIFACTS_RESOLVE_CONCURRENCY", &raw)?.max(1),
            None => defaults.resolve_concurrency,
        };

        let http_timeout = match get("NUTRIFACTS_HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_number::<u64>("NUTRIFACTS_HTTP_TIMEOUT_SECS", &raw)?),
            None => defaults.http_timeout,
        };

        Ok(Self {
            usda_api_key: get("NUTRIFACTS_USDA_API_KEY"),
            usda_base_url: get("NUTRIFACTS_USDA_BASE_URL").unwrap_or(defaults.usda_base_url),
            anthropic_api_key: get("NUTRIFACTS_ANTHROPIC_API_KEY"),
            estimator_model: get("NUTRIFACTS_ESTIMATOR_MODEL").unwrap_or(defaults.estimator_model),
            estimator_url: get("NUTRIFACTS_ESTIMATOR_URL").unwrap_or(defaults.estimator_url),
            resolve_concurrency,
            http_timeout,
        })
    }
}

fn parse_number<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| ConfigError::InvalidValue {
        var,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
