//! Build and startup information
//!
//! Compile-time build metadata plus the stderr banner that reports which
//! collaborators this process will use.

use serde::Serialize;

use crate::config::Settings;

/// Build number, incremented on each recompilation
pub const BUILD_NUMBER: u64 = match option_env!("NUTRIFACTS_BUILD_NUMBER") {
    Some(s) => match parse_u64(s) {
        Some(n) => n,
        None => 0,
    },
    None => 0,
};

/// Build timestamp in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("NUTRIFACTS_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

const fn parse_u64(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut result: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b < b'0' || b > b'9' {
            return None;
        }
        result = result * 10 + (b - b'0') as u64;
        i += 1;
    }
    Some(result)
}

/// Build information structure for serialization
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
        }
    }
}

fn enabled(flag: bool) -> &'static str {
    if flag {
        "enabled"
    } else {
        "disabled"
    }
}

/// Banner lines for a process running with `settings`
pub fn startup_banner(settings: &Settings) -> Vec<String> {
    let info = BuildInfo::current();
    let rule = "=".repeat(47);
    vec![
        rule.clone(),
        "  Nutrifacts - Nutrition Facts Engine".to_string(),
        format!("  Version: {} | Build: {}", info.version, info.build_number),
        format!("  Compiled: {}", info.build_timestamp),
        format!("  USDA lookups: {}", enabled(settings.usda_api_key.is_some())),
        match &settings.anthropic_api_key {
            Some(_) => format!("  Weight estimator: enabled ({})", settings.estimator_model),
            None => "  Weight estimator: disabled".to_string(),
        },
        format!("  Resolve concurrency: {}", settings.resolve_concurrency),
        rule,
    ]
}

/// Print the startup banner to stderr (stdout carries MCP traffic)
pub fn print_startup_banner(settings: &Settings) {
    for line in startup_banner(settings) {
        eprintln!("{}", line);
    }
}
