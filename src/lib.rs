//! Nutrifacts Library
//!
//! Recipe measurement conversion, nutrient aggregation and FDA label values.

pub mod build_info;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
