//! Nutrifacts tools module
//!
//! Caller-facing operations behind the MCP tools. Each returns a
//! serializable response or a caller-facing error string.

pub mod labels;
pub mod recipes;
pub mod status;
