//! Nutrifacts
//!
//! An MCP server for recipe nutrition calculation.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use nutrifacts::build_info;
use nutrifacts::config::Settings;
use nutrifacts::mcp::NutrifactsService;
use nutrifacts::nutrition::NutritionCalculator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutrifacts=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::from_env()?;

    // Print startup banner to stderr
    build_info::print_startup_banner(&settings);
    eprintln!("Starting MCP server on stdio...");

    let calculator = NutritionCalculator::from_settings(&settings)?;

    // Create the nutrifacts service
    let service = NutrifactsService::new(calculator);

    // Start the MCP server on stdio
    let server = service.serve((stdin(), stdout())).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
