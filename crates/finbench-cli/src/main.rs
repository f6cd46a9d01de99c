//! Finbench CLI application
//!
//! Runs one of the two evaluation experiments across all configured
//! backends and writes a comparison report. Individual backend failures
//! never fail the run; they surface as absent entries in the report.

mod args;
mod commands;

use clap::Parser;

use args::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    // Initialize logging with environment-based filtering
    // Set RUST_LOG=debug for verbose logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or_default() {
        Commands::RedFlags { dataset, output } => commands::red_flags::run(dataset, output).await,
        Commands::CostOfRevenue { dataset, output } => {
            commands::cost_of_revenue::run(dataset, output).await
        }
    }
}
