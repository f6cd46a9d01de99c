//! Cost-of-revenue extraction experiment driver

use anyhow::Result;
use colored::Colorize;
use finbench_core::config::Settings;
use finbench_core::dataset::FinancialsDataset;
use finbench_eval::adapters;
use finbench_eval::experiments::CostOfRevenueExperiment;
use finbench_eval::judge::{RegressionComparisonResults, RegressionJudge};
use finbench_eval::report::write_report;
use finbench_eval::runner::Dispatcher;
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_DATASET_PATH: &str = "data/financials_dataset.json";

pub async fn run(dataset_path: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let settings = Settings::from_env();
    let http_client = settings.http_client();

    let dataset_path = dataset_path.unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH));
    let dataset = FinancialsDataset::load_from_json(&dataset_path)?;
    println!(
        "Loaded {} companies with {} XBRL facts",
        dataset.len(),
        dataset.total_facts()
    );

    let dispatcher = Dispatcher::new(adapters::default_adapters(&http_client), settings.pacing);
    let items = Arc::new(dataset.companies().to_vec());
    let results = dispatcher.run(Arc::new(CostOfRevenueExperiment), items).await;

    let comparison = RegressionJudge.evaluate(&results);
    print_summary(&comparison);

    let output_dir = output.unwrap_or_else(|| settings.results_dir.clone());
    let report_path = write_report(&output_dir, "financials_calculation", &comparison).await?;
    println!("\nResults saved to {}", report_path.display());

    Ok(())
}

fn print_summary(results: &RegressionComparisonResults) {
    println!("\n{}", "=".repeat(70));
    println!("FINANCIALS CALCULATION EVALUATION RESULTS");
    println!("{}", "=".repeat(70));

    for (provider, metrics) in &results.models {
        println!("\n{} ({}):", provider.bold(), metrics.model_name);
        println!("  Total Predictions: {}", metrics.total_predictions);
        println!("  MAE:              ${:.0}", metrics.mean_absolute_error);
        println!("  RMSE:             ${:.0}", metrics.root_mean_squared_error);
        if metrics.mean_absolute_percentage_error.is_finite() {
            println!("  MAPE:             {:.2}%", metrics.mean_absolute_percentage_error);
        } else {
            println!("  MAPE:             N/A (division by zero)");
        }
        println!("  R²:               {:.3}", metrics.r_squared);
        println!("  Accuracy (±5%):   {:.1}%", metrics.accuracy_within_5_percent);
        println!("  Accuracy (±10%):  {:.1}%", metrics.accuracy_within_10_percent);
        println!("  Accuracy (±20%):  {:.1}%", metrics.accuracy_within_20_percent);
        println!("  Avg Cost:         ${:.4}", metrics.average_cost);
        println!("  Avg Duration:     {:.2}s", metrics.average_duration);
    }

    println!("\nBest Models:");
    println!(
        "  Lowest MAE:        {}",
        results.best_mae_model.as_deref().unwrap_or("n/a").green().bold()
    );
    println!(
        "  Lowest RMSE:       {}",
        results.best_rmse_model.as_deref().unwrap_or("n/a").green().bold()
    );
    println!(
        "  Highest R²:        {}",
        results.best_r2_model.as_deref().unwrap_or("n/a").green().bold()
    );
    println!(
        "  Best ±5% Accuracy: {}",
        results
            .best_accuracy_5pct_model
            .as_deref()
            .unwrap_or("n/a")
            .green()
            .bold()
    );
    println!("{}", "=".repeat(70));
}
