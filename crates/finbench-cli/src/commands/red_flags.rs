//! Red-flag detection experiment driver

use anyhow::Result;
use colored::Colorize;
use finbench_core::config::Settings;
use finbench_core::dataset;
use finbench_core::fd::FinancialDatasetsClient;
use finbench_eval::adapters;
use finbench_eval::experiments::RedFlagExperiment;
use finbench_eval::judge::{ClassificationJudge, ComparisonResults};
use finbench_eval::report::write_report;
use finbench_eval::runner::Dispatcher;
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_DATASET_PATH: &str = "data/red_flag_dataset.json";

pub async fn run(dataset_path: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let settings = Settings::from_env();
    let http_client = settings.http_client();

    let dataset_path = dataset_path.unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH));
    let fd_client = FinancialDatasetsClient::new(http_client.clone());
    let dataset = dataset::load_or_build(&dataset_path, &fd_client).await?;
    println!(
        "Loaded {} companies ({} red flag, {} green flag)",
        dataset.len(),
        dataset.red_flag_companies().len(),
        dataset.green_flag_companies().len()
    );

    let dispatcher = Dispatcher::new(adapters::default_adapters(&http_client), settings.pacing);
    let items = Arc::new(dataset.companies().to_vec());
    let results = dispatcher.run(Arc::new(RedFlagExperiment), items).await;

    let comparison = ClassificationJudge.evaluate(&results);
    print_summary(&comparison);

    let output_dir = output.unwrap_or_else(|| settings.results_dir.clone());
    let report_path = write_report(&output_dir, "red_flag_detection", &comparison).await?;
    println!("\nResults saved to {}", report_path.display());

    Ok(())
}

fn print_summary(results: &ComparisonResults) {
    println!("\n{}", "=".repeat(60));
    println!("RED FLAG DETECTION EVALUATION RESULTS");
    println!("{}", "=".repeat(60));

    for (provider, metrics) in &results.models {
        println!("\n{} ({}):", provider.bold(), metrics.model_name);
        println!(
            "  Accuracy:   {:.3} ({}/{})",
            metrics.accuracy, metrics.correct_predictions, metrics.total_predictions
        );
        println!("  Precision:  {:.3}", metrics.precision);
        println!("  Recall:     {:.3}", metrics.recall);
        println!("  F1 Score:   {:.3}", metrics.f1_score);
        println!(
            "  TP: {}, FP: {}, TN: {}, FN: {}",
            metrics.true_positives,
            metrics.false_positives,
            metrics.true_negatives,
            metrics.false_negatives
        );
        println!("  Avg Cost:     ${:.4}", metrics.average_cost);
        println!("  Avg Duration: {:.2}s", metrics.average_duration);
    }

    let best_accuracy = results.best_accuracy_model.as_deref().unwrap_or("n/a");
    let best_f1 = results.best_f1_model.as_deref().unwrap_or("n/a");
    println!("\nBest Accuracy: {}", best_accuracy.green().bold());
    println!("Best F1 Score: {}", best_f1.green().bold());
    println!("{}", "=".repeat(60));
}
