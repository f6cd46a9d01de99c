//! JSON report generation

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// JSON report generator
pub struct JsonReporter;

impl JsonReporter {
    /// Generate a pretty-printed JSON report
    pub fn generate<T: Serialize>(results: &T) -> Result<String> {
        let json = serde_json::to_string_pretty(results)?;
        Ok(json)
    }

    /// Generate a compact JSON report
    pub fn generate_compact<T: Serialize>(results: &T) -> Result<String> {
        let json = serde_json::to_string(results)?;
        Ok(json)
    }
}

/// Write a timestamped JSON report into the output directory and return its
/// path
pub async fn write_report<T: Serialize>(
    output_dir: &Path,
    prefix: &str,
    results: &T,
) -> Result<PathBuf> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("{}_results_{}.json", prefix, timestamp);
    let output_path = output_dir.join(filename);

    let json = JsonReporter::generate(results)?;
    tokio::fs::write(&output_path, json)
        .await
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    tracing::info!(path = %output_path.display(), "report written");
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::{ClassificationJudge, ComparisonResults};
    use crate::runner::{ExperimentResults, ModelRun};

    fn sample_comparison() -> ComparisonResults {
        let results = ExperimentResults::new(vec![(
            "openai".to_string(),
            Some(ModelRun::from_records("openai", "o3", vec![])),
        )]);
        ClassificationJudge.evaluate(&results)
    }

    #[test]
    fn report_contains_metric_fields() {
        let json = JsonReporter::generate(&sample_comparison()).unwrap();
        assert!(json.contains("\"models\""));
        assert!(json.contains("\"best_accuracy_model\""));
        assert!(json.contains("\"f1_score\""));
    }

    #[tokio::test]
    async fn report_file_is_timestamped_and_parseable() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_report(dir.path(), "red_flag_detection", &sample_comparison())
            .await
            .unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("red_flag_detection_results_"));
        assert!(name.ends_with(".json"));

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(value["models"]["openai"]["model_name"].is_string());
    }
}
