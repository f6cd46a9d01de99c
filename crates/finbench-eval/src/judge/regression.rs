//! Error-metric evaluation of cost-of-revenue predictions

use crate::experiments::RegressionRecord;
use crate::judge::ranking::{self, MetricDirection};
use crate::runner::{ExperimentResults, ModelRun};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Evaluation metrics for a single regression model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionEvaluationMetrics {
    pub model_provider: String,
    pub model_name: String,
    pub total_predictions: usize,
    pub mean_absolute_error: f64,
    pub mean_squared_error: f64,
    pub root_mean_squared_error: f64,
    pub mean_absolute_percentage_error: f64,
    pub r_squared: f64,
    /// Percentage of predictions within 5% of ground truth
    pub accuracy_within_5_percent: f64,
    /// Percentage of predictions within 10% of ground truth
    pub accuracy_within_10_percent: f64,
    /// Percentage of predictions within 20% of ground truth
    pub accuracy_within_20_percent: f64,
    pub average_cost: f64,
    pub average_duration: f64,
}

/// Complete regression evaluation results comparing all models
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionComparisonResults {
    /// Per-backend metrics; wholly absent backends are omitted
    pub models: BTreeMap<String, RegressionEvaluationMetrics>,
    pub best_mae_model: Option<String>,
    pub best_rmse_model: Option<String>,
    pub best_r2_model: Option<String>,
    pub best_accuracy_5pct_model: Option<String>,
}

/// Regression evaluator
pub struct RegressionJudge;

impl RegressionJudge {
    /// Evaluate all model results and rank the backends
    pub fn evaluate(
        &self,
        results: &ExperimentResults<RegressionRecord>,
    ) -> RegressionComparisonResults {
        // Evaluate in dispatch order so ranking ties go to the first backend
        let evaluated: Vec<(String, RegressionEvaluationMetrics)> = results
            .present()
            .map(|(provider, run)| (provider.to_string(), Self::evaluate_model(run)))
            .collect();

        let best_mae_model = ranking::best_model(
            evaluated.iter().map(|(p, m)| (p.as_str(), m.mean_absolute_error)),
            MetricDirection::LowerIsBetter,
        );
        let best_rmse_model = ranking::best_model(
            evaluated
                .iter()
                .map(|(p, m)| (p.as_str(), m.root_mean_squared_error)),
            MetricDirection::LowerIsBetter,
        );
        let best_r2_model = ranking::best_model(
            evaluated.iter().map(|(p, m)| (p.as_str(), m.r_squared)),
            MetricDirection::HigherIsBetter,
        );
        let best_accuracy_5pct_model = ranking::best_model(
            evaluated
                .iter()
                .map(|(p, m)| (p.as_str(), m.accuracy_within_5_percent)),
            MetricDirection::HigherIsBetter,
        );

        RegressionComparisonResults {
            models: evaluated.into_iter().collect(),
            best_mae_model,
            best_rmse_model,
            best_r2_model,
            best_accuracy_5pct_model,
        }
    }

    /// Error metrics for a single model
    fn evaluate_model(run: &ModelRun<RegressionRecord>) -> RegressionEvaluationMetrics {
        // Drop pairs with missing ground truth before computing anything
        let valid_pairs: Vec<(f64, f64)> = run
            .predictions
            .iter()
            .filter_map(|p| p.ground_truth.map(|truth| (p.prediction, truth)))
            .collect();

        if valid_pairs.is_empty() {
            return Self::empty_metrics(run);
        }

        let n = valid_pairs.len() as f64;

        let mae = valid_pairs
            .iter()
            .map(|(pred, truth)| (pred - truth).abs())
            .sum::<f64>()
            / n;
        let mse = valid_pairs
            .iter()
            .map(|(pred, truth)| (pred - truth).powi(2))
            .sum::<f64>()
            / n;
        let rmse = mse.sqrt();

        // MAPE only over pairs with non-zero ground truth
        let mape_values: Vec<f64> = valid_pairs
            .iter()
            .filter(|(_, truth)| *truth != 0.0)
            .map(|(pred, truth)| ((pred - truth) / truth).abs())
            .collect();
        let mape = if mape_values.is_empty() {
            f64::INFINITY
        } else {
            mape_values.iter().sum::<f64>() / mape_values.len() as f64 * 100.0
        };

        let truth_mean = valid_pairs.iter().map(|(_, truth)| truth).sum::<f64>() / n;
        let ss_tot = valid_pairs
            .iter()
            .map(|(_, truth)| (truth - truth_mean).powi(2))
            .sum::<f64>();
        let ss_res = valid_pairs
            .iter()
            .map(|(pred, truth)| (truth - pred).powi(2))
            .sum::<f64>();
        // Constant ground truth degenerates to 0 rather than dividing by zero
        let r_squared = if ss_tot != 0.0 {
            1.0 - ss_res / ss_tot
        } else {
            0.0
        };

        RegressionEvaluationMetrics {
            model_provider: run.model_provider.clone(),
            model_name: run.model_name.clone(),
            total_predictions: valid_pairs.len(),
            mean_absolute_error: mae,
            mean_squared_error: mse,
            root_mean_squared_error: rmse,
            mean_absolute_percentage_error: mape,
            r_squared,
            accuracy_within_5_percent: Self::percentage_accuracy(&valid_pairs, 0.05),
            accuracy_within_10_percent: Self::percentage_accuracy(&valid_pairs, 0.10),
            accuracy_within_20_percent: Self::percentage_accuracy(&valid_pairs, 0.20),
            average_cost: run.average_cost,
            average_duration: run.average_duration,
        }
    }

    /// Percentage of pairs within `threshold` relative error of ground truth.
    ///
    /// A zero-truth pair matches only when the prediction is exactly zero.
    fn percentage_accuracy(valid_pairs: &[(f64, f64)], threshold: f64) -> f64 {
        if valid_pairs.is_empty() {
            return 0.0;
        }

        let within = valid_pairs
            .iter()
            .filter(|(pred, truth)| {
                if *truth == 0.0 {
                    *pred == 0.0
                } else {
                    ((pred - truth) / truth).abs() <= threshold
                }
            })
            .count();

        within as f64 / valid_pairs.len() as f64 * 100.0
    }

    /// Sentinel metrics for a model with no valid prediction pairs
    fn empty_metrics(run: &ModelRun<RegressionRecord>) -> RegressionEvaluationMetrics {
        RegressionEvaluationMetrics {
            model_provider: run.model_provider.clone(),
            model_name: run.model_name.clone(),
            total_predictions: 0,
            mean_absolute_error: f64::INFINITY,
            mean_squared_error: f64::INFINITY,
            root_mean_squared_error: f64::INFINITY,
            mean_absolute_percentage_error: f64::INFINITY,
            r_squared: 0.0,
            accuracy_within_5_percent: 0.0,
            accuracy_within_10_percent: 0.0,
            accuracy_within_20_percent: 0.0,
            average_cost: run.average_cost,
            average_duration: run.average_duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiments::{Confidence, ExtractionMethod};

    fn record(prediction: f64, ground_truth: Option<f64>) -> RegressionRecord {
        RegressionRecord {
            ticker: "T".to_string(),
            model: "m".to_string(),
            prediction,
            ground_truth,
            reasoning: String::new(),
            method: ExtractionMethod::DirectExtraction,
            formula_used: "us-gaap:CostOfRevenue".to_string(),
            confidence: Confidence::High,
            cost: 0.001,
            duration: 2.0,
        }
    }

    fn results_with(records: Vec<RegressionRecord>) -> ExperimentResults<RegressionRecord> {
        ExperimentResults::new(vec![(
            "openai".to_string(),
            Some(ModelRun::from_records("openai", "o3", records)),
        )])
    }

    #[test]
    fn error_metrics_scenario() {
        // pairs (110, 100) and (90, 100)
        let results = results_with(vec![
            record(110.0, Some(100.0)),
            record(90.0, Some(100.0)),
        ]);
        let metrics = &RegressionJudge.evaluate(&results).models["openai"];

        assert!((metrics.mean_absolute_error - 10.0).abs() < 1e-12);
        assert!((metrics.mean_squared_error - 100.0).abs() < 1e-12);
        assert!((metrics.root_mean_squared_error - 10.0).abs() < 1e-12);
        assert!((metrics.mean_absolute_percentage_error - 10.0).abs() < 1e-12);
        assert!((metrics.accuracy_within_10_percent - 100.0).abs() < 1e-12);
        assert_eq!(metrics.accuracy_within_5_percent, 0.0);
        assert!((metrics.accuracy_within_20_percent - 100.0).abs() < 1e-12);
    }

    #[test]
    fn mse_is_rmse_squared() {
        let results = results_with(vec![
            record(120.0, Some(100.0)),
            record(95.0, Some(100.0)),
            record(101.0, Some(103.0)),
        ]);
        let metrics = &RegressionJudge.evaluate(&results).models["openai"];
        assert!(metrics.root_mean_squared_error >= 0.0);
        assert!(
            (metrics.mean_squared_error - metrics.root_mean_squared_error.powi(2)).abs() < 1e-9
        );
    }

    #[test]
    fn zero_ground_truth_is_excluded_from_mape() {
        // The only pair has zero ground truth: no valid MAPE denominator, and
        // the within-k check requires an exactly-zero prediction
        let results = results_with(vec![record(5.0, Some(0.0))]);
        let metrics = &RegressionJudge.evaluate(&results).models["openai"];

        assert!(metrics.mean_absolute_percentage_error.is_infinite());
        assert_eq!(metrics.accuracy_within_5_percent, 0.0);
        assert!((metrics.mean_absolute_error - 5.0).abs() < 1e-12);
        // Constant (zero-variance) ground truth degenerates R² to 0
        assert_eq!(metrics.r_squared, 0.0);
    }

    #[test]
    fn zero_truth_zero_prediction_counts_as_within_threshold() {
        let results = results_with(vec![record(0.0, Some(0.0))]);
        let metrics = &RegressionJudge.evaluate(&results).models["openai"];
        assert!((metrics.accuracy_within_5_percent - 100.0).abs() < 1e-12);
    }

    #[test]
    fn missing_ground_truth_pairs_are_filtered() {
        let results = results_with(vec![
            record(110.0, Some(100.0)),
            record(42.0, None),
            record(90.0, Some(100.0)),
        ]);
        let metrics = &RegressionJudge.evaluate(&results).models["openai"];
        assert_eq!(metrics.total_predictions, 2);
        assert!((metrics.mean_absolute_error - 10.0).abs() < 1e-12);
    }

    #[test]
    fn empty_predictions_give_sentinel_metrics() {
        let results = results_with(vec![]);
        let metrics = &RegressionJudge.evaluate(&results).models["openai"];
        assert!(metrics.mean_absolute_error.is_infinite());
        assert!(metrics.mean_squared_error.is_infinite());
        assert!(metrics.root_mean_squared_error.is_infinite());
        assert!(metrics.mean_absolute_percentage_error.is_infinite());
        assert_eq!(metrics.r_squared, 0.0);
        assert_eq!(metrics.accuracy_within_20_percent, 0.0);
    }

    #[test]
    fn r_squared_for_perfect_predictions() {
        let results = results_with(vec![
            record(100.0, Some(100.0)),
            record(200.0, Some(200.0)),
        ]);
        let metrics = &RegressionJudge.evaluate(&results).models["openai"];
        assert!((metrics.r_squared - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ranking_skips_infinite_error_backends() {
        // Backends: finite MAE 50, empty (infinite MAE), finite MAE 30
        let results: ExperimentResults<RegressionRecord> = ExperimentResults::new(vec![
            (
                "openai".to_string(),
                Some(ModelRun::from_records(
                    "openai",
                    "o3",
                    vec![record(150.0, Some(100.0))],
                )),
            ),
            (
                "anthropic".to_string(),
                Some(ModelRun::from_records("anthropic", "claude", vec![])),
            ),
            (
                "gemini".to_string(),
                Some(ModelRun::from_records(
                    "gemini",
                    "gemini-2.5-pro",
                    vec![record(130.0, Some(100.0))],
                )),
            ),
        ]);

        let comparison = RegressionJudge.evaluate(&results);
        assert_eq!(comparison.best_mae_model.as_deref(), Some("gemini"));
        assert_eq!(comparison.best_rmse_model.as_deref(), Some("gemini"));
    }
}
