//! Confusion-matrix evaluation of red-flag predictions

use crate::experiments::ClassificationRecord;
use crate::judge::ranking::{self, MetricDirection};
use crate::runner::{ExperimentResults, ModelRun};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Evaluation metrics for a single model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEvaluationMetrics {
    pub model_provider: String,
    pub model_name: String,
    pub total_predictions: usize,
    pub correct_predictions: usize,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
    pub average_cost: f64,
    pub average_duration: f64,
}

/// Complete evaluation results comparing all models
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResults {
    /// Per-backend metrics; wholly absent backends are omitted
    pub models: BTreeMap<String, ModelEvaluationMetrics>,
    pub best_accuracy_model: Option<String>,
    pub best_f1_model: Option<String>,
}

/// Classification evaluator
pub struct ClassificationJudge;

impl ClassificationJudge {
    /// Evaluate all model results and rank the backends
    pub fn evaluate(&self, results: &ExperimentResults<ClassificationRecord>) -> ComparisonResults {
        // Evaluate in dispatch order so ranking ties go to the first backend
        let evaluated: Vec<(String, ModelEvaluationMetrics)> = results
            .present()
            .map(|(provider, run)| (provider.to_string(), Self::evaluate_model(run)))
            .collect();

        let best_accuracy_model = ranking::best_model(
            evaluated.iter().map(|(p, m)| (p.as_str(), m.accuracy)),
            MetricDirection::HigherIsBetter,
        );
        let best_f1_model = ranking::best_model(
            evaluated.iter().map(|(p, m)| (p.as_str(), m.f1_score)),
            MetricDirection::HigherIsBetter,
        );

        ComparisonResults {
            models: evaluated.into_iter().collect(),
            best_accuracy_model,
            best_f1_model,
        }
    }

    /// Confusion-matrix metrics for a single model
    fn evaluate_model(run: &ModelRun<ClassificationRecord>) -> ModelEvaluationMetrics {
        let predictions = &run.predictions;

        let tp = predictions.iter().filter(|p| p.prediction && p.ground_truth).count();
        let fp = predictions.iter().filter(|p| p.prediction && !p.ground_truth).count();
        let tn = predictions.iter().filter(|p| !p.prediction && !p.ground_truth).count();
        let fn_ = predictions.iter().filter(|p| !p.prediction && p.ground_truth).count();

        let total = predictions.len();
        let correct = tp + tn;

        let accuracy = if total > 0 {
            correct as f64 / total as f64
        } else {
            0.0
        };
        let precision = if tp + fp > 0 {
            tp as f64 / (tp + fp) as f64
        } else {
            0.0
        };
        let recall = if tp + fn_ > 0 {
            tp as f64 / (tp + fn_) as f64
        } else {
            0.0
        };
        let f1_score = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        ModelEvaluationMetrics {
            model_provider: run.model_provider.clone(),
            model_name: run.model_name.clone(),
            total_predictions: total,
            correct_predictions: correct,
            accuracy,
            precision,
            recall,
            f1_score,
            true_positives: tp,
            false_positives: fp,
            true_negatives: tn,
            false_negatives: fn_,
            average_cost: run.average_cost,
            average_duration: run.average_duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(prediction: bool, ground_truth: bool) -> ClassificationRecord {
        ClassificationRecord {
            ticker: "T".to_string(),
            model: "m".to_string(),
            prediction,
            ground_truth,
            ground_truth_label: (if ground_truth { "Bankruptcy Risk" } else { "Green Flag" }).to_string(),
            reasoning: String::new(),
            cost: 0.01,
            duration: 1.0,
        }
    }

    fn results_with(records: Vec<ClassificationRecord>) -> ExperimentResults<ClassificationRecord> {
        ExperimentResults::new(vec![(
            "openai".to_string(),
            Some(ModelRun::from_records("openai", "o3", records)),
        )])
    }

    #[test]
    fn confusion_matrix_scenario() {
        // predictions [T,T,F,F] against ground truth [T,F,F,F]
        let results = results_with(vec![
            record(true, true),
            record(true, false),
            record(false, false),
            record(false, false),
        ]);

        let comparison = ClassificationJudge.evaluate(&results);
        let metrics = &comparison.models["openai"];

        assert_eq!(metrics.true_positives, 1);
        assert_eq!(metrics.false_positives, 1);
        assert_eq!(metrics.true_negatives, 2);
        assert_eq!(metrics.false_negatives, 0);
        assert_eq!(metrics.total_predictions, 4);
        assert_eq!(metrics.correct_predictions, 3);
        assert!((metrics.accuracy - 0.75).abs() < 1e-12);
        assert!((metrics.precision - 0.5).abs() < 1e-12);
        assert!((metrics.recall - 1.0).abs() < 1e-12);
        assert!((metrics.f1_score - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn counts_partition_the_predictions() {
        let results = results_with(vec![
            record(true, true),
            record(false, true),
            record(true, false),
            record(false, false),
            record(true, true),
        ]);
        let metrics = &ClassificationJudge.evaluate(&results).models["openai"];
        assert_eq!(
            metrics.true_positives
                + metrics.false_positives
                + metrics.true_negatives
                + metrics.false_negatives,
            metrics.total_predictions
        );
        for value in [metrics.accuracy, metrics.precision, metrics.recall, metrics.f1_score] {
            assert!((0.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn empty_predictions_give_zero_metrics() {
        let results = results_with(vec![]);
        let metrics = &ClassificationJudge.evaluate(&results).models["openai"];
        assert_eq!(metrics.total_predictions, 0);
        assert_eq!(metrics.accuracy, 0.0);
        assert_eq!(metrics.precision, 0.0);
        assert_eq!(metrics.recall, 0.0);
        assert_eq!(metrics.f1_score, 0.0);
    }

    #[test]
    fn absent_backends_are_omitted_from_comparison() {
        let results: ExperimentResults<ClassificationRecord> = ExperimentResults::new(vec![
            (
                "openai".to_string(),
                Some(ModelRun::from_records("openai", "o3", vec![record(true, true)])),
            ),
            ("anthropic".to_string(), None),
        ]);

        let comparison = ClassificationJudge.evaluate(&results);
        assert!(comparison.models.contains_key("openai"));
        assert!(!comparison.models.contains_key("anthropic"));
        assert_eq!(comparison.best_accuracy_model.as_deref(), Some("openai"));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let results = results_with(vec![record(true, true), record(false, true)]);
        let first = serde_json::to_string(&ClassificationJudge.evaluate(&results)).unwrap();
        let second = serde_json::to_string(&ClassificationJudge.evaluate(&results)).unwrap();
        assert_eq!(first, second);
    }
}
