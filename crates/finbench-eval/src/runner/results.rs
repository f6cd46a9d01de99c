//! Result containers for one experiment run

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Per-record accessors the aggregation fold needs
pub trait PredictionRecord {
    /// Dollar cost of the call that produced this record
    fn cost(&self) -> f64;
    /// Wall-clock duration of the call in seconds
    fn duration(&self) -> f64;
}

/// All predictions from one backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRun<R> {
    /// Backend identifier
    pub model_provider: String,
    /// Model driven by the backend's adapter
    pub model_name: String,
    /// Prediction records in input order
    pub predictions: Vec<R>,
    /// Mean dollar cost across the records (0 when empty)
    pub average_cost: f64,
    /// Mean call duration in seconds across the records (0 when empty)
    pub average_duration: f64,
}

impl<R: PredictionRecord> ModelRun<R> {
    /// Build a run from its records, folding out the cost/duration means
    pub fn from_records(
        model_provider: impl Into<String>,
        model_name: impl Into<String>,
        predictions: Vec<R>,
    ) -> Self {
        let n = predictions.len();
        let (total_cost, total_duration) = predictions
            .iter()
            .fold((0.0, 0.0), |(cost, duration), record| {
                (cost + record.cost(), duration + record.duration())
            });

        let (average_cost, average_duration) = if n > 0 {
            (total_cost / n as f64, total_duration / n as f64)
        } else {
            (0.0, 0.0)
        };

        Self {
            model_provider: model_provider.into(),
            model_name: model_name.into(),
            predictions,
            average_cost,
            average_duration,
        }
    }
}

/// Outcome of one experiment across all backends
///
/// Slots are kept in dispatch order; an absent run means that backend's
/// worker failed before producing a usable result set.
#[derive(Debug, Clone)]
pub struct ExperimentResults<R> {
    runs: Vec<(String, Option<ModelRun<R>>)>,
}

impl<R> ExperimentResults<R> {
    /// Assemble results from per-provider outcomes in dispatch order
    pub fn new(runs: Vec<(String, Option<ModelRun<R>>)>) -> Self {
        Self { runs }
    }

    /// The run for one backend, if it completed
    pub fn get(&self, provider: &str) -> Option<&ModelRun<R>> {
        self.runs
            .iter()
            .find(|(name, _)| name == provider)
            .and_then(|(_, run)| run.as_ref())
    }

    /// Whether the backend participated but produced no usable result
    pub fn is_absent(&self, provider: &str) -> bool {
        self.runs
            .iter()
            .any(|(name, run)| name == provider && run.is_none())
    }

    /// All slots in dispatch order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&ModelRun<R>>)> {
        self.runs
            .iter()
            .map(|(name, run)| (name.as_str(), run.as_ref()))
    }

    /// Completed runs in dispatch order
    pub fn present(&self) -> impl Iterator<Item = (&str, &ModelRun<R>)> {
        self.runs
            .iter()
            .filter_map(|(name, run)| run.as_ref().map(|r| (name.as_str(), r)))
    }

    /// Number of backends dispatched
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Whether no backends were dispatched
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

impl<R: Serialize> Serialize for ExperimentResults<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.runs.len()))?;
        for (provider, run) in &self.runs {
            map.serialize_entry(provider, run)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiments::ClassificationRecord;

    fn record(ticker: &str, cost: f64, duration: f64) -> ClassificationRecord {
        ClassificationRecord {
            ticker: ticker.to_string(),
            model: "test-model".to_string(),
            prediction: true,
            ground_truth: true,
            ground_truth_label: "Bankruptcy Risk".to_string(),
            reasoning: "test".to_string(),
            cost,
            duration,
        }
    }

    #[test]
    fn averages_fold_over_records() {
        let run = ModelRun::from_records(
            "openai",
            "o3",
            vec![record("AAA", 0.02, 2.0), record("BBB", 0.04, 4.0)],
        );
        assert!((run.average_cost - 0.03).abs() < 1e-12);
        assert!((run.average_duration - 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_run_has_zero_averages() {
        let run: ModelRun<ClassificationRecord> = ModelRun::from_records("openai", "o3", vec![]);
        assert_eq!(run.average_cost, 0.0);
        assert_eq!(run.average_duration, 0.0);
    }

    #[test]
    fn serializes_as_provider_keyed_object_with_null_for_absent() {
        let results = ExperimentResults::new(vec![
            (
                "openai".to_string(),
                Some(ModelRun::from_records("openai", "o3", vec![record("AAA", 0.01, 1.0)])),
            ),
            ("anthropic".to_string(), None),
        ]);

        let value = serde_json::to_value(&results).unwrap();
        assert_eq!(value["openai"]["model_name"], "o3");
        assert_eq!(value["openai"]["predictions"][0]["ticker"], "AAA");
        assert!(value["anthropic"].is_null());
    }

    #[test]
    fn lookup_and_absence() {
        let results: ExperimentResults<ClassificationRecord> = ExperimentResults::new(vec![
            ("openai".to_string(), Some(ModelRun::from_records("openai", "o3", vec![]))),
            ("kimi".to_string(), None),
        ]);
        assert!(results.get("openai").is_some());
        assert!(results.get("kimi").is_none());
        assert!(results.is_absent("kimi"));
        assert!(!results.is_absent("openai"));
        assert_eq!(results.present().count(), 1);
    }
}
