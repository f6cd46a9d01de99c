//! Dispatch and result collection

mod dispatcher;
mod results;

pub use dispatcher::{Dispatcher, Experiment};
pub use results::{ExperimentResults, ModelRun, PredictionRecord};

// Record types are defined next to their experiments
pub use crate::experiments::{ClassificationRecord, RegressionRecord};
