//! Finbench evaluation harness
//!
//! Fans a fixed input set out to N heterogeneous LLM backends in parallel,
//! normalizes each backend's structured output into canonical prediction
//! records, tracks per-call cost and latency, and feeds the records into the
//! classification/regression judges that rank providers.
//!
//! # Example
//!
//! ```rust,ignore
//! use finbench_eval::{Dispatcher, adapters, experiments::RedFlagExperiment};
//! use finbench_eval::judge::ClassificationJudge;
//!
//! let dispatcher = Dispatcher::new(adapters::default_adapters(&http_client), pacing);
//! let results = dispatcher.run(RedFlagExperiment, items).await;
//! let comparison = ClassificationJudge.evaluate(&results);
//! ```

pub mod adapter;
pub mod adapters;
pub mod experiments;
pub mod judge;
pub mod report;
pub mod runner;

// Re-exports for convenience
pub use adapter::{AdapterCall, CaseRequest, Pricing, ProviderAdapter};
pub use runner::{
    ClassificationRecord, Dispatcher, Experiment, ExperimentResults, ModelRun, RegressionRecord,
};
