//! Concurrent fan-out of one input set across all backends
//!
//! One worker per backend; each worker walks the input set sequentially with
//! a pacing delay between calls. Per-item failures are logged and skipped;
//! a failed readiness check or a panicked worker marks that backend absent.
//! The dispatcher itself never fails.

use crate::adapter::{CaseRequest, ProviderAdapter};
use crate::runner::results::{ExperimentResults, ModelRun, PredictionRecord};
use finbench_core::error::FinbenchResult;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// One evaluation task: how to turn an input item into a backend request and
/// how to validate the returned tool payload into a prediction record
pub trait Experiment: Send + Sync + 'static {
    /// Input item type
    type Item: Send + Sync + 'static;
    /// Prediction record type
    type Record: PredictionRecord + Send + 'static;

    /// Experiment name, used for logging and report filenames
    fn name(&self) -> &str;

    /// Identifier of one input item
    fn ticker<'a>(&self, item: &'a Self::Item) -> &'a str;

    /// Build the canonical request for one input item
    fn request(&self, item: &Self::Item) -> CaseRequest;

    /// Validate the tool payload and join it with the item's ground truth.
    ///
    /// Fails with a schema error when the payload does not match the expected
    /// output schema; the dispatcher skips the item and keeps going.
    fn decode(
        &self,
        item: &Self::Item,
        model: &str,
        args: Value,
        cost: f64,
        duration: f64,
    ) -> FinbenchResult<Self::Record>;
}

/// Runs one worker per backend over the full input set
pub struct Dispatcher {
    adapters: Vec<Arc<dyn ProviderAdapter>>,
    pacing: Duration,
}

impl Dispatcher {
    /// Create a dispatcher over a fixed adapter set
    ///
    /// Adapter order is the canonical dispatch order; ranking tie-breaks
    /// follow it.
    pub fn new(adapters: Vec<Arc<dyn ProviderAdapter>>, pacing: Duration) -> Self {
        Self { adapters, pacing }
    }

    /// Run the experiment across all backends and join the results
    pub async fn run<E: Experiment>(
        &self,
        experiment: Arc<E>,
        items: Arc<Vec<E::Item>>,
    ) -> ExperimentResults<E::Record> {
        let mut handles = Vec::with_capacity(self.adapters.len());
        for adapter in &self.adapters {
            let provider = adapter.provider().to_string();
            let worker = run_worker(
                adapter.clone(),
                experiment.clone(),
                items.clone(),
                self.pacing,
            );
            handles.push((provider, tokio::spawn(worker)));
        }

        let mut runs = Vec::with_capacity(handles.len());
        for (provider, handle) in handles {
            let outcome = match handle.await {
                Ok(Ok(run)) => {
                    info!(
                        provider = %provider,
                        predictions = run.predictions.len(),
                        "backend completed"
                    );
                    Some(run)
                }
                Ok(Err(err)) => {
                    warn!(provider = %provider, error = %err, "backend failed, marking absent");
                    None
                }
                Err(err) => {
                    warn!(provider = %provider, error = %err, "worker aborted, marking absent");
                    None
                }
            };
            runs.push((provider, outcome));
        }

        ExperimentResults::new(runs)
    }
}

/// Sequential per-backend loop over the input set
async fn run_worker<E: Experiment>(
    adapter: Arc<dyn ProviderAdapter>,
    experiment: Arc<E>,
    items: Arc<Vec<E::Item>>,
    pacing: Duration,
) -> FinbenchResult<ModelRun<E::Record>> {
    adapter.ensure_ready()?;

    let provider = adapter.provider().to_string();
    let model = adapter.model().to_string();
    let total = items.len();
    let mut predictions = Vec::new();

    info!(
        provider = %provider,
        model = %model,
        items = total,
        experiment = experiment.name(),
        "processing input set"
    );

    for (index, item) in items.iter().enumerate() {
        if index > 0 && !pacing.is_zero() {
            tokio::time::sleep(pacing).await;
        }

        let ticker = experiment.ticker(item);
        debug!(provider = %provider, ticker, "item {}/{}", index + 1, total);

        let request = experiment.request(item);
        let started = Instant::now();
        let call = match adapter.call(&request).await {
            Ok(call) => call,
            Err(err) => {
                warn!(provider = %provider, ticker, error = %err, "call failed, skipping item");
                continue;
            }
        };
        let duration = started.elapsed().as_secs_f64();
        let cost = adapter.pricing().call_cost(&call.usage);

        let Some(args) = call.tool_args else {
            warn!(provider = %provider, ticker, "no tool call returned, skipping item");
            continue;
        };

        match experiment.decode(item, &model, args, cost, duration) {
            Ok(record) => predictions.push(record),
            Err(err) => {
                warn!(provider = %provider, ticker, error = %err, "invalid tool payload, skipping item");
            }
        }
    }

    Ok(ModelRun::from_records(provider, model, predictions))
}
