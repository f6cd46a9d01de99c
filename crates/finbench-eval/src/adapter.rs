//! Provider adapter contract
//!
//! One adapter per backend translates the canonical request into the
//! backend-specific call and unwraps the backend-specific response. Request
//! and response shape differences live entirely inside the adapters; the
//! dispatcher never branches on provider identity.

use async_trait::async_trait;
use finbench_core::error::FinbenchResult;
use finbench_core::llm::{ChatMessage, ToolSchema};
use finbench_core::types::TokenUsage;
use serde_json::Value;

/// Per-million-token pricing for one backend's model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    /// Input cost per 1M tokens (USD)
    pub input_cost_per_million: f64,
    /// Output cost per 1M tokens (USD)
    pub output_cost_per_million: f64,
}

impl Pricing {
    /// Create a new pricing table
    pub const fn new(input_cost_per_million: f64, output_cost_per_million: f64) -> Self {
        Self {
            input_cost_per_million,
            output_cost_per_million,
        }
    }

    /// Dollar cost of a single call given observed token counts
    pub fn call_cost(&self, usage: &TokenUsage) -> f64 {
        (usage.prompt_tokens as f64 / 1_000_000.0) * self.input_cost_per_million
            + (usage.completion_tokens as f64 / 1_000_000.0) * self.output_cost_per_million
    }
}

/// Canonical request for one evaluation case
#[derive(Debug, Clone)]
pub struct CaseRequest {
    /// Identifier of the input item
    pub ticker: String,
    /// Conversation handed to the backend
    pub messages: Vec<ChatMessage>,
    /// The tool the backend must answer through
    pub tool: ToolSchema,
}

/// Normalized outcome of one backend call
#[derive(Debug, Clone)]
pub struct AdapterCall {
    /// Arguments of the single tool invocation, absent when the model did
    /// not produce one
    pub tool_args: Option<Value>,
    /// Token usage reported by the backend
    pub usage: TokenUsage,
}

/// Common capability implemented by every backend adapter
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Stable identifier used as the result-map key
    fn provider(&self) -> &str;

    /// Model this adapter drives
    fn model(&self) -> &str;

    /// Pricing constants owned by this backend
    fn pricing(&self) -> Pricing;

    /// Cheap readiness check run once before the worker loop starts.
    ///
    /// A failure here marks the whole backend absent for the run, mirroring
    /// an auth failure that would doom every call.
    fn ensure_ready(&self) -> FinbenchResult<()> {
        Ok(())
    }

    /// Issue one extraction call
    async fn call(&self, request: &CaseRequest) -> FinbenchResult<AdapterCall>;
}
