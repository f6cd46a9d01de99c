//! Anthropic adapter

use crate::adapter::{AdapterCall, CaseRequest, Pricing, ProviderAdapter};
use async_trait::async_trait;
use finbench_core::config::ProviderConfig;
use finbench_core::error::{FinbenchError, FinbenchResult};
use finbench_core::llm::CallParameters;
use finbench_core::llm::providers::AnthropicClient;

const DEFAULT_MODEL: &str = "claude-opus-4-20250514";
const INPUT_COST_PER_MILLION: f64 = 3.00;
const OUTPUT_COST_PER_MILLION: f64 = 15.00;
const MAX_TOKENS: u32 = 1024;

/// Adapter for Anthropic models
pub struct AnthropicAdapter {
    config: ProviderConfig,
    client: AnthropicClient,
    model: String,
}

impl AnthropicAdapter {
    /// Create an adapter with the default model
    pub fn new(http_client: reqwest::Client) -> Self {
        Self::with_model(http_client, DEFAULT_MODEL)
    }

    /// Create an adapter for a specific model
    pub fn with_model(http_client: reqwest::Client, model: impl Into<String>) -> Self {
        let config = ProviderConfig::new("anthropic");
        Self {
            client: AnthropicClient::new(config.clone(), http_client),
            config,
            model: model.into(),
        }
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicAdapter {
    fn provider(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn pricing(&self) -> Pricing {
        Pricing::new(INPUT_COST_PER_MILLION, OUTPUT_COST_PER_MILLION)
    }

    fn ensure_ready(&self) -> FinbenchResult<()> {
        self.config.validate().map_err(FinbenchError::config)
    }

    async fn call(&self, request: &CaseRequest) -> FinbenchResult<AdapterCall> {
        let params = CallParameters::new(self.model.as_str())
            .with_temperature(0.0)
            .with_max_tokens(MAX_TOKENS);

        let response = self
            .client
            .chat(&params, &request.messages, Some(std::slice::from_ref(&request.tool)))
            .await?;

        let usage = response.usage.unwrap_or_default();
        // The tool_use block may follow a text block; take the first invocation
        let tool_args = response.tool_calls.into_iter().next().map(|tc| tc.arguments);
        Ok(AdapterCall { tool_args, usage })
    }
}
