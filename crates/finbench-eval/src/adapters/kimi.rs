//! Kimi (Moonshot AI) adapter

use crate::adapter::{AdapterCall, CaseRequest, Pricing, ProviderAdapter};
use async_trait::async_trait;
use finbench_core::config::ProviderConfig;
use finbench_core::error::{FinbenchError, FinbenchResult};
use finbench_core::llm::CallParameters;
use finbench_core::llm::providers::KimiClient;

const DEFAULT_MODEL: &str = "kimi-k2-0711-preview";
// Estimated pricing
const INPUT_COST_PER_MILLION: f64 = 1.00;
const OUTPUT_COST_PER_MILLION: f64 = 3.00;
// Recommended temperature for Kimi K2
const TEMPERATURE: f32 = 0.6;

/// Adapter for Kimi K2 models
pub struct KimiAdapter {
    config: ProviderConfig,
    client: KimiClient,
    model: String,
}

impl KimiAdapter {
    /// Create an adapter with the default model
    pub fn new(http_client: reqwest::Client) -> Self {
        Self::with_model(http_client, DEFAULT_MODEL)
    }

    /// Create an adapter for a specific model
    pub fn with_model(http_client: reqwest::Client, model: impl Into<String>) -> Self {
        let config = ProviderConfig::new("kimi");
        Self {
            client: KimiClient::new(config.clone(), http_client),
            config,
            model: model.into(),
        }
    }
}

#[async_trait]
impl ProviderAdapter for KimiAdapter {
    fn provider(&self) -> &str {
        "kimi"
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
            .with_temperature(TEMPERATURE)
            .with_forced_tool(request.tool.name.as_str());

        let response = self
            .client
            .chat(&params, &request.messages, Some(std::slice::from_ref(&request.tool)))
            .await?;

        let usage = response.usage.unwrap_or_default();
        let tool_args = response.tool_calls.into_iter().next().map(|tc| tc.arguments);
        Ok(AdapterCall { tool_args, usage })
    }
}
