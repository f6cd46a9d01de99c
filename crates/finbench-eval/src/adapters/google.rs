//! Google (Gemini) adapter

use crate::adapter::{AdapterCall, CaseRequest, Pricing, ProviderAdapter};
use async_trait::async_trait;
use finbench_core::config::ProviderConfig;
use finbench_core::error::{FinbenchError, FinbenchResult};
use finbench_core::llm::CallParameters;
use finbench_core::llm::providers::GoogleClient;

const DEFAULT_MODEL: &str = "gemini-2.5-pro";
const INPUT_COST_PER_MILLION: f64 = 2.50;
const OUTPUT_COST_PER_MILLION: f64 = 10.00;

/// Adapter for Google Gemini models
pub struct GoogleAdapter {
    config: ProviderConfig,
    client: GoogleClient,
    model: String,
}

impl GoogleAdapter {
    /// Create an adapter with the default model
    pub fn new(http_client: reqwest::Client) -> Self {
        Self::with_model(http_client, DEFAULT_MODEL)
    }

    /// Create an adapter for a specific model
    pub fn with_model(http_client: reqwest::Client, model: impl Into<String>) -> Self {
        let config = ProviderConfig::new("gemini");
        Self {
            client: GoogleClient::new(config.clone(), http_client),
            config,
            model: model.into(),
        }
    }
}

#[async_trait]
impl ProviderAdapter for GoogleAdapter {
    fn provider(&self) -> &str {
        "gemini"
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
        let params = CallParameters::new(self.model.as_str()).with_temperature(1.0);

        let response = self
            .client
            .chat(&params, &request.messages, Some(std::slice::from_ref(&request.tool)))
            .await?;

        let usage = response.usage.unwrap_or_default();
        let tool_args = response.tool_calls.into_iter().next().map(|tc| tc.arguments);
        Ok(AdapterCall { tool_args, usage })
    }
}
