//! DeepSeek client implementation
//!
//! OpenAI-compatible dialect served from the DeepSeek endpoint.

use crate::config::ProviderConfig;
use crate::error::{FinbenchError, FinbenchResult};
use crate::llm::converters::{MessageConverter, ToolConverter};
use crate::llm::error_utils;
use crate::llm::messages::{ChatMessage, LlmResponse};
use crate::llm::parsers::ResponseParser;
use crate::llm::tools::ToolSchema;
use crate::llm::CallParameters;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::instrument;

/// DeepSeek client
pub struct DeepSeekClient {
    config: ProviderConfig,
    http_client: Client,
}

impl DeepSeekClient {
    /// Create a new DeepSeek client
    pub fn new(config: ProviderConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// DeepSeek chat completion
    #[instrument(skip(self, messages, tools), level = "debug")]
    pub async fn chat(
        &self,
        params: &CallParameters,
        messages: &[ChatMessage],
        tools: Option<&[ToolSchema]>,
    ) -> FinbenchResult<LlmResponse> {
        let api_key = self
            .config
            .get_api_key()
            .ok_or_else(|| FinbenchError::backend("DeepSeek API key not provided"))?;

        let url = format!("{}/chat/completions", self.config.get_base_url());

        let mut request_body = json!({
            "model": params.model,
            "messages": MessageConverter::to_openai(messages),
        });

        if let Some(max_tokens) = params.max_tokens {
            request_body["max_tokens"] = json!(max_tokens);
        }
        if let Some(temperature) = params.temperature {
            request_body["temperature"] = json!(temperature);
        }

        if let Some(tools) = tools {
            if !tools.is_empty() {
                request_body["tools"] = json!(ToolConverter::to_openai(tools));
                if let Some(forced) = &params.forced_tool {
                    request_body["tool_choice"] = json!({
                        "type": "function",
                        "function": {"name": forced},
                    });
                }
            }
        }

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| FinbenchError::backend(format!("DeepSeek request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(error_utils::handle_http_error(response, "DeepSeek").await);
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| error_utils::handle_parse_error(e, "DeepSeek"))?;

        ResponseParser::parse_openai(response_json)
    }
}
