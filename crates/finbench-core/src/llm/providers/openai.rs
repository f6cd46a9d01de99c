//! OpenAI client implementation

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

/// OpenAI chat-completions client
pub struct OpenAiClient {
    config: ProviderConfig,
    http_client: Client,
}

impl OpenAiClient {
    /// Create a new OpenAI client
    pub fn new(config: ProviderConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// OpenAI chat completion
    #[instrument(skip(self, messages, tools), level = "debug")]
    pub async fn chat(
        &self,
        params: &CallParameters,
        messages: &[ChatMessage],
        tools: Option<&[ToolSchema]>,
    ) -> FinbenchResult<LlmResponse> {
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

        let mut request = self.http_client.post(&url).json(&request_body);

        if let Some(api_key) = self.config.get_api_key() {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FinbenchError::backend(format!("OpenAI request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(error_utils::handle_http_error(response, "OpenAI").await);
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| error_utils::handle_parse_error(e, "OpenAI"))?;

        ResponseParser::parse_openai(response_json)
    }
}
