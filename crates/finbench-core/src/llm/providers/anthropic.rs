//! Anthropic client implementation

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

/// `max_tokens` is mandatory on the Anthropic messages API
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Anthropic messages client
pub struct AnthropicClient {
    config: ProviderConfig,
    http_client: Client,
}

impl AnthropicClient {
    /// Create a new Anthropic client
    pub fn new(config: ProviderConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Anthropic chat completion
    ///
    /// System messages are extracted from the message list and passed as the
    /// separate `system` parameter. Tool forcing via `forced_tool` is not
    /// part of this dialect and is ignored.
    #[instrument(skip(self, messages, tools), level = "debug")]
    pub async fn chat(
        &self,
        params: &CallParameters,
        messages: &[ChatMessage],
        tools: Option<&[ToolSchema]>,
    ) -> FinbenchResult<LlmResponse> {
        let url = format!("{}/v1/messages", self.config.get_base_url());

        let (system_message, user_messages) = MessageConverter::extract_system_message(messages);

        let mut request_body = json!({
            "model": params.model,
            "messages": MessageConverter::to_anthropic(&user_messages),
            "max_tokens": params.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        });

        if let Some(system) = system_message {
            request_body["system"] = json!(system);
        }
        if let Some(temperature) = params.temperature {
            request_body["temperature"] = json!(temperature);
        }

        if let Some(tools) = tools {
            if !tools.is_empty() {
                request_body["tools"] = json!(ToolConverter::to_anthropic(tools));
            }
        }

        let mut request = self.http_client.post(&url).json(&request_body);

        if let Some(api_key) = self.config.get_api_key() {
            request = request.header("x-api-key", api_key);
        }

        let api_version = self.config.api_version.as_deref().unwrap_or("2023-06-01");
        request = request.header("anthropic-version", api_version);

        let response = request
            .send()
            .await
            .map_err(|e| FinbenchError::backend(format!("Anthropic request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(error_utils::handle_http_error(response, "Anthropic").await);
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| error_utils::handle_parse_error(e, "Anthropic"))?;

        ResponseParser::parse_anthropic(response_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn tool_use_round_trip() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("anthropic-version", "2023-06-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "msg_1",
                "model": "claude-opus-4-20250514",
                "content": [{
                    "type": "tool_use",
                    "id": "toolu_1",
                    "name": "red_flag_detection",
                    "input": {"has_red_flags": false, "reasoning": "strong balance sheet"}
                }],
                "stop_reason": "tool_use",
                "usage": {"input_tokens": 80, "output_tokens": 25}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = ProviderConfig::new("anthropic")
            .with_api_key("test-api-key")
            .with_base_url(mock_server.uri());
        let http_client = Client::builder()
            .no_proxy()
            .build()
            .expect("Failed to create HTTP client");
        let client = AnthropicClient::new(config, http_client);

        let params = CallParameters::new("claude-opus-4-20250514").with_temperature(0.0);
        let tool = ToolSchema::new("red_flag_detection", "detect", serde_json::json!({"type": "object"}));
        let response = client
            .chat(&params, &[ChatMessage::user("check MSFT")], Some(&[tool]))
            .await
            .unwrap();

        assert_eq!(response.tool_calls.len(), 1);
        assert_eq!(response.tool_calls[0].arguments["has_red_flags"], false);
        assert_eq!(response.usage.unwrap().completion_tokens, 25);
    }
}
