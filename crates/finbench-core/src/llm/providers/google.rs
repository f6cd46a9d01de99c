//! Google (Gemini) client implementation

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

/// Google (Gemini) generateContent client
pub struct GoogleClient {
    config: ProviderConfig,
    http_client: Client,
}

impl GoogleClient {
    /// Create a new Google client
    pub fn new(config: ProviderConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Google (Gemini) chat completion
    ///
    /// Tool forcing via `forced_tool` is not part of this dialect and is
    /// ignored; the tool list alone steers the model.
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
            .ok_or_else(|| FinbenchError::backend("Google API key not provided"))?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.get_base_url(),
            params.model,
            api_key
        );

        let mut request_body = json!({
            "contents": MessageConverter::to_google(messages),
        });

        let mut generation_config = json!({});
        if let Some(max_tokens) = params.max_tokens {
            generation_config["maxOutputTokens"] = json!(max_tokens);
        }
        if let Some(temperature) = params.temperature {
            generation_config["temperature"] = json!(temperature);
        }
        if generation_config
            .as_object()
            .is_some_and(|obj| !obj.is_empty())
        {
            request_body["generationConfig"] = generation_config;
        }

        if let Some(tools) = tools {
            if !tools.is_empty() {
                request_body["tools"] = json!([{
                    "functionDeclarations": ToolConverter::to_google(tools)
                }]);
            }
        }

        let response = self
            .http_client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| FinbenchError::backend(format!("Google request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(error_utils::handle_http_error(response, "Google").await);
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| error_utils::handle_parse_error(e, "Google"))?;

        ResponseParser::parse_google(response_json, &params.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn function_call_round_trip() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-pro:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "parts": [{
                            "functionCall": {
                                "name": "red_flag_detection",
                                "args": {"has_red_flags": true, "reasoning": "negative earnings growth"}
                            }
                        }],
                        "role": "model"
                    },
                    "finishReason": "STOP"
                }],
                "usageMetadata": {
                    "promptTokenCount": 300,
                    "candidatesTokenCount": 45,
                    "totalTokenCount": 345
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = ProviderConfig::new("gemini")
            .with_api_key("test-api-key")
            .with_base_url(mock_server.uri());
        let http_client = Client::builder()
            .no_proxy()
            .build()
            .expect("Failed to create HTTP client");
        let client = GoogleClient::new(config, http_client);

        let params = CallParameters::new("gemini-2.5-pro").with_temperature(0.0);
        let tool = ToolSchema::new("red_flag_detection", "detect", serde_json::json!({"type": "object"}));
        let response = client
            .chat(&params, &[ChatMessage::user("check NVDA")], Some(&[tool]))
            .await
            .unwrap();

        assert_eq!(response.tool_calls.len(), 1);
        assert_eq!(response.tool_calls[0].arguments["has_red_flags"], true);
        assert_eq!(response.usage.unwrap().prompt_tokens, 300);
    }
}
