//! Response parsing for the three provider dialects

use crate::error::{FinbenchError, FinbenchResult};
use crate::llm::messages::LlmResponse;
use crate::llm::tools::ToolCall;
use crate::types::TokenUsage;
use serde_json::Value;

/// Response parser for the provider wire formats
pub struct ResponseParser;

impl ResponseParser {
    /// Parse an OpenAI chat-completions response
    ///
    /// Also used for the OpenAI-compatible backends (Kimi, DeepSeek). Tool
    /// call arguments arrive as a JSON-encoded string and are decoded here.
    pub fn parse_openai(response: Value) -> FinbenchResult<LlmResponse> {
        let choice = &response["choices"][0];
        let message = &choice["message"];

        let content = message["content"].as_str().unwrap_or("").to_string();

        let mut tool_calls = Vec::new();
        if let Some(calls) = message["tool_calls"].as_array() {
            for call in calls {
                if let Some(function) = call["function"].as_object() {
                    let arguments: Value = serde_json::from_str(
                        function
                            .get("arguments")
                            .and_then(|v| v.as_str())
                            .unwrap_or("{}"),
                    )
                    .unwrap_or_default();

                    tool_calls.push(ToolCall::new(
                        call["id"].as_str().unwrap_or(""),
                        function.get("name").and_then(|v| v.as_str()).unwrap_or(""),
                        arguments,
                    ));
                }
            }
        }

        let usage = response["usage"].as_object().map(|usage_data| TokenUsage {
            prompt_tokens: usage_data
                .get("prompt_tokens")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u32,
            completion_tokens: usage_data
                .get("completion_tokens")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u32,
            total_tokens: usage_data
                .get("total_tokens")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u32,
        });

        Ok(LlmResponse {
            content,
            tool_calls,
            usage,
            model: response["model"].as_str().map(|s| s.to_string()),
            finish_reason: choice["finish_reason"].as_str().map(|s| s.to_string()),
            id: response["id"].as_str().map(|s| s.to_string()),
        })
    }

    /// Parse an Anthropic messages response
    ///
    /// The content array may contain:
    /// - `{"type": "text", "text": "..."}`
    /// - `{"type": "tool_use", "id": "...", "name": "...", "input": {...}}`
    pub fn parse_anthropic(response: Value) -> FinbenchResult<LlmResponse> {
        let mut content = String::new();
        let mut tool_calls = Vec::new();

        if let Some(content_array) = response["content"].as_array() {
            for block in content_array {
                match block["type"].as_str() {
                    Some("text") => {
                        if let Some(text) = block["text"].as_str() {
                            if !content.is_empty() {
                                content.push('\n');
                            }
                            content.push_str(text);
                        }
                    }
                    Some("tool_use") => {
                        let input = block["input"].clone();
                        if !input.is_object() {
                            tracing::warn!(
                                tool = block["name"].as_str().unwrap_or(""),
                                "tool_use block carries a non-object input"
                            );
                        }
                        tool_calls.push(ToolCall::new(
                            block["id"].as_str().unwrap_or(""),
                            block["name"].as_str().unwrap_or(""),
                            input,
                        ));
                    }
                    _ => {
                        // Unknown content type, ignore
                    }
                }
            }
        }

        let usage = response["usage"].as_object().map(|usage_data| {
            let input_tokens = usage_data
                .get("input_tokens")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u32;
            let output_tokens = usage_data
                .get("output_tokens")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u32;
            TokenUsage::new(input_tokens, output_tokens)
        });

        Ok(LlmResponse {
            content,
            tool_calls,
            usage,
            model: response["model"].as_str().map(|s| s.to_string()),
            finish_reason: response["stop_reason"].as_str().map(|s| s.to_string()),
            id: response["id"].as_str().map(|s| s.to_string()),
        })
    }

    /// Parse a Google generateContent response
    ///
    /// Function calls are content parts (`functionCall`) with already-decoded
    /// argument objects; Google does not assign call ids, so one is
    /// synthesized.
    pub fn parse_google(response: Value, model: &str) -> FinbenchResult<LlmResponse> {
        let candidates = response["candidates"]
            .as_array()
            .ok_or_else(|| FinbenchError::backend("No candidates in Google response"))?;

        let candidate = candidates
            .first()
            .ok_or_else(|| FinbenchError::backend("Empty candidates array in Google response"))?;

        let content_parts = candidate["content"]["parts"]
            .as_array()
            .ok_or_else(|| FinbenchError::backend("No content parts in Google response"))?;

        let mut content = String::new();
        let mut tool_calls = Vec::new();

        for part in content_parts {
            if let Some(text) = part["text"].as_str() {
                content.push_str(text);
            } else if let Some(function_call) = part["functionCall"].as_object() {
                let name = function_call
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or("");
                let args = function_call
                    .get("args")
                    .cloned()
                    .unwrap_or_else(|| Value::Object(serde_json::Map::new()));
                tool_calls.push(ToolCall::new(
                    format!("call_{}", uuid::Uuid::new_v4()),
                    name,
                    args,
                ));
            }
        }

        let usage = response["usageMetadata"].as_object().map(|usage_metadata| {
            let prompt_tokens = usage_metadata
                .get("promptTokenCount")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u32;
            let completion_tokens = usage_metadata
                .get("candidatesTokenCount")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u32;
            let total_tokens = usage_metadata
                .get("totalTokenCount")
                .and_then(|v| v.as_u64())
                .unwrap_or((prompt_tokens + completion_tokens) as u64)
                as u32;
            TokenUsage {
                prompt_tokens,
                completion_tokens,
                total_tokens,
            }
        });

        Ok(LlmResponse {
            content,
            tool_calls,
            usage,
            model: Some(model.to_string()),
            finish_reason: candidate["finishReason"].as_str().map(|s| s.to_string()),
            id: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_openai_tool_call_with_string_arguments() {
        let response = json!({
            "id": "chatcmpl-1",
            "model": "o3",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "red_flag_detection",
                            "arguments": "{\"has_red_flags\": true, \"reasoning\": \"negative cash flow\"}"
                        }
                    }]
                },
                "finish_reason": "tool_calls"
            }],
            "usage": {"prompt_tokens": 100, "completion_tokens": 20, "total_tokens": 120}
        });

        let parsed = ResponseParser::parse_openai(response).unwrap();
        assert_eq!(parsed.tool_calls.len(), 1);
        assert_eq!(parsed.tool_calls[0].name, "red_flag_detection");
        assert_eq!(parsed.tool_calls[0].arguments["has_red_flags"], true);
        let usage = parsed.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 100);
        assert_eq!(usage.completion_tokens, 20);
        assert_eq!(parsed.finish_reason.as_deref(), Some("tool_calls"));
    }

    #[test]
    fn openai_response_without_tool_calls() {
        let response = json!({
            "choices": [{
                "message": {"role": "assistant", "content": "no tools here"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 5, "completion_tokens": 3, "total_tokens": 8}
        });

        let parsed = ResponseParser::parse_openai(response).unwrap();
        assert!(!parsed.has_tool_calls());
        assert_eq!(parsed.content, "no tools here");
    }

    #[test]
    fn parses_anthropic_tool_use_block() {
        let response = json!({
            "id": "msg_1",
            "model": "claude-opus-4-20250514",
            "content": [
                {"type": "text", "text": "Let me check."},
                {"type": "tool_use", "id": "toolu_1", "name": "red_flag_detection",
                 "input": {"has_red_flags": false, "reasoning": "healthy margins"}}
            ],
            "stop_reason": "tool_use",
            "usage": {"input_tokens": 200, "output_tokens": 40}
        });

        let parsed = ResponseParser::parse_anthropic(response).unwrap();
        assert_eq!(parsed.content, "Let me check.");
        assert_eq!(parsed.tool_calls.len(), 1);
        assert_eq!(parsed.tool_calls[0].arguments["has_red_flags"], false);
        let usage = parsed.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 200);
        assert_eq!(usage.total_tokens, 240);
    }

    #[test]
    fn parses_google_function_call_part() {
        let response = json!({
            "candidates": [{
                "content": {
                    "parts": [{
                        "functionCall": {
                            "name": "cost_of_revenue_calculation",
                            "args": {"cost_of_revenue": 1274381000.0, "method": "calculation"}
                        }
                    }],
                    "role": "model"
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 500,
                "candidatesTokenCount": 60,
                "totalTokenCount": 560
            }
        });

        let parsed = ResponseParser::parse_google(response, "gemini-2.5-pro").unwrap();
        assert_eq!(parsed.tool_calls.len(), 1);
        assert_eq!(parsed.tool_calls[0].name, "cost_of_revenue_calculation");
        assert_eq!(
            parsed.tool_calls[0].arguments["cost_of_revenue"],
            1274381000.0
        );
        assert!(parsed.tool_calls[0].id.starts_with("call_"));
        assert_eq!(parsed.usage.unwrap().total_tokens, 560);
        assert_eq!(parsed.model.as_deref(), Some("gemini-2.5-pro"));
    }

    #[test]
    fn google_response_without_candidates_is_an_error() {
        let parsed = ResponseParser::parse_google(json!({}), "gemini-2.5-pro");
        assert!(parsed.is_err());
    }
}
