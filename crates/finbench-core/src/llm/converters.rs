//! Message and tool format conversion for the three provider dialects

use crate::llm::messages::{ChatMessage, MessageRole};
use crate::llm::tools::ToolSchema;
use serde_json::{Value, json};

/// Message format converter
pub struct MessageConverter;

impl MessageConverter {
    /// Convert messages for the OpenAI chat-completions format
    ///
    /// Also used by the OpenAI-compatible backends (Kimi, DeepSeek).
    pub fn to_openai(messages: &[ChatMessage]) -> Vec<Value> {
        messages
            .iter()
            .map(|message| {
                json!({
                    "role": message.role.to_string(),
                    "content": message.content,
                })
            })
            .collect()
    }

    /// Convert messages for the Anthropic messages format
    ///
    /// System messages are not part of the message list for Anthropic; use
    /// [`MessageConverter::extract_system_message`] and pass the system text
    /// as the separate `system` parameter.
    pub fn to_anthropic(messages: &[ChatMessage]) -> Vec<Value> {
        messages
            .iter()
            .filter(|m| m.role != MessageRole::System)
            .map(|message| {
                json!({
                    "role": message.role.to_string(),
                    "content": message.content,
                })
            })
            .collect()
    }

    /// Convert messages for the Google `contents` format
    ///
    /// System messages are folded into the first user turn; assistant turns
    /// map to the `model` role.
    pub fn to_google(messages: &[ChatMessage]) -> Vec<Value> {
        let mut converted = Vec::new();
        let mut system_message = String::new();

        for message in messages {
            match message.role {
                MessageRole::System => {
                    if !system_message.is_empty() {
                        system_message.push_str("\n\n");
                    }
                    system_message.push_str(&message.content);
                }
                MessageRole::User => {
                    let mut content = message.content.clone();
                    if !system_message.is_empty() {
                        content = format!("{}\n\n{}", system_message, content);
                        system_message.clear();
                    }
                    converted.push(json!({
                        "role": "user",
                        "parts": [{"text": content}],
                    }));
                }
                MessageRole::Assistant => {
                    converted.push(json!({
                        "role": "model",
                        "parts": [{"text": message.content}],
                    }));
                }
            }
        }

        // A conversation consisting only of system text still needs one user turn
        if converted.is_empty() && !system_message.is_empty() {
            converted.push(json!({
                "role": "user",
                "parts": [{"text": system_message}],
            }));
        }

        converted
    }

    /// Extract the system message from a message list
    pub fn extract_system_message(messages: &[ChatMessage]) -> (Option<String>, Vec<ChatMessage>) {
        let mut system_content = None;
        let mut other_messages = Vec::new();

        for message in messages {
            if message.role == MessageRole::System {
                system_content = Some(message.content.clone());
            } else {
                other_messages.push(message.clone());
            }
        }

        (system_content, other_messages)
    }
}

/// Tool format converter
pub struct ToolConverter;

impl ToolConverter {
    /// Convert tools for the OpenAI function-calling format
    pub fn to_openai(tools: &[ToolSchema]) -> Vec<Value> {
        tools
            .iter()
            .map(|tool| {
                json!({
                    "type": "function",
                    "function": {
                        "name": tool.name,
                        "description": tool.description,
                        "parameters": tool.parameters,
                    }
                })
            })
            .collect()
    }

    /// Convert tools for the Anthropic native tool-definition format
    pub fn to_anthropic(tools: &[ToolSchema]) -> Vec<Value> {
        tools
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "input_schema": tool.parameters,
                })
            })
            .collect()
    }

    /// Convert tools for the Google function-declaration format
    pub fn to_google(tools: &[ToolSchema]) -> Vec<Value> {
        tools
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "parameters": tool.parameters,
                })
            })
            .collect()
    }
}
