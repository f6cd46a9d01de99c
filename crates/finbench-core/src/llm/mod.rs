//! LLM wire layer: messages, tool schemas, per-dialect conversion, response
//! parsing, and one raw client per backend.

pub mod converters;
pub mod error_utils;
pub mod messages;
pub mod parsers;
pub mod providers;
pub mod tools;

pub use messages::{ChatMessage, LlmResponse, MessageRole};
pub use tools::{ToolCall, ToolSchema};

/// Per-call parameters handed to a provider client
#[derive(Debug, Clone)]
pub struct CallParameters {
    /// Model name/ID
    pub model: String,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature
    pub temperature: Option<f32>,
    /// Name of the tool the model must invoke, for dialects that support
    /// forcing via `tool_choice`. Other dialects ignore it.
    pub forced_tool: Option<String>,
}

impl CallParameters {
    /// Create call parameters with just the model name
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_tokens: None,
            temperature: None,
            forced_tool: None,
        }
    }

    /// Set the maximum number of tokens to generate
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Require the model to invoke the named tool
    pub fn with_forced_tool(mut self, name: impl Into<String>) -> Self {
        self.forced_tool = Some(name.into());
        self
    }
}
