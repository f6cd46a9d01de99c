//! Finbench core library
//!
//! This crate provides the plumbing the evaluation harness is built on:
//! provider configuration, wire-level LLM clients with per-dialect message
//! and tool conversion, the financial-datasets API client, and the dataset
//! containers the experiments consume.

pub mod config;
pub mod dataset;
pub mod error;
pub mod fd;
pub mod llm;
pub mod types;

// Re-export commonly used types
pub use config::{ProviderConfig, Settings};
pub use error::{FinbenchError, FinbenchResult};
pub use llm::{CallParameters, ChatMessage, LlmResponse, MessageRole, ToolCall, ToolSchema};
pub use types::TokenUsage;
