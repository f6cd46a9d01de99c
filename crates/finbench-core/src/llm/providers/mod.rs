//! Raw clients, one per backend
//!
//! Each client exposes a single `chat` call that builds the backend-specific
//! request, sends it, and parses the backend-specific response into the
//! canonical [`crate::llm::LlmResponse`]. Kimi and DeepSeek speak the OpenAI
//! dialect from their own endpoints.

mod anthropic;
mod deepseek;
mod google;
mod kimi;
mod openai;

pub use anthropic::AnthropicClient;
pub use deepseek::DeepSeekClient;
pub use google::GoogleClient;
pub use kimi::KimiClient;
pub use openai::OpenAiClient;
