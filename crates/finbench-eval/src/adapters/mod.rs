//! Concrete provider adapters
//!
//! Each adapter owns its model id, its pricing constants, and the
//! backend-specific request/response handling.

mod anthropic;
mod deepseek;
mod google;
mod kimi;
mod openai;

pub use anthropic::AnthropicAdapter;
pub use deepseek::DeepSeekAdapter;
pub use google::GoogleAdapter;
pub use kimi::KimiAdapter;
pub use openai::OpenAiAdapter;

use crate::adapter::ProviderAdapter;
use std::sync::Arc;

/// The default adapter set, in the canonical dispatch order used for
/// ranking tie-breaks
pub fn default_adapters(http_client: &reqwest::Client) -> Vec<Arc<dyn ProviderAdapter>> {
    vec![
        Arc::new(OpenAiAdapter::new(http_client.clone())),
        Arc::new(AnthropicAdapter::new(http_client.clone())),
        Arc::new(GoogleAdapter::new(http_client.clone())),
        Arc::new(KimiAdapter::new(http_client.clone())),
        Arc::new(DeepSeekAdapter::new(http_client.clone())),
    ]
}
