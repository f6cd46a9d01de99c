//! Provider-specific configuration
//!
//! A [`ProviderConfig`] names one backend and resolves its API key and base
//! URL. Keys come from the environment unless set explicitly:
//!
//! 1. `FINBENCH_<PROVIDER>_API_KEY`
//! 2. the provider's standard variable (e.g. `ANTHROPIC_API_KEY`)
//! 3. the value stored on the config itself

use serde::{Deserialize, Serialize};

/// Configuration for a single LLM provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name (openai, anthropic, gemini, kimi, deepseek)
    pub name: String,
    /// API key for authentication
    pub api_key: Option<String>,
    /// Base URL override
    pub base_url: Option<String>,
    /// API version (used by Anthropic)
    pub api_version: Option<String>,
}

impl ProviderConfig {
    /// Create a new provider configuration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            api_key: None,
            base_url: None,
            api_version: None,
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the API version
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Get the effective base URL
    pub fn get_base_url(&self) -> String {
        if let Some(base_url) = &self.base_url {
            base_url.clone()
        } else {
            match self.name.as_str() {
                "openai" => "https://api.openai.com/v1".to_string(),
                "anthropic" => "https://api.anthropic.com".to_string(),
                "gemini" | "google" => "https://generativelanguage.googleapis.com".to_string(),
                "kimi" | "moonshot" => "https://api.moonshot.ai/v1".to_string(),
                "deepseek" => "https://api.deepseek.com".to_string(),
                _ => "http://localhost:8000".to_string(),
            }
        }
    }

    /// Get the effective API key (from environment or config)
    ///
    /// Priority order:
    /// 1. `FINBENCH_<PROVIDER>_API_KEY` environment variable
    /// 2. Standard provider environment variable (e.g. `OPENAI_API_KEY`)
    /// 3. Configuration value
    pub fn get_api_key(&self) -> Option<String> {
        let finbench_var = format!("FINBENCH_{}_API_KEY", self.name.to_uppercase());
        if let Ok(key) = std::env::var(&finbench_var) {
            if !key.is_empty() {
                return Some(key);
            }
        }

        for env_var in standard_env_vars(&self.name) {
            if let Ok(key) = std::env::var(env_var) {
                if !key.is_empty() {
                    return Some(key);
                }
            }
        }

        self.api_key.clone()
    }

    /// Validate that an API key is resolvable
    pub fn validate(&self) -> Result<(), String> {
        if self.get_api_key().is_none() {
            return Err(format!(
                "API key required for '{}'. Set {} or pass one explicitly",
                self.name,
                standard_env_vars(&self.name)
                    .first()
                    .copied()
                    .unwrap_or("an API key variable"),
            ));
        }
        Ok(())
    }
}

/// Standard environment variables checked for each provider
fn standard_env_vars(provider: &str) -> &'static [&'static str] {
    match provider {
        "openai" => &["OPENAI_API_KEY"],
        "anthropic" => &["ANTHROPIC_API_KEY"],
        "gemini" | "google" => &["GOOGLE_API_KEY", "GEMINI_API_KEY"],
        "kimi" | "moonshot" => &["KIMI_API_KEY", "MOONSHOT_API_KEY"],
        "deepseek" => &["DEEPSEEK_API_KEY"],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_urls() {
        assert_eq!(
            ProviderConfig::new("openai").get_base_url(),
            "https://api.openai.com/v1"
        );
        assert_eq!(
            ProviderConfig::new("anthropic").get_base_url(),
            "https://api.anthropic.com"
        );
        assert_eq!(
            ProviderConfig::new("kimi").get_base_url(),
            "https://api.moonshot.ai/v1"
        );
        assert_eq!(
            ProviderConfig::new("deepseek").get_base_url(),
            "https://api.deepseek.com"
        );
    }

    #[test]
    fn base_url_override_wins() {
        let config = ProviderConfig::new("openai").with_base_url("http://localhost:9999");
        assert_eq!(config.get_base_url(), "http://localhost:9999");
    }

    #[test]
    fn explicit_key_is_used() {
        // FINBENCH_EXAMPLECORP_API_KEY is never set in the environment, so the
        // configured value must win.
        let config = ProviderConfig::new("examplecorp").with_api_key("sk-test");
        assert_eq!(config.get_api_key().as_deref(), Some("sk-test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_key_fails_validation() {
        let config = ProviderConfig::new("examplecorp");
        assert!(config.validate().is_err());
    }
}
