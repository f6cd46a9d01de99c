//! Error types for finbench

use thiserror::Error;

/// Result type alias for finbench operations
pub type FinbenchResult<T> = Result<T, FinbenchError>;

/// Main error type for finbench
#[derive(Error, Debug, Clone)]
pub enum FinbenchError {
    /// Configuration related errors (missing API keys, bad settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend call errors (transport, auth, rate limits)
    #[error("Backend error: {0}")]
    Backend(String),

    /// Structured-output errors (no tool call, or payload failed validation)
    #[error("Schema error: {0}")]
    Schema(String),

    /// Dataset construction/loading errors
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(String),
}

impl FinbenchError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    /// Create a new schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    /// Create a new dataset error
    pub fn dataset(message: impl Into<String>) -> Self {
        Self::Dataset(message.into())
    }
}

impl From<std::io::Error> for FinbenchError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for FinbenchError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}

impl From<reqwest::Error> for FinbenchError {
    fn from(error: reqwest::Error) -> Self {
        Self::Http(error.to_string())
    }
}
