//! Error types for the OpenAI client.

use thiserror::Error;

/// Result type for OpenAI client operations.
pub type Result<T> = std::result::Result<T, OpenAIError>;

/// OpenAI client errors.
#[derive(Debug, Error)]
pub enum OpenAIError {
    /// Missing or empty API key
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request could not be sent (connection refused, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response (rate limit, bad model, invalid key)
    #[error("API error: {0}")]
    Api(String),

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
}
