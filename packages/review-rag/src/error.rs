//! Typed errors for the review RAG pipeline.
//!
//! Page-level failures ([`FetchError`], [`ExtractError`]) are absorbed by the
//! corpus builder. Everything else surfaces as a [`RagError`] for the request
//! boundary to map onto a user-visible payload.

use thiserror::Error;

/// Request-level errors returned by the pipeline.
#[derive(Debug, Error)]
pub enum RagError {
    /// Request was missing a required field or had a blank one
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// Source URL could not be parsed or is not http(s)
    #[error("invalid source URL: {url}")]
    InvalidUrl { url: String },

    /// Every page was attempted and no reviews were collected
    #[error("no reviews found at {url}")]
    EmptyCorpus { url: String },

    /// Embedding failed while building or querying the index
    #[error("indexing failed: {0}")]
    Indexing(#[source] AiError),

    /// Language model failed or returned no completion
    #[error("answer synthesis failed: {0}")]
    Synthesis(#[source] AiError),

    /// Extractor could not be constructed from its selectors
    #[error("extractor error: {0}")]
    Extract(#[from] ExtractError),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Errors from fetching a single page of reviews.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Request could not be sent or the body could not be read
    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Page address could not be built
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },
}

/// Errors from extracting reviews out of fetched content.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The page has no reviews container
    #[error("reviews container not found: {selector}")]
    MissingContainer { selector: String },

    /// A configured CSS selector does not parse
    #[error("invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// Errors from the embedding and completion capabilities.
#[derive(Debug, Error)]
pub enum AiError {
    /// Capability is not configured (missing key, bad settings)
    #[error("configuration error: {0}")]
    Config(String),

    /// Connection failed or timed out
    #[error("network error: {0}")]
    Network(String),

    /// Provider answered with an error
    #[error("API error: {0}")]
    Api(String),

    /// Provider response could not be decoded
    #[error("parse error: {0}")]
    Parse(String),

    /// Provider answered without a completion
    #[error("no completion returned")]
    EmptyResponse,

    /// Batch embedding returned a different number of vectors than inputs
    #[error("expected {expected} embeddings, got {actual}")]
    CountMismatch { expected: usize, actual: usize },

    /// Embeddings in one index disagree on dimension
    #[error("expected embedding dimension {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, RagError>;

/// Result type alias for page fetches.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for review extraction.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Result type alias for embedding and completion calls.
pub type AiResult<T> = std::result::Result<T, AiError>;

impl RagError {
    /// Build an [`RagError::InvalidRequest`].
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }
}

#[cfg(feature = "openai")]
impl From<openai_client::OpenAIError> for AiError {
    fn from(err: openai_client::OpenAIError) -> Self {
        use openai_client::OpenAIError;

        match err {
            OpenAIError::Config(msg) => AiError::Config(msg),
            OpenAIError::Network(msg) => AiError::Network(msg),
            OpenAIError::Api(msg) => AiError::Api(msg),
            OpenAIError::Parse(msg) => AiError::Parse(msg),
        }
    }
}
