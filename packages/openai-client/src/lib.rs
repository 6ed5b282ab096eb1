//! Minimal OpenAI REST API client
//!
//! Chat completions and batch embeddings, with no domain-specific logic.
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_client::{ChatRequest, Message, OpenAIClient};
//!
//! let client = OpenAIClient::from_env()?;
//!
//! // Chat completion
//! let response = client
//!     .chat_completion(ChatRequest::new("gpt-4").message(Message::user("Hello!")))
//!     .await?;
//!
//! // Embeddings, one vector per input in input order
//! let vectors = client
//!     .create_embeddings(&["first", "second"], "text-embedding-ada-002")
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{OpenAIError, Result};
pub use types::*;

use reqwest::{header, Client};
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI API client.
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    /// Create a new OpenAI client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| OpenAIError::Config("OPENAI_API_KEY not set".into()))?;
        if api_key.trim().is_empty() {
            return Err(OpenAIError::Config("OPENAI_API_KEY is empty".into()));
        }
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Chat completion.
    ///
    /// Returns the first choice's content; `content` is `None` when the API
    /// answered without one.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenAI request failed");
                OpenAIError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "OpenAI API error");
            return Err(OpenAIError::Api(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let chat_response: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| OpenAIError::Parse(e.to_string()))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content);

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            has_content = content.is_some(),
            "OpenAI chat completion"
        );

        Ok(ChatResponse {
            content,
            usage: chat_response.usage,
        })
    }

    /// Create embeddings for multiple texts in one request.
    ///
    /// Vectors come back in input order; a response with a different
    /// number of vectors than inputs is a parse error.
    pub async fn create_embeddings(&self, texts: &[&str], model: &str) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = types::EmbeddingRequest {
            model,
            input: texts,
        };

        let response = self
            .http_client
            .post(format!("{}/embeddings", self.base_url))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Embedding request failed");
                OpenAIError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "OpenAI embedding error");
            return Err(OpenAIError::Api(format!(
                "OpenAI embedding error ({}): {}",
                status, error_text
            )));
        }

        let mut embed_response: types::EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| OpenAIError::Parse(e.to_string()))?;

        if embed_response.data.len() != texts.len() {
            return Err(OpenAIError::Parse(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                embed_response.data.len()
            )));
        }

        embed_response.data.sort_by_key(|d| d.index);
        debug!(model, count = texts.len(), "OpenAI embeddings");

        Ok(embed_response
            .data
            .into_iter()
            .map(|d| d.embedding)
            .collect())
    }

    /// Create an embedding for one text.
    pub async fn create_embedding(&self, text: &str, model: &str) -> Result<Vec<f32>> {
        self.create_embeddings(&[text], model)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| OpenAIError::Api("No embedding from OpenAI".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = OpenAIClient::new("sk-test").with_base_url("https://custom.api.com/");

        assert_eq!(client.api_key, "sk-test");
        assert_eq!(client.base_url(), "https://custom.api.com");
    }

    #[tokio::test]
    async fn test_chat_completion_returns_first_choice() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"model":"gpt-4","temperature":0.0}"#.to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":"Get the tacos."}}],
                    "usage":{"prompt_tokens":10,"completion_tokens":4,"total_tokens":14}}"#,
            )
            .create_async()
            .await;

        let client = OpenAIClient::new("sk-test").with_base_url(server.url());
        let response = client
            .chat_completion(
                ChatRequest::new("gpt-4")
                    .message(Message::user("What should I order?"))
                    .temperature(0.0),
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.content.as_deref(), Some("Get the tacos."));
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(14));
    }

    #[tokio::test]
    async fn test_chat_completion_without_choices() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let client = OpenAIClient::new("sk-test").with_base_url(server.url());
        let response = client
            .chat_completion(ChatRequest::new("gpt-4").message(Message::user("hi")))
            .await
            .unwrap();

        assert!(response.content.is_none());
    }

    #[tokio::test]
    async fn test_api_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body(r#"{"error":{"message":"rate limited"}}"#)
            .create_async()
            .await;

        let client = OpenAIClient::new("sk-test").with_base_url(server.url());
        let result = client
            .chat_completion(ChatRequest::new("gpt-4").message(Message::user("hi")))
            .await;

        assert!(matches!(result, Err(OpenAIError::Api(msg)) if msg.contains("rate limited")));
    }

    #[tokio::test]
    async fn test_embeddings_are_returned_in_input_order() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/embeddings")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"model":"text-embedding-ada-002","input":["a","b"]}"#.to_string(),
            ))
            .with_status(200)
            .with_body(
                r#"{"data":[{"index":1,"embedding":[0.0,1.0]},{"index":0,"embedding":[1.0,0.0]}]}"#,
            )
            .create_async()
            .await;

        let client = OpenAIClient::new("sk-test").with_base_url(server.url());
        let vectors = client
            .create_embeddings(&["a", "b"], "text-embedding-ada-002")
            .await
            .unwrap();

        assert_eq!(vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[tokio::test]
    async fn test_embedding_count_mismatch_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/embeddings")
            .with_status(200)
            .with_body(r#"{"data":[{"index":0,"embedding":[1.0]}]}"#)
            .create_async()
            .await;

        let client = OpenAIClient::new("sk-test").with_base_url(server.url());
        let result = client
            .create_embeddings(&["a", "b"], "text-embedding-ada-002")
            .await;

        assert!(matches!(result, Err(OpenAIError::Parse(_))));
    }
}
