//! OpenAI implementations of [`Embedder`] and [`Completer`].
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_client::OpenAIClient;
//! use review_rag::ai::{OpenAICompleter, OpenAIEmbedder};
//!
//! let client = OpenAIClient::from_env()?;
//! let embedder = OpenAIEmbedder::new(client.clone(), "text-embedding-ada-002");
//! let completer = OpenAICompleter::new(client, CompletionConfig::default());
//! ```

use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient};
use tracing::debug;

use crate::error::{AiError, AiResult};
use crate::traits::ai::{Completer, Embedder};
use crate::types::config::CompletionConfig;

/// Embeddings from the OpenAI embeddings endpoint.
#[derive(Clone)]
pub struct OpenAIEmbedder {
    client: OpenAIClient,
    model: String,
}

impl OpenAIEmbedder {
    /// Create an embedder using `model`.
    pub fn new(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Get the embedding model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Embedder for OpenAIEmbedder {
    async fn embed(&self, text: &str) -> AiResult<Vec<f32>> {
        Ok(self.client.create_embedding(text, &self.model).await?)
    }

    async fn embed_batch(&self, texts: &[&str]) -> AiResult<Vec<Vec<f32>>> {
        debug!(model = %self.model, count = texts.len(), "Embedding batch");
        let vectors = self.client.create_embeddings(texts, &self.model).await?;

        if vectors.len() != texts.len() {
            return Err(AiError::CountMismatch {
                expected: texts.len(),
                actual: vectors.len(),
            });
        }
        Ok(vectors)
    }
}

/// Completions from the OpenAI chat endpoint.
///
/// The prompt is sent as a single user message with the configured
/// sampling settings.
#[derive(Clone)]
pub struct OpenAICompleter {
    client: OpenAIClient,
    config: CompletionConfig,
}

impl OpenAICompleter {
    /// Create a completer with the given sampling settings.
    pub fn new(client: OpenAIClient, config: CompletionConfig) -> Self {
        Self { client, config }
    }

    /// Get the completion settings.
    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    fn request(&self, prompt: &str) -> ChatRequest {
        ChatRequest::new(self.config.model.clone())
            .message(Message::user(prompt))
            .temperature(self.config.temperature)
            .top_p(self.config.top_p)
            .max_tokens(self.config.max_tokens)
    }
}

#[async_trait]
impl Completer for OpenAICompleter {
    async fn complete(&self, prompt: &str) -> AiResult<String> {
        let response = self.client.chat_completion(self.request(prompt)).await?;
        response.content.ok_or(AiError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[test]
    fn test_request_uses_completion_config() {
        let completer = OpenAICompleter::new(
            OpenAIClient::new("sk-test"),
            CompletionConfig::default().with_max_tokens(256),
        );
        let request = completer.request("prompt text");

        assert_eq!(request.model, "gpt-4");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "user");
        assert_eq!(request.messages[0].content, "prompt text");
        assert_eq!(request.temperature, Some(0.0));
        assert_eq!(request.top_p, Some(1.0));
        assert_eq!(request.max_tokens, Some(256));
    }

    #[tokio::test]
    async fn test_missing_content_is_empty_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":null}}]}"#)
            .create_async()
            .await;

        let client = OpenAIClient::new("sk-test").with_base_url(server.url());
        let completer = OpenAICompleter::new(client, CompletionConfig::default());

        let result = completer.complete("q").await;
        assert!(matches!(result, Err(AiError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_embed_batch_sends_one_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/embeddings")
            .match_body(Matcher::PartialJsonString(
                r#"{"input":["great tacos","slow service"]}"#.to_string(),
            ))
            .with_status(200)
            .with_body(
                r#"{"data":[{"index":0,"embedding":[1.0,0.0]},{"index":1,"embedding":[0.0,1.0]}]}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let client = OpenAIClient::new("sk-test").with_base_url(server.url());
        let embedder = OpenAIEmbedder::new(client, "text-embedding-ada-002");

        let vectors = embedder
            .embed_batch(&["great tacos", "slow service"])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(vectors.len(), 2);
    }

    #[tokio::test]
    async fn test_api_failure_maps_to_ai_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/embeddings")
            .with_status(500)
            .create_async()
            .await;

        let client = OpenAIClient::new("sk-test").with_base_url(server.url());
        let embedder = OpenAIEmbedder::new(client, "text-embedding-ada-002");

        assert!(matches!(embedder.embed("x").await, Err(AiError::Api(_))));
    }
}
