//! Embedding and completion capabilities.
//!
//! The semantic index depends only on [`Embedder`] and the answer
//! synthesizer only on [`Completer`], so providers can be swapped without
//! touching the pipeline.

use async_trait::async_trait;

use crate::error::AiResult;

/// Turns text into a fixed-dimension vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding for one text.
    async fn embed(&self, text: &str) -> AiResult<Vec<f32>>;

    /// Generate embeddings for multiple texts, in input order.
    ///
    /// Either every text is embedded or the call fails.
    async fn embed_batch(&self, texts: &[&str]) -> AiResult<Vec<Vec<f32>>> {
        // Default implementation calls embed sequentially
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }
}

/// Produces a text completion for a prompt.
#[async_trait]
pub trait Completer: Send + Sync {
    /// Complete the prompt and return the raw completion text.
    async fn complete(&self, prompt: &str) -> AiResult<String>;
}
