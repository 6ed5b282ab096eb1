use anyhow::{Context, Result};
use openai_client::OpenAIClient;
use review_rag::{
    ai::{OpenAICompleter, OpenAIEmbedder},
    HttpPageFetcher, RagConfig, ReviewQa,
};
use secrecy::ExposeSecret;

use crate::config::OpenAISettings;

/// The pipeline as deployed: reqwest page fetcher, OpenAI embeddings and chat.
pub type OpenAIReviewQa = ReviewQa<HttpPageFetcher, OpenAIEmbedder, OpenAICompleter>;

/// Wire the OpenAI-backed pipeline from settings and pipeline config.
pub fn build_review_qa(openai: &OpenAISettings, rag: RagConfig) -> Result<OpenAIReviewQa> {
    let mut client = OpenAIClient::new(openai.api_key.expose_secret());
    if let Some(base_url) = &openai.base_url {
        client = client.with_base_url(base_url.clone());
    }

    let fetcher = HttpPageFetcher::new().context("Failed to build page fetcher")?;
    let embedder = OpenAIEmbedder::new(client.clone(), rag.embedding_model.clone());
    let completer = OpenAICompleter::new(client, rag.completion.clone());

    ReviewQa::new(fetcher, embedder, completer, rag).context("Failed to build pipeline")
}
