//! Testing utilities including mock implementations.
//!
//! These let applications exercise the pipeline without network access or
//! real model calls. Mocks are cheap to clone and share their state, so a
//! test can hand one to the pipeline and keep a handle for assertions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{AiError, AiResult, FetchError, FetchResult};
use crate::fetchers::paging::page_url;
use crate::traits::{
    ai::{Completer, Embedder},
    fetcher::PageFetcher,
};
use crate::types::{config::ReviewSelectors, page::FetchedPage};

/// A mock fetcher serving scripted pages by index.
///
/// Pages without a script answer with HTTP 404.
#[derive(Clone, Default)]
pub struct MockFetcher {
    /// Page bodies by index
    pages: Arc<RwLock<HashMap<usize, String>>>,

    /// Failing statuses by index
    statuses: Arc<RwLock<HashMap<usize, u16>>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<FetchCall>>>,
}

/// Record of a call made to the mock fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCall {
    pub base_url: String,
    pub page_index: usize,
    pub page_size: usize,
    /// Page address, empty when it could not be built
    pub url: String,
}

impl MockFetcher {
    /// Create a mock fetcher with no pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for page `page_index`.
    pub fn with_page(self, page_index: usize, body: impl Into<String>) -> Self {
        self.pages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(page_index, body.into());
        self
    }

    /// Answer page `page_index` with a non-success status.
    pub fn with_status(self, page_index: usize, status: u16) -> Self {
        self.statuses
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(page_index, status);
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<FetchCall> {
        self.calls
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch_page(
        &self,
        base_url: &str,
        page_index: usize,
        page_size: usize,
    ) -> FetchResult<FetchedPage> {
        let url = page_url(base_url, page_index, page_size);

        self.calls
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(FetchCall {
                base_url: base_url.to_string(),
                page_index,
                page_size,
                url: url.as_deref().unwrap_or_default().to_string(),
            });

        let url = url?;

        let status = self
            .statuses
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&page_index)
            .copied();
        if let Some(status) = status {
            return Err(FetchError::Status { url, status });
        }

        let body = self
            .pages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&page_index)
            .cloned();
        match body {
            Some(body) => Ok(FetchedPage::new(url, page_index, body)),
            None => Err(FetchError::Status { url, status: 404 }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Render a review page the default selectors can read.
pub fn reviews_page(reviews: &[&str]) -> String {
    let selectors = ReviewSelectors::default();
    let container_id = selectors.container.trim_start_matches("div#");
    let item_class = selectors.item.trim_start_matches("li.");
    let text_class = selectors.text.trim_start_matches("span.");

    let items: String = reviews
        .iter()
        .map(|text| {
            format!(
                r#"<li class="{item_class}"><div><p><span class="{text_class}">{text}</span></p></div></li>"#
            )
        })
        .collect();

    format!(
        r#"<html><body><main><div id="{container_id}"><ul>{items}</ul></div></main></body></html>"#
    )
}

/// A mock embedder with deterministic vectors.
///
/// Texts without a predefined embedding get a vector derived from their
/// SHA-256 hash, so repeated runs agree.
#[derive(Clone)]
pub struct MockEmbedder {
    /// Predefined embeddings by text
    embeddings: Arc<RwLock<HashMap<String, Vec<f32>>>>,

    /// Dimension of generated embeddings
    embedding_dim: usize,

    /// Fail every call
    fail: bool,

    /// Texts embedded, in call order
    calls: Arc<RwLock<Vec<String>>>,
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEmbedder {
    /// Create a mock embedder producing 64-dimension vectors.
    pub fn new() -> Self {
        Self {
            embeddings: Arc::default(),
            embedding_dim: 64,
            fail: false,
            calls: Arc::default(),
        }
    }

    /// Set the generated embedding dimension.
    pub fn with_embedding_dim(mut self, dim: usize) -> Self {
        self.embedding_dim = dim;
        self
    }

    /// Add a predefined embedding for text.
    pub fn with_embedding(self, text: impl Into<String>, embedding: Vec<f32>) -> Self {
        self.embeddings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(text.into(), embedding);
        self
    }

    /// Make every call fail.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Get every text passed to this mock.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Generate a deterministic embedding based on text.
    fn generate_deterministic_embedding(&self, text: &str) -> Vec<f32> {
        use sha2::{Digest, Sha256};

        let hash = Sha256::digest(text.as_bytes());

        (0..self.embedding_dim)
            .map(|i| {
                let byte = hash[i % 32] as f32;
                (byte / 127.5) - 1.0
            })
            .collect()
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> AiResult<Vec<f32>> {
        self.calls
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());

        if self.fail {
            return Err(AiError::Network("mock embedder unavailable".into()));
        }

        let predefined = self
            .embeddings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(text)
            .cloned();
        Ok(predefined.unwrap_or_else(|| self.generate_deterministic_embedding(text)))
    }
}

/// A mock completer returning a fixed answer.
#[derive(Clone)]
pub struct MockCompleter {
    response: String,
    fail: bool,
    prompts: Arc<RwLock<Vec<String>>>,
}

impl Default for MockCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCompleter {
    /// Create a mock completer with a canned answer.
    pub fn new() -> Self {
        Self {
            response: "Mock answer".to_string(),
            fail: false,
            prompts: Arc::default(),
        }
    }

    /// Set the answer returned for every prompt.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = response.into();
        self
    }

    /// Make every call fail.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Get every prompt passed to this mock.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Completer for MockCompleter {
    async fn complete(&self, prompt: &str) -> AiResult<String> {
        self.prompts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());

        if self.fail {
            return Err(AiError::Api("mock completer unavailable".into()));
        }

        Ok(self.response.clone())
    }
}
