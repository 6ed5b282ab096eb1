//! Configuration types for scraping, retrieval and completion.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Reviews per page on the source feed.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Sort order requested from the source feed.
pub const DEFAULT_SORT_BY: &str = "date_desc";

/// Configuration for the review RAG pipeline.
///
/// Built once at startup and handed to the corpus builder and retriever.
/// Use [`RagConfig::new`] or call [`RagConfig::validate`] after
/// deserializing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagConfig {
    /// Number of review pages to attempt per request.
    pub max_pages: usize,

    /// Maximum number of reviews handed to the language model (k).
    pub max_docs: usize,

    /// Reviews per page; the page offset is `page_index * page_size`.
    ///
    /// Default: 10.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Value of the `sort_by` query parameter added to the source URL.
    ///
    /// `None` leaves the source's own ordering. Default: `date_desc`.
    #[serde(default = "default_sort_by")]
    pub sort_by: Option<String>,

    /// Where reviews live in a fetched page.
    #[serde(default)]
    pub selectors: ReviewSelectors,

    /// Language model settings.
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Embedding model name.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_sort_by() -> Option<String> {
    Some(DEFAULT_SORT_BY.to_string())
}

fn default_embedding_model() -> String {
    "text-embedding-ada-002".to_string()
}

impl RagConfig {
    /// Create a validated config with default settings.
    pub fn new(max_pages: usize, max_docs: usize) -> Result<Self> {
        let config = Self {
            max_pages,
            max_docs,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: default_sort_by(),
            selectors: ReviewSelectors::default(),
            completion: CompletionConfig::default(),
            embedding_model: default_embedding_model(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that every count is positive.
    pub fn validate(&self) -> Result<()> {
        if self.max_pages == 0 {
            return Err(RagError::Config("max_pages must be at least 1".into()));
        }
        if self.max_docs == 0 {
            return Err(RagError::Config("max_docs must be at least 1".into()));
        }
        if self.page_size == 0 {
            return Err(RagError::Config("page_size must be at least 1".into()));
        }
        if self.completion.max_tokens == 0 {
            return Err(RagError::Config("max_tokens must be at least 1".into()));
        }
        Ok(())
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set or clear the sort order.
    pub fn with_sort_by(mut self, sort_by: Option<String>) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Set the review selectors.
    pub fn with_selectors(mut self, selectors: ReviewSelectors) -> Self {
        self.selectors = selectors;
        self
    }

    /// Set the completion settings.
    pub fn with_completion(mut self, completion: CompletionConfig) -> Self {
        self.completion = completion;
        self
    }

    /// Set the embedding model.
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }
}

/// CSS selectors locating reviews in a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSelectors {
    /// The single element holding every review on the page
    pub container: String,

    /// One review item within the container
    pub item: String,

    /// The text span within an item
    pub text: String,
}

impl Default for ReviewSelectors {
    fn default() -> Self {
        Self {
            container: "div#reviews".to_string(),
            item: "li.css-1q2nwpv".to_string(),
            text: "span.raw__09f24__T4Ezm".to_string(),
        }
    }
}

impl ReviewSelectors {
    /// Create selectors from explicit CSS strings.
    pub fn new(
        container: impl Into<String>,
        item: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            container: container.into(),
            item: item.into(),
            text: text.into(),
        }
    }
}

/// Settings for the completion call.
///
/// Defaults give deterministic output: temperature 0, top_p 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Chat model name
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Nucleus sampling parameter
    pub top_p: f32,

    /// Maximum tokens in the completion
    pub max_tokens: u32,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            temperature: 0.0,
            top_p: 1.0,
            max_tokens: 1024,
        }
    }
}

impl CompletionConfig {
    /// Set the chat model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the maximum completion length.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}
