//! Review Question Answering
//!
//! Answers a natural-language question about a business by scraping its
//! paginated review feed, embedding every review, retrieving the ones most
//! similar to the question, and asking a language model to answer from
//! those reviews alone.
//!
//! Every question rebuilds its corpus and index from scratch; nothing is
//! persisted or shared between requests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use review_rag::{AskRequest, HttpPageFetcher, RagConfig, ReviewQa};
//! use review_rag::testing::{MockCompleter, MockEmbedder};
//!
//! let config = RagConfig::new(5, 20)?;
//! let qa = ReviewQa::new(HttpPageFetcher::new()?, MockEmbedder::new(), MockCompleter::new(), config)?;
//!
//! let answer = qa
//!     .answer(&AskRequest::new("https://www.yelp.com/biz/some-place", "Best dessert?"))
//!     .await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Capability seams (PageFetcher, Embedder, Completer)
//! - [`types`] - Requests, reviews, corpus and configuration
//! - [`fetchers`] - HTTP page fetcher and page addressing
//! - [`pipeline`] - Corpus building, indexing, retrieval and synthesis
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod fetchers;
pub mod pipeline;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "openai")]
pub mod ai;

// Re-export core types at crate root
pub use error::{AiError, ExtractError, FetchError, RagError, Result};
pub use fetchers::HttpPageFetcher;
pub use pipeline::{
    AnswerSynthesizer, CorpusBuilder, Retriever, ReviewExtractor, ReviewQa, SemanticIndex,
};
pub use traits::{
    ai::{Completer, Embedder},
    fetcher::PageFetcher,
};
pub use types::{
    config::{CompletionConfig, RagConfig, ReviewSelectors},
    page::FetchedPage,
    request::{Answer, AskRequest},
    review::{Corpus, PageOutcome, RetrievalResult, Review},
};
