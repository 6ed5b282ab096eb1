//! Review RAG pipeline.
//!
//! The pipeline runs, per question:
//! - Corpus building (fetch every page, extract reviews)
//! - Semantic indexing (embed the whole corpus)
//! - Retrieval (top-k reviews for the question)
//! - Synthesis (prompt the language model)
//!
//! Nothing is cached between questions.

pub mod corpus;
pub mod extract;
pub mod index;
pub mod prompts;
pub mod synthesize;

pub use corpus::CorpusBuilder;
pub use extract::ReviewExtractor;
pub use index::{cosine_similarity, IndexedVector, Retriever, SemanticIndex};
pub use prompts::{format_answer_prompt, format_context, ANSWER_PROMPT};
pub use synthesize::AnswerSynthesizer;

use tracing::{info, warn};

use crate::error::{RagError, Result};
use crate::fetchers::paging::normalize_source_url;
use crate::traits::{
    ai::{Completer, Embedder},
    fetcher::PageFetcher,
};
use crate::types::{
    config::RagConfig,
    request::{Answer, AskRequest},
};

/// Answers questions about a business from its review feed.
///
/// # Example
///
/// ```rust,ignore
/// let config = RagConfig::new(5, 20)?;
/// let qa = ReviewQa::new(HttpPageFetcher::new()?, embedder, completer, config)?;
///
/// let answer = qa
///     .answer(&AskRequest::new("https://www.yelp.com/biz/some-place", "What should I order?"))
///     .await?;
/// println!("{}", answer.text);
/// ```
pub struct ReviewQa<F: PageFetcher, E: Embedder, C: Completer> {
    corpus_builder: CorpusBuilder<F>,
    embedder: E,
    synthesizer: AnswerSynthesizer<C>,
    config: RagConfig,
}

impl<F: PageFetcher, E: Embedder, C: Completer> ReviewQa<F, E, C> {
    /// Create the pipeline, validating the config and review selectors.
    pub fn new(fetcher: F, embedder: E, completer: C, config: RagConfig) -> Result<Self> {
        config.validate()?;
        let extractor = ReviewExtractor::new(&config.selectors)?;

        Ok(Self {
            corpus_builder: CorpusBuilder::new(fetcher, extractor, &config),
            embedder,
            synthesizer: AnswerSynthesizer::new(completer),
            config,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Answer one question.
    ///
    /// Blank fields fail before anything is fetched. An empty corpus is
    /// [`RagError::EmptyCorpus`]; embedding and completion failures are
    /// [`RagError::Indexing`] and [`RagError::Synthesis`].
    pub async fn answer(&self, request: &AskRequest) -> Result<Answer> {
        let request = request.validated()?;
        let base_url = normalize_source_url(request.source_url, self.config.sort_by.as_deref())?;

        info!(
            source_url = %base_url,
            question = %request.question,
            max_pages = self.config.max_pages,
            "Answering question from reviews"
        );

        let corpus = self.corpus_builder.build_corpus(&base_url).await;
        if corpus.is_empty() {
            warn!(
                source_url = %base_url,
                pages_attempted = corpus.pages_attempted(),
                pages_failed = corpus.pages_failed(),
                "No reviews collected"
            );
            return Err(RagError::EmptyCorpus { url: base_url });
        }

        let index = SemanticIndex::build(&self.embedder, &corpus).await?;
        let retriever = Retriever::new(index, self.config.max_docs);
        let retrieved = retriever.retrieve(request.question).await?;

        let text = self
            .synthesizer
            .synthesize(request.question, &retrieved)
            .await?;

        Ok(Answer {
            text,
            corpus_size: corpus.len(),
            retrieved: retrieved.len(),
        })
    }
}
