//! Corpus building - fetch and extract every review page in order.

use tracing::{debug, info, warn};

use crate::pipeline::extract::ReviewExtractor;
use crate::traits::fetcher::PageFetcher;
use crate::types::{
    config::RagConfig,
    review::{Corpus, PageOutcome},
};

/// Gathers reviews across the pages of one feed.
///
/// Pages `0..max_pages` are attempted one at a time, each exactly once.
/// Fetch failures and pages without a reviews container are logged and
/// contribute nothing; they never stop later pages.
pub struct CorpusBuilder<F: PageFetcher> {
    fetcher: F,
    extractor: ReviewExtractor,
    max_pages: usize,
    page_size: usize,
}

impl<F: PageFetcher> CorpusBuilder<F> {
    /// Create a corpus builder from a fetcher, an extractor and the config.
    pub fn new(fetcher: F, extractor: ReviewExtractor, config: &RagConfig) -> Self {
        Self {
            fetcher,
            extractor,
            max_pages: config.max_pages,
            page_size: config.page_size,
        }
    }

    /// Number of pages attempted per build.
    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    /// Reviews per page, used for page offsets.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Fetch and extract every page of the feed at `base_url`.
    ///
    /// An empty corpus is a valid result; deciding what that means is up
    /// to the caller.
    pub async fn build_corpus(&self, base_url: &str) -> Corpus {
        let mut corpus = Corpus::new();

        for page_index in 0..self.max_pages {
            let page = match self
                .fetcher
                .fetch_page(base_url, page_index, self.page_size)
                .await {
                Ok(page) => page,
                Err(e) => {
                    warn!(
                        base_url = %base_url,
                        page_index,
                        fetcher = self.fetcher.name(),
                        error = %e,
                        "Skipping review page"
                    );
                    corpus.push_page(
                        PageOutcome::FetchFailed {
                            page_index,
                            reason: e.to_string(),
                        },
                        Vec::new(),
                    );
                    continue;
                }
            };

            match self.extractor.extract_reviews(&page.content) {
                Ok(reviews) => {
                    debug!(url = %page.url, reviews = reviews.len(), "Extracted reviews");
                    corpus.push_page(
                        PageOutcome::Fetched {
                            page_index,
                            reviews: reviews.len(),
                        },
                        reviews,
                    );
                }
                Err(e) => {
                    warn!(url = %page.url, page_index, error = %e, "No reviews on page");
                    corpus.push_page(PageOutcome::MissingContainer { page_index }, Vec::new());
                }
            }
        }

        info!(
            base_url = %base_url,
            reviews = corpus.len(),
            pages_attempted = corpus.pages_attempted(),
            pages_failed = corpus.pages_failed(),
            "Retrieved reviews"
        );

        corpus
    }
}
