//! Review, corpus and retrieval types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single extracted review.
///
/// Holds trimmed, non-empty text. Reviews have no identity beyond their
/// content; identical reviews from different pages are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Review(String);

impl Review {
    /// Create a review from raw text.
    ///
    /// Returns `None` when the text is empty after trimming.
    pub fn new(text: impl AsRef<str>) -> Option<Self> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Get the review text.
    pub fn text(&self) -> &str {
        &self.0
    }

    /// Consume the review and return its text.
    pub fn into_text(self) -> String {
        self.0
    }
}

impl fmt::Display for Review {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What happened to one page during a corpus build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PageOutcome {
    /// Page fetched and parsed
    Fetched { page_index: usize, reviews: usize },

    /// Page fetch returned an error or non-success status
    FetchFailed { page_index: usize, reason: String },

    /// Page fetched but had no reviews container
    MissingContainer { page_index: usize },
}

impl PageOutcome {
    /// Page index this outcome belongs to.
    pub fn page_index(&self) -> usize {
        match self {
            Self::Fetched { page_index, .. }
            | Self::FetchFailed { page_index, .. }
            | Self::MissingContainer { page_index } => *page_index,
        }
    }

    /// Whether the page contributed nothing because of a failure.
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::Fetched { .. })
    }
}

/// The ordered reviews gathered for one request.
///
/// Order is page order, then document order within a page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Corpus {
    reviews: Vec<Review>,
    pages: Vec<PageOutcome>,
}

impl Corpus {
    /// Create an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus directly from reviews (no page diagnostics).
    pub fn from_reviews(reviews: impl IntoIterator<Item = Review>) -> Self {
        Self {
            reviews: reviews.into_iter().collect(),
            pages: Vec::new(),
        }
    }

    /// Append the reviews of one page and record its outcome.
    pub(crate) fn push_page(&mut self, outcome: PageOutcome, reviews: Vec<Review>) {
        self.reviews.extend(reviews);
        self.pages.push(outcome);
    }

    /// Reviews in corpus order.
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Per-page outcomes in page order.
    pub fn pages(&self) -> &[PageOutcome] {
        &self.pages
    }

    /// Number of reviews.
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    /// Check if no reviews were collected.
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Number of pages attempted.
    pub fn pages_attempted(&self) -> usize {
        self.pages.len()
    }

    /// Number of pages that contributed nothing because of a failure.
    pub fn pages_failed(&self) -> usize {
        self.pages.iter().filter(|p| p.is_failure()).count()
    }

    /// Iterate over review texts in corpus order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.reviews.iter().map(Review::text)
    }
}

/// Review texts returned by a similarity query, most similar first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RetrievalResult {
    texts: Vec<String>,
}

impl RetrievalResult {
    /// Create a retrieval result from ranked texts.
    pub fn new(texts: Vec<String>) -> Self {
        Self { texts }
    }

    /// Ranked texts.
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// Number of texts.
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Check if nothing was retrieved.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Consume and return the ranked texts.
    pub fn into_texts(self) -> Vec<String> {
        self.texts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_trims_and_rejects_blank() {
        assert_eq!(Review::new("  Great tacos \n").unwrap().text(), "Great tacos");
        assert!(Review::new("   \n\t").is_none());
        assert!(Review::new("").is_none());
    }

    #[test]
    fn test_corpus_keeps_page_order_and_counts_failures() {
        let mut corpus = Corpus::new();
        corpus.push_page(
            PageOutcome::Fetched {
                page_index: 0,
                reviews: 2,
            },
            vec![Review::new("a").unwrap(), Review::new("b").unwrap()],
        );
        corpus.push_page(
            PageOutcome::FetchFailed {
                page_index: 1,
                reason: "HTTP 503".to_string(),
            },
            Vec::new(),
        );
        corpus.push_page(
            PageOutcome::Fetched {
                page_index: 2,
                reviews: 1,
            },
            vec![Review::new("a").unwrap()],
        );

        assert_eq!(corpus.texts().collect::<Vec<_>>(), vec!["a", "b", "a"]);
        assert_eq!(corpus.pages_attempted(), 3);
        assert_eq!(corpus.pages_failed(), 1);
        assert_eq!(corpus.pages()[1].page_index(), 1);
    }
}
