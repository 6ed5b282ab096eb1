//! Fetched page type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One page of raw review-feed content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedPage {
    /// Address the page was requested from (including the offset)
    pub url: String,

    /// Zero-based page index
    pub page_index: usize,

    /// Raw HTML body
    pub content: String,

    /// When the content was fetched
    pub fetched_at: DateTime<Utc>,
}

impl FetchedPage {
    /// Create a new fetched page.
    pub fn new(url: impl Into<String>, page_index: usize, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            page_index,
            content: content.into(),
            fetched_at: Utc::now(),
        }
    }
}
