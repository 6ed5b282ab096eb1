//! Page fetcher trait for paginated review feeds.

use async_trait::async_trait;

use crate::error::FetchResult;
use crate::types::page::FetchedPage;

/// Fetches one page of a paginated review feed.
///
/// Implementations compute the page address from `base_url`, `page_index`
/// and `page_size` (see [`page_url`](crate::fetchers::paging::page_url)),
/// attempt it once, and report a non-success status as an
/// error rather than retrying.
///
/// - `HttpPageFetcher` - reqwest-based fetcher
/// - `MockFetcher` - scripted pages for tests
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch page `page_index` (zero-based) of the feed at `base_url`,
    /// where each page holds `page_size` reviews.
    async fn fetch_page(
        &self,
        base_url: &str,
        page_index: usize,
        page_size: usize,
    ) -> FetchResult<FetchedPage>;

    /// Get the fetcher name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
