//! HTTP page fetcher.
//!
//! Fetches one page of a review feed with reqwest. Pages are attempted
//! exactly once; a non-success status is logged and returned as
//! [`FetchError::Status`] for the corpus builder to skip.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult, RagError, Result};
use crate::fetchers::paging::page_url;
use crate::traits::fetcher::PageFetcher;
use crate::types::page::FetchedPage;

/// Browser-like User-Agent; review sites serve bot agents a stripped page.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const MAX_REDIRECTS: usize = 5;

/// Review page fetcher backed by reqwest.
///
/// # Example
///
/// ```rust,ignore
/// let fetcher = HttpPageFetcher::new()?;
/// let page = fetcher.fetch_page("https://example.com/biz/x?sort_by=date_desc", 2, 10).await?;
/// assert!(page.url.ends_with("start=20"));
/// ```
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    /// Create a fetcher with browser-like headers.
    ///
    /// No request timeout is set beyond the transport's own defaults.
    pub fn new() -> Result<Self> {
        Self::build_client(None).map(Self::with_client)
    }

    /// Create a fetcher whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Self::build_client(Some(timeout)).map(Self::with_client)
    }

    /// Create a fetcher around an existing HTTP client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS));

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        builder
            .build()
            .map_err(|e| RagError::Config(format!("failed to create HTTP client: {}", e)))
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(
        &self,
        base_url: &str,
        page_index: usize,
        page_size: usize,
    ) -> FetchResult<FetchedPage> {
        let url = page_url(base_url, page_index, page_size)?;
        debug!(url = %url, page_index, "Retrieving reviews page");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Review page request failed");
            FetchError::Http {
                url: url.clone(),
                source: Box::new(e),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                url = %url,
                status = status.as_u16(),
                "Failed to retrieve review page"
            );
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let content = response.text().await.map_err(|e| FetchError::Http {
            url: url.clone(),
            source: Box::new(e),
        })?;

        debug!(url = %url, content_length = content.len(), "Review page fetched");

        Ok(FetchedPage::new(url, page_index, content))
    }

    fn name(&self) -> &str {
        "http"
    }
}
