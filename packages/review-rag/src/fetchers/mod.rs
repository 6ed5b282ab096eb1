//! Page fetcher implementations.

pub mod http;
pub mod paging;

pub use http::HttpPageFetcher;
pub use paging::{clean_url, normalize_source_url, page_url};
