//! Source URL normalization and page addressing.

use url::Url;

use crate::error::{FetchError, FetchResult, RagError, Result};

/// Query parameter carrying the review offset.
pub const PAGE_OFFSET_PARAM: &str = "start";

/// Remove the query string (and fragment) from a URL.
///
/// Works on the raw string so it never fails; `https://x/biz/y?osq=z`
/// becomes `https://x/biz/y`.
pub fn clean_url(url: &str) -> &str {
    let end = url.find(|c| c == '?' || c == '#').unwrap_or(url.len());
    &url[..end]
}

/// Turn a user-supplied business URL into the base URL for paging.
///
/// Strips any query string, then adds `sort_by` when given. Rejects
/// anything that is not an absolute http(s) URL with a host.
pub fn normalize_source_url(raw: &str, sort_by: Option<&str>) -> Result<String> {
    let invalid = || RagError::InvalidUrl {
        url: raw.to_string(),
    };

    let mut url = Url::parse(clean_url(raw.trim())).map_err(|_| invalid())?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }

    url.set_query(None);
    url.set_fragment(None);

    if let Some(sort_by) = sort_by {
        url.query_pairs_mut().append_pair("sort_by", sort_by);
    }

    Ok(url.into())
}

/// Address of page `page_index` of the feed at `base_url`.
///
/// Appends `start=page_index * page_size`, keeping any existing query
/// parameters, so page 0 is `start=0`, page 1 is `start=10`, and so on.
pub fn page_url(base_url: &str, page_index: usize, page_size: usize) -> FetchResult<String> {
    let invalid = || FetchError::InvalidUrl {
        url: base_url.to_string(),
    };

    let offset = page_index.checked_mul(page_size).ok_or_else(invalid)?;
    let mut url = Url::parse(base_url).map_err(|_| invalid())?;
    url.query_pairs_mut()
        .append_pair(PAGE_OFFSET_PARAM, &offset.to_string());

    Ok(url.into())
}
