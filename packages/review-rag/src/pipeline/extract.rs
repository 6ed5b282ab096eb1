//! Review extraction from fetched HTML.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};
use crate::types::{config::ReviewSelectors, review::Review};

/// Pulls review texts out of a review-feed page.
///
/// Selectors are parsed once at construction. A page without the reviews
/// container is an error; items without a text span, or whose text is
/// blank, are skipped.
#[derive(Debug)]
pub struct ReviewExtractor {
    container: Selector,
    item: Selector,
    text: Selector,
    container_css: String,
}

impl ReviewExtractor {
    /// Create an extractor from CSS selectors.
    pub fn new(selectors: &ReviewSelectors) -> ExtractResult<Self> {
        Ok(Self {
            container: parse_selector(&selectors.container)?,
            item: parse_selector(&selectors.item)?,
            text: parse_selector(&selectors.text)?,
            container_css: selectors.container.clone(),
        })
    }

    /// Extract reviews from page content, in document order.
    ///
    /// Only the first matching container is read.
    pub fn extract_reviews(&self, content: &str) -> ExtractResult<Vec<Review>> {
        let document = Html::parse_document(content);

        let container = document.select(&self.container).next().ok_or_else(|| {
            ExtractError::MissingContainer {
                selector: self.container_css.clone(),
            }
        })?;

        let mut items = 0usize;
        let reviews: Vec<Review> = container
            .select(&self.item)
            .inspect(|_| items += 1)
            .filter_map(|item| self.extract_item(item))
            .collect();

        if reviews.len() < items {
            debug!(
                items,
                extracted = reviews.len(),
                "Skipped review items without text"
            );
        }

        Ok(reviews)
    }

    fn extract_item(&self, item: ElementRef<'_>) -> Option<Review> {
        let span = item.select(&self.text).next()?;
        Review::new(span.text().collect::<String>())
    }
}

fn parse_selector(css: &str) -> ExtractResult<Selector> {
    Selector::parse(css).map_err(|e| ExtractError::InvalidSelector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}
