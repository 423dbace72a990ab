//! Page count inference
//!
//! Listing pages are addressed by card offset (`?page=16`, `?page=32`, ...),
//! not by ordinal, and the pagination bar only links a few nearby pages. The
//! total is therefore derived from the largest offset linked anywhere in the
//! bar: `max_offset / page_size + 1`.

use crate::crawler::coordinator::Coordinator;
use crate::crawler::report::CrawlReporter;
use crate::crawler::retry::Sleeper;
use crate::crawler::selectors::ListingSelectors;
use crate::url::CrawlTarget;
use scraper::Html;

/// Parses the offset in a pagination href
///
/// Takes everything after the last `page=` and reads it as a non-negative
/// integer. Returns `None` when there is no `page=`, the remainder is not a
/// number, or it is negative.
pub fn page_offset(href: &str) -> Option<u64> {
    let (_, value) = href.rsplit_once("page=")?;
    value.trim().parse().ok()
}

/// Finds the largest page offset linked from the pagination container
///
/// # Returns
///
/// * `None` - The page has no pagination container
/// * `Some(0)` - A container exists but links no parseable offsets
/// * `Some(n)` - The largest offset found
pub fn max_page_offset(html: &str, selectors: &ListingSelectors) -> Option<u64> {
    let document = Html::parse_document(html);
    let container = document.select(&selectors.pagination).next()?;

    let max = container
        .select(&selectors.anchor)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter_map(page_offset)
        .max()
        .unwrap_or(0);

    Some(max)
}

/// Number of listing pages implied by the largest offset
pub fn page_count(max_offset: u64, page_size: u32) -> usize {
    (max_offset / u64::from(page_size.max(1))) as usize + 1
}

impl<S: Sleeper, R: CrawlReporter> Coordinator<S, R> {
    /// Determines how many listing pages the store has
    ///
    /// Fetches the first page once. Any fetch failure or a missing pagination
    /// container yields 1 page so the crawl can still proceed.
    pub async fn resolve_total_pages(&self, target: &CrawlTarget) -> usize {
        let url = target.as_str();
        let body = match self.fetcher.fetch(url).await.into_body(url) {
            Ok(body) => body,
            Err(e) => {
                self.reporter
                    .pagination_fallback(url, &format!("Failed to fetch the page ({})", e));
                return 1;
            }
        };

        let total_pages = match max_page_offset(&body, &self.selectors) {
            Some(max_offset) => page_count(max_offset, self.page_size),
            None => {
                self.reporter.pagination_fallback(url, "No pagination found");
                1
            }
        };

        self.reporter.pages_resolved(total_pages);
        total_pages
    }
}
