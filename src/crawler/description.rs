//! Product description fetching
//!
//! Detail pages are the most frequent requests of a crawl (one per product),
//! so this is the one place that retries.

use crate::crawler::coordinator::Coordinator;
use crate::crawler::report::CrawlReporter;
use crate::crawler::retry::Sleeper;
use crate::model::{NO_DESCRIPTION, NO_LINK};
use scraper::{Html, Selector};

/// Extracts the description text from a detail page
///
/// Text nodes inside the container are trimmed and concatenated. Returns the
/// `No description` sentinel when the container is absent.
pub fn extract_description(html: &str, selector: &Selector) -> String {
    let document = Html::parse_document(html);

    match document.select(selector).next() {
        Some(container) => container
            .text()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect(),
        None => NO_DESCRIPTION.to_string(),
    }
}

impl<S: Sleeper, R: CrawlReporter> Coordinator<S, R> {
    /// Fetches the description of the product at `url`
    ///
    /// Failed attempts (non-success status or network error) are reported and
    /// retried after the policy's fixed interval. Once the budget is spent the
    /// sentinel is returned instead of an error. A `#` link is never fetched.
    pub async fn fetch_description(&self, url: &str) -> String {
        if url == NO_LINK {
            return NO_DESCRIPTION.to_string();
        }

        let max_attempts = self.retry.max_attempts;
        let result = self
            .retry
            .run(
                &self.sleeper,
                |_| async move { self.fetcher.fetch(url).await.into_body(url) },
                |attempt, e| {
                    self.reporter
                        .description_attempt_failed(url, attempt, max_attempts, e)
                },
            )
            .await;

        match result {
            Ok(body) => extract_description(&body, &self.selectors.description),
            Err(_) => NO_DESCRIPTION.to_string(),
        }
    }
}
