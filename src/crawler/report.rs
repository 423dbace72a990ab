//! Progress reporting for a crawl
//!
//! Components never print directly; they report through a [`CrawlReporter`]
//! handed to the coordinator. [`TracingReporter`] turns events into `tracing`
//! output for the terminal.

use crate::crawler::extractor::CardError;
use crate::model::ProductRecord;
use crate::ScrapeError;

/// Receives crawl progress events
///
/// Every method has an empty default so implementors only override what they need.
pub trait CrawlReporter {
    fn pages_resolved(&self, _total_pages: usize) {}

    fn pagination_fallback(&self, _url: &str, _reason: &str) {}

    fn page_started(&self, _page: usize, _total_pages: usize, _url: &str) {}

    fn page_failed(&self, _url: &str, _error: &ScrapeError) {}

    fn product_scraped(&self, _index: usize, _total_cards: usize, _record: &ProductRecord) {}

    fn card_skipped(&self, _index: usize, _error: &CardError) {}

    fn description_attempt_failed(
        &self,
        _url: &str,
        _attempt: u32,
        _max_attempts: u32,
        _error: &ScrapeError,
    ) {
    }
}

/// Reports progress through `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl CrawlReporter for TracingReporter {
    fn pages_resolved(&self, total_pages: usize) {
        tracing::info!("Total pages identified: {}", total_pages);
    }

    fn pagination_fallback(&self, url: &str, reason: &str) {
        tracing::warn!("{} for {}. Assuming only 1 page.", reason, url);
    }

    fn page_started(&self, page: usize, total_pages: usize, url: &str) {
        tracing::info!("Scraping page {}/{}: {}", page, total_pages, url);
    }

    fn page_failed(&self, url: &str, error: &ScrapeError) {
        tracing::error!("Failed to fetch page {}: {}", url, error);
    }

    fn product_scraped(&self, index: usize, total_cards: usize, record: &ProductRecord) {
        let progress = index as f64 / total_cards.max(1) as f64 * 100.0;
        tracing::info!("[{:.2}%] Scraped: {}", progress, record.title);
        tracing::debug!(
            "    Description: {}...",
            record.description.chars().take(50).collect::<String>()
        );
        tracing::debug!("    Link: {}", record.link);
    }

    fn card_skipped(&self, index: usize, error: &CardError) {
        tracing::error!("Error scraping product {}: {}", index, error);
    }

    fn description_attempt_failed(
        &self,
        url: &str,
        attempt: u32,
        max_attempts: u32,
        error: &ScrapeError,
    ) {
        tracing::warn!(
            "Error fetching product description from {} (Attempt {}/{}): {}",
            url,
            attempt,
            max_attempts,
            error
        );
    }
}
