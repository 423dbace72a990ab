//! Crawler module for listing and detail page processing
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching
//! - Page count inference from the pagination bar
//! - Product card field extraction
//! - Description fetching with bounded retry
//! - Overall crawl coordination

mod coordinator;
mod description;
mod extractor;
mod fetcher;
mod page;
mod pagination;
mod report;
mod retry;
mod selectors;

pub use coordinator::{Coordinator, CrawlOutput};
pub use description::extract_description;
pub use extractor::{extract_card, extract_cards, CardError, CardFields};
pub use fetcher::{build_http_client, FetchResult, HttpFetcher};
pub use page::PageOutcome;
pub use pagination::{max_page_offset, page_count, page_offset};
pub use report::{CrawlReporter, TracingReporter};
pub use retry::{RetryPolicy, Sleeper, TokioSleeper};
pub use selectors::ListingSelectors;

use crate::config::Config;
use crate::url::CrawlTarget;
use crate::ScrapeError;
use std::time::Duration;

/// Validated operator settings for one crawl
///
/// Built from the command line or the interactive prompts before the crawl
/// starts; the crawler never asks for input itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    /// The store collection to crawl
    pub target: CrawlTarget,

    /// Pause after each product card
    pub delay: Duration,
}

/// Runs a complete crawl with the default sleeper and reporter
///
/// This is the main entry point for a crawl. It will:
/// 1. Build the HTTP client and selectors from `config`
/// 2. Resolve the number of listing pages
/// 3. Scrape every page in order, fetching each product's description
///
/// # Arguments
///
/// * `config` - The scraper configuration
/// * `settings` - The validated target and per-product delay
///
/// # Returns
///
/// * `Ok(CrawlOutput)` - Records and statistics (possibly empty)
/// * `Err(ScrapeError)` - The coordinator could not be built
pub async fn crawl(config: &Config, settings: &RunSettings) -> Result<CrawlOutput, ScrapeError> {
    let coordinator = Coordinator::new(config, settings.delay)?;
    Ok(coordinator.run(&settings.target).await)
}
