//! Crawler coordinator - main crawl orchestration logic
//!
//! This module drives a crawl from a validated target:
//! - Resolving the number of listing pages once
//! - Deriving each page URL from its card offset
//! - Scraping pages in order and concatenating their records
//! - Tallying statistics for the final summary

use crate::config::Config;
use crate::crawler::fetcher::HttpFetcher;
use crate::crawler::page::PageOutcome;
use crate::crawler::report::{CrawlReporter, TracingReporter};
use crate::crawler::retry::{RetryPolicy, Sleeper, TokioSleeper};
use crate::crawler::selectors::ListingSelectors;
use crate::model::ResultSet;
use crate::output::CrawlStats;
use crate::url::CrawlTarget;
use crate::ScrapeError;
use std::time::Duration;

/// Everything a finished crawl produced
#[derive(Debug, Clone, Default)]
pub struct CrawlOutput {
    /// Records in page order, then card order
    pub records: ResultSet,
    pub stats: CrawlStats,
}

/// Main crawler coordinator structure
///
/// Owns the HTTP fetcher and every setting the components need. The sleeper
/// and reporter are injected so tests can observe pacing and progress without
/// real delays or terminal output.
pub struct Coordinator<S = TokioSleeper, R = TracingReporter> {
    pub(crate) fetcher: HttpFetcher,
    pub(crate) selectors: ListingSelectors,
    pub(crate) origin: String,
    pub(crate) page_size: u32,
    pub(crate) delay: Duration,
    pub(crate) retry: RetryPolicy,
    pub(crate) sleeper: S,
    pub(crate) reporter: R,
}

impl Coordinator {
    /// Creates a coordinator that sleeps on tokio's timer and reports through `tracing`
    ///
    /// # Arguments
    ///
    /// * `config` - The scraper configuration
    /// * `delay` - Pause after each product card
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ScrapeError)` - Invalid selectors or HTTP client setup failure
    pub fn new(config: &Config, delay: Duration) -> Result<Self, ScrapeError> {
        Self::with_parts(config, delay, TokioSleeper, TracingReporter)
    }
}

impl<S: Sleeper, R: CrawlReporter> Coordinator<S, R> {
    /// Creates a coordinator with a custom sleeper and reporter
    pub fn with_parts(
        config: &Config,
        delay: Duration,
        sleeper: S,
        reporter: R,
    ) -> Result<Self, ScrapeError> {
        let selectors = ListingSelectors::from_config(&config.selectors)?;
        let fetcher = HttpFetcher::from_config(&config.user_agent, &config.crawler)?;
        let retry = RetryPolicy::new(
            config.crawler.description_attempts,
            config.crawler.retry_interval(),
        );

        Ok(Self {
            fetcher,
            selectors,
            origin: config.site.origin.trim_end_matches('/').to_string(),
            page_size: config.site.page_size.max(1),
            delay,
            retry,
            sleeper,
            reporter,
        })
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Lists the listing page URLs a crawl of `target` would visit
    pub async fn plan_pages(&self, target: &CrawlTarget) -> Vec<String> {
        let total_pages = self.resolve_total_pages(target).await;
        (0..total_pages)
            .map(|page| target.page_url(self.page_offset(page)))
            .collect()
    }

    /// Runs a complete crawl
    ///
    /// Page fetch failures and skipped cards are reflected in the returned
    /// statistics; nothing here aborts the crawl.
    pub async fn run(&self, target: &CrawlTarget) -> CrawlOutput {
        let total_pages = self.resolve_total_pages(target).await;
        let mut stats = CrawlStats::new(total_pages);
        let mut records = ResultSet::new();

        for page in 0..total_pages {
            let url = target.page_url(self.page_offset(page));
            self.reporter.page_started(page + 1, total_pages, &url);

            match self.scrape_page(&url).await {
                PageOutcome::Scraped {
                    records: page_records,
                    cards,
                    skipped,
                } => {
                    stats.record_page(cards, skipped);
                    records.extend(page_records);
                }
                PageOutcome::FetchFailed(_) => stats.record_failed_page(),
            }
        }

        stats.record_results(&records);
        tracing::debug!("Crawl of {} finished: {:?}", target, stats);

        CrawlOutput { records, stats }
    }

    // Offsets never exceed the largest offset the pagination bar linked, so this stays in range.
    fn page_offset(&self, page: usize) -> u64 {
        page as u64 * u64::from(self.page_size)
    }
}
