//! Crawl statistics
//!
//! This module tallies what a crawl produced and renders the end-of-run summary.

use crate::model::ProductRecord;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Listing pages the pagination bar implied
    pub pages_planned: usize,

    /// Listing pages that could not be fetched
    pub pages_failed: usize,

    /// Product cards found across all fetched pages
    pub cards_found: usize,

    /// Cards dropped because their markup could not be extracted
    pub cards_skipped: usize,

    /// Records in the result set
    pub records: usize,

    /// Records whose description fell back to the sentinel
    pub descriptions_missing: usize,
}

impl CrawlStats {
    /// Creates statistics for a crawl of `pages_planned` pages
    pub fn new(pages_planned: usize) -> Self {
        Self {
            pages_planned,
            ..Self::default()
        }
    }

    /// Records a fetched page
    pub fn record_page(&mut self, cards: usize, skipped: usize) {
        self.cards_found += cards;
        self.cards_skipped += skipped;
    }

    /// Records a page that could not be fetched
    pub fn record_failed_page(&mut self) {
        self.pages_failed += 1;
    }

    /// Records the final result set
    pub fn record_results(&mut self, records: &[ProductRecord]) {
        self.records = records.len();
        self.descriptions_missing = records.iter().filter(|r| r.lacks_description()).count();
    }

    /// Pages that were fetched successfully
    pub fn pages_scraped(&self) -> usize {
        self.pages_planned.saturating_sub(self.pages_failed)
    }
}

/// Renders the end-of-run summary
///
/// The last line is always `Scraped <n> products.`, whether or not anything
/// was exported.
pub fn format_statistics(stats: &CrawlStats) -> String {
    let mut lines = vec![
        "=== Crawl Statistics ===".to_string(),
        String::new(),
        "Pages:".to_string(),
        format!("  Planned: {}", stats.pages_planned),
        format!("  Scraped: {}", stats.pages_scraped()),
    ];
    if stats.pages_failed > 0 {
        lines.push(format!("  Failed: {}", stats.pages_failed));
    }
    lines.push(String::new());

    lines.push("Products:".to_string());
    lines.push(format!("  Cards found: {}", stats.cards_found));
    if stats.cards_skipped > 0 {
        lines.push(format!("  Cards skipped: {}", stats.cards_skipped));
    }
    lines.push(format!("  Without description: {}", stats.descriptions_missing));
    lines.push(String::new());

    lines.push(format!("Scraped {} products.", stats.records));
    lines.join("\n")
}
