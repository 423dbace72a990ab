//! Listing page scraping

use crate::crawler::coordinator::Coordinator;
use crate::crawler::extractor::extract_cards;
use crate::crawler::report::CrawlReporter;
use crate::crawler::retry::Sleeper;
use crate::model::ProductRecord;
use crate::ScrapeError;

/// What happened to one listing page
#[derive(Debug)]
pub enum PageOutcome {
    /// The page was fetched; `records` holds every card that extracted cleanly
    Scraped {
        records: Vec<ProductRecord>,
        /// Cards found on the page
        cards: usize,
        /// Cards dropped because extraction failed
        skipped: usize,
    },

    /// The page could not be fetched; it contributes no records
    FetchFailed(ScrapeError),
}

impl<S: Sleeper, R: CrawlReporter> Coordinator<S, R> {
    /// Scrapes every product card on one listing page
    ///
    /// For each card, in document order: extract the summary fields, fetch the
    /// description, then pause for the configured delay. A card whose
    /// extraction fails is reported and skipped; the rest of the page continues.
    pub async fn scrape_page(&self, url: &str) -> PageOutcome {
        let body = match self.fetcher.fetch(url).await.into_body(url) {
            Ok(body) => body,
            Err(e) => {
                self.reporter.page_failed(url, &e);
                return PageOutcome::FetchFailed(e);
            }
        };

        let cards = extract_cards(&body, &self.selectors, &self.origin);
        let total_cards = cards.len();
        tracing::debug!("Found {} product cards on {}", total_cards, url);

        let mut records = Vec::with_capacity(total_cards);
        let mut skipped = 0;

        for (position, card) in cards.into_iter().enumerate() {
            let index = position + 1;
            let fields = match card {
                Ok(fields) => fields,
                Err(e) => {
                    self.reporter.card_skipped(index, &e);
                    skipped += 1;
                    continue;
                }
            };

            let description = self.fetch_description(&fields.link).await;
            self.sleeper.sleep(self.delay).await;

            let record = ProductRecord {
                title: fields.title,
                price: fields.price,
                link: fields.link,
                image: fields.image,
                description,
            };
            self.reporter.product_scraped(index, total_cards, &record);
            records.push(record);
        }

        PageOutcome::Scraped {
            records,
            cards: total_cards,
            skipped,
        }
    }
}
