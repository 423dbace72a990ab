//! Product card field extraction
//!
//! This module turns one product card on a listing page into its summary
//! fields (title, link, price, image). Missing elements fall back to the
//! sentinel values in [`crate::model`]; an element that is present but lacks
//! the attribute we need makes the whole card fail.

use crate::crawler::selectors::ListingSelectors;
use crate::model::{FREE_PRICE, NOT_AVAILABLE, NO_LINK};
use crate::url::resolve_link;
use scraper::{ElementRef, Html};
use thiserror::Error;

/// Per-card extraction failure; the card is skipped
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("{element} element has no '{attribute}' attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
}

/// Summary fields of one card, before its description is fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFields {
    pub title: String,
    pub link: String,
    pub price: String,
    pub image: String,
}

/// Extracts every card on a listing page, in document order
///
/// # Arguments
///
/// * `html` - The listing page body
/// * `selectors` - Compiled selectors for the storefront theme
/// * `origin` - Site origin used to absolutise root-relative links
///
/// # Returns
///
/// One entry per card; failed cards stay in place as `Err` so the caller can
/// report them by position.
pub fn extract_cards(
    html: &str,
    selectors: &ListingSelectors,
    origin: &str,
) -> Vec<Result<CardFields, CardError>> {
    let document = Html::parse_document(html);

    document
        .select(&selectors.card)
        .map(|card| extract_card(card, selectors, origin))
        .collect()
}

/// Extracts the summary fields of a single card
///
/// # Fallbacks
///
/// | Field | Source | Missing element |
/// |-------|--------|-----------------|
/// | title | text of the first matching heading anchor | `N/A` |
/// | link | `href` of that anchor | `#` |
/// | price | text of the regular price span | `Free` |
/// | image | `src` of the first image | `N/A` |
pub fn extract_card(
    card: ElementRef<'_>,
    selectors: &ListingSelectors,
    origin: &str,
) -> Result<CardFields, CardError> {
    let heading = selectors
        .titles
        .iter()
        .find_map(|selector| card.select(selector).next());

    let (title, link) = match heading {
        Some(anchor) => {
            let href = anchor
                .value()
                .attr("href")
                .ok_or(CardError::MissingAttribute {
                    element: "title",
                    attribute: "href",
                })?;
            (element_text(anchor), resolve_link(href, origin))
        }
        None => (NOT_AVAILABLE.to_string(), NO_LINK.to_string()),
    };

    let price = card
        .select(&selectors.price)
        .next()
        .map(element_text)
        .unwrap_or_else(|| FREE_PRICE.to_string());

    let image = match card.select(&selectors.image).next() {
        Some(img) => img
            .value()
            .attr("src")
            .ok_or(CardError::MissingAttribute {
                element: "image",
                attribute: "src",
            })?
            .to_string(),
        None => NOT_AVAILABLE.to_string(),
    };

    Ok(CardFields {
        title,
        link,
        price,
        image,
    })
}

/// Full text content of an element, trimmed
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
