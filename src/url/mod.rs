//! URL handling for the scraper
//!
//! This module validates the store URL entered by the operator, derives the
//! listing page URLs from it and resolves card links against the site origin.

mod target;

pub use target::{validate_target, CrawlTarget};

use crate::model::NO_LINK;

/// Resolves a card link against the site origin
///
/// Root-relative links (`/b/abc`) are prefixed with the origin; everything else,
/// including the `#` sentinel, is returned unchanged.
///
/// # Examples
///
/// ```
/// use payhip_scraper::url::resolve_link;
///
/// assert_eq!(resolve_link("/b/abc", "https://payhip.com"), "https://payhip.com/b/abc");
/// assert_eq!(resolve_link("#", "https://payhip.com"), "#");
/// ```
pub fn resolve_link(href: &str, origin: &str) -> String {
    if href != NO_LINK && href.starts_with('/') {
        format!("{}{}", origin.trim_end_matches('/'), href)
    } else {
        href.to_string()
    }
}
