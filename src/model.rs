//! Product records and the sentinel values used when markup is missing

use serde::{Deserialize, Serialize};

/// Placeholder for a missing title or image
pub const NOT_AVAILABLE: &str = "N/A";

/// Price used when a card has no price element (Payhip omits it for free products)
pub const FREE_PRICE: &str = "Free";

/// Placeholder for a missing or unfetchable description
pub const NO_DESCRIPTION: &str = "No description";

/// Placeholder for a missing detail link
pub const NO_LINK: &str = "#";

/// One scraped product
///
/// Field order here is the serialisation order of the JSON export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: String,
    pub price: String,
    pub link: String,
    pub image: String,
    pub description: String,
}

impl ProductRecord {
    /// Returns true if the description fell back to the sentinel
    pub fn lacks_description(&self) -> bool {
        self.description == NO_DESCRIPTION
    }

    /// Fields in export column order
    pub fn to_row(&self) -> [&str; 5] {
        [
            &self.title,
            &self.price,
            &self.link,
            &self.image,
            &self.description,
        ]
    }
}

/// Ordered records in scrape order (page order, then card order)
pub type ResultSet = Vec<ProductRecord>;
