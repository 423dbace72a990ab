use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for the scraper
///
/// Every section is optional in the TOML file; missing keys take the values
/// that match Payhip's public storefront.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub selectors: SelectorConfig,
}

/// Target site layout
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Scheme and host every store URL must start with
    pub origin: String,

    /// Path suffix of a store's full product listing
    #[serde(rename = "collection-path")]
    pub collection_path: String,

    /// Cards per listing page; page offsets are multiples of this
    #[serde(rename = "page-size")]
    pub page_size: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: "https://payhip.com".to_string(),
            collection_path: "/collection/all".to_string(),
            page_size: 16,
        }
    }
}

/// Crawler pacing and retry configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Pause after each product card (seconds), used when the operator gives none
    #[serde(rename = "delay-seconds")]
    pub delay_seconds: u64,

    /// Total attempts for a product description fetch
    #[serde(rename = "description-attempts")]
    pub description_attempts: u32,

    /// Fixed pause between description attempts (milliseconds)
    #[serde(rename = "retry-interval-ms")]
    pub retry_interval_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl CrawlerConfig {
    pub fn default_delay(&self) -> Duration {
        Duration::from_secs(self.delay_seconds)
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            delay_seconds: 1,
            description_attempts: 3,
            retry_interval_ms: 2000,
            request_timeout_secs: 30,
        }
    }
}

/// Identifying header sent with every request
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    pub header: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            header: "Mozilla/5.0".to_string(),
        }
    }
}

/// CSS selectors for the storefront theme
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// One product card on a listing page
    pub card: String,

    /// Heading anchors holding title and link, tried in order
    pub titles: Vec<String>,

    pub price: String,
    pub image: String,

    /// Description container on a product detail page
    pub description: String,

    /// Container of the pagination links on a listing page
    pub pagination: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            card: "div.product-card-wrapper".to_string(),
            titles: vec![
                "h3.card__heading a".to_string(),
                "h4.card__heading a".to_string(),
            ],
            price: "span.price-item--regular".to_string(),
            image: "img".to_string(),
            description: "div.product-description".to_string(),
            pagination: "div.pagination-wrapper".to_string(),
        }
    }
}
