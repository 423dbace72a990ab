//! Payhip Scraper: a sequential product-listing crawler
//!
//! This crate walks the paginated collection pages of a Payhip store, extracts a
//! [`ProductRecord`] from every product card, fetches each product's description
//! and exports the result set as JSON or CSV.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod prompt;
pub mod url;

use thiserror::Error;

/// Main error type for scraper operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector: {0}")]
    InvalidSelector(String),
}

/// Reasons a raw string is not accepted as a crawl target
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("'{input}' is not a store URL on {origin}")]
    NotOnSite { input: String, origin: String },

    #[error("Malformed URL '{input}': {reason}")]
    Malformed { input: String, reason: String },

    #[error("Store URL must not carry a query or fragment: '{0}'")]
    QueryOrFragment(String),
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for target validation
pub type TargetResult<T> = std::result::Result<T, TargetError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, CrawlOutput};
pub use model::ProductRecord;
pub use url::{validate_target, CrawlTarget};
