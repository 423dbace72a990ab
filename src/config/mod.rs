//! Configuration module for the scraper
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default matching Payhip's storefront, so
//! the scraper runs without any file at all.
//!
//! # Example
//!
//! ```no_run
//! use payhip_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("payhip.toml")).unwrap();
//! println!("Description attempts: {}", config.crawler.description_attempts);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, SelectorConfig, SiteConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, load_or_default, parse_config};
