//! Compiled CSS selectors for listing and detail pages

use crate::config::SelectorConfig;
use crate::ConfigError;
use scraper::Selector;

/// Selectors compiled once from `SelectorConfig`
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    pub card: Selector,
    pub titles: Vec<Selector>,
    pub price: Selector,
    pub image: Selector,
    pub description: Selector,
    pub pagination: Selector,
    pub anchor: Selector,
}

impl ListingSelectors {
    /// Compiles every selector in the configuration
    pub fn from_config(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            card: compile(&config.card)?,
            titles: config
                .titles
                .iter()
                .map(|css| compile(css))
                .collect::<Result<_, _>>()?,
            price: compile(&config.price)?,
            image: compile(&config.image)?,
            description: compile(&config.description)?,
            pagination: compile(&config.pagination)?,
            anchor: compile("a")?,
        })
    }
}

fn compile(css: &str) -> Result<Selector, ConfigError> {
    Selector::parse(css).map_err(|e| ConfigError::InvalidSelector(format!("'{}': {:?}", css, e)))
}
