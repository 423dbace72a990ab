use crate::config::SiteConfig;
use crate::{TargetError, TargetResult};
use std::fmt;
use url::Url;

/// A validated store collection URL
///
/// The wrapped string always ends with the configured collection path, so every
/// listing page can be derived from it by appending a `page=` offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    base: String,
}

impl CrawlTarget {
    /// The base listing URL (first page)
    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Builds the URL of the listing page starting at `offset`
    ///
    /// Offset 0 is the base URL itself; any other offset is appended as `?page=<offset>`.
    pub fn page_url(&self, offset: u64) -> String {
        if offset == 0 {
            self.base.clone()
        } else {
            format!("{}?page={}", self.base, offset)
        }
    }
}

impl fmt::Display for CrawlTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

/// Validates a raw store URL
///
/// # Outcomes
///
/// | Input | Result |
/// |-------|--------|
/// | `<origin>/user/collection/all` | accepted unchanged |
/// | `<origin>/user/` | trailing slashes removed, collection path appended |
/// | anything not under `<origin>/` | `TargetError::NotOnSite` |
/// | URL with `?query` or `#fragment` | `TargetError::QueryOrFragment` |
///
/// No network access happens here.
///
/// # Example
///
/// ```
/// use payhip_scraper::config::SiteConfig;
/// use payhip_scraper::url::validate_target;
///
/// let site = SiteConfig::default();
/// let target = validate_target("https://payhip.com/vespr/", &site).unwrap();
/// assert_eq!(target.as_str(), "https://payhip.com/vespr/collection/all");
/// ```
pub fn validate_target(raw: &str, site: &SiteConfig) -> TargetResult<CrawlTarget> {
    let input = raw.trim();
    let origin = site.origin.trim_end_matches('/');

    if !input.starts_with(&format!("{}/", origin)) {
        return Err(TargetError::NotOnSite {
            input: input.to_string(),
            origin: origin.to_string(),
        });
    }

    let parsed = Url::parse(input).map_err(|e| TargetError::Malformed {
        input: input.to_string(),
        reason: e.to_string(),
    })?;

    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(TargetError::QueryOrFragment(input.to_string()));
    }

    let suffix = site.collection_path.trim_end_matches('/');
    if input.ends_with(suffix) {
        return Ok(CrawlTarget {
            base: input.to_string(),
        });
    }

    let trimmed = input.trim_end_matches('/');
    let base = if trimmed.ends_with(suffix) {
        trimmed.to_string()
    } else {
        format!("{}{}", trimmed, suffix)
    };

    tracing::debug!("URL corrected to: {}", base);
    Ok(CrawlTarget { base })
}
