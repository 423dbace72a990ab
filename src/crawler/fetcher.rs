//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - Building the HTTP client with the identifying user agent
//! - GET requests for listing and detail pages
//! - Classifying failures into status and network errors

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::ScrapeError;
use reqwest::Client;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Page body content
        body: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, invalid URL, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Converts the result into the page body or a `ScrapeError` naming `url`
    pub fn into_body(self, url: &str) -> Result<String, ScrapeError> {
        match self {
            Self::Success { body } => Ok(body),
            Self::HttpError { status_code } => Err(ScrapeError::Status {
                url: url.to_string(),
                status: status_code,
            }),
            Self::NetworkError { error } => Err(ScrapeError::Network {
                url: url.to_string(),
                message: error,
            }),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The identifying header configuration
/// * `crawler` - Crawler settings (request timeout)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use payhip_scraper::config::{CrawlerConfig, UserAgentConfig};
/// use payhip_scraper::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header.as_str())
        .timeout(crawler.request_timeout())
        .connect_timeout(crawler.request_timeout().min(std::time::Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sequential page fetcher shared by every component
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher around an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher from configuration
    pub fn from_config(
        user_agent: &UserAgentConfig,
        crawler: &CrawlerConfig,
    ) -> Result<Self, ScrapeError> {
        Ok(Self::new(build_http_client(user_agent, crawler)?))
    }

    /// Fetches a URL with a GET request
    ///
    /// Redirects are followed by the client; any final status outside 2xx is
    /// reported as `HttpError`.
    pub async fn fetch(&self, url: &str) -> FetchResult {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return classify_error(&e),
        };

        let status = response.status();
        if response.url().as_str() != url {
            tracing::debug!("{} redirected to {}", url, response.url());
        }

        if !status.is_success() {
            tracing::debug!("{} answered with status {}", url, status);
            return FetchResult::HttpError {
                status_code: status.as_u16(),
            };
        }

        match response.text().await {
            Ok(body) => FetchResult::Success { body },
            Err(e) => FetchResult::NetworkError {
                error: e.to_string(),
            },
        }
    }
}

fn classify_error(e: &reqwest::Error) -> FetchResult {
    let error = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        "Connection refused".to_string()
    } else {
        e.to_string()
    };
    FetchResult::NetworkError { error }
}
