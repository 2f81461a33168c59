//! HTTP fetcher implementation
//!
//! This module defines the fetch capability the crawl loop consumes and its
//! reqwest-backed implementation:
//! - Building HTTP clients with a proper user agent string
//! - GET requests that follow redirects and surface the final status and body
//! - Error classification for requests that never got a response

use crate::config::{Config, UserAgentConfig};
use crate::RippleError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Upper bound on redirect hops followed for one page
const MAX_REDIRECTS: usize = 10;

/// Final status and body of a page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// HTTP status code after redirects
    pub status: u16,

    /// Response body, decoded as text
    pub body: String,
}

impl FetchedPage {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// The capability to load a site path
///
/// Any status is a successful fetch; only a request that produced no response
/// at all is an `Err`.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<FetchedPage, RippleError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Total time allowed per request
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use doc_ripple::config::UserAgentConfig;
/// use doc_ripple::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version
    let user_agent = format!("{}/{}", config.crawler_name, config.crawler_version);

    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches site paths over HTTP relative to a base URL
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Builds the fetcher from the site, check and user-agent sections
    pub fn from_config(config: &Config) -> Result<Self, RippleError> {
        let base_url = Url::parse(&config.site.base_url)?;
        let client = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.check.timeout),
        )?;
        Ok(Self::new(client, base_url))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the request URL for a site path
    ///
    /// The path replaces the base URL's path verbatim. It is never resolved as
    /// a reference, so a path such as `//other.host/x` stays on this origin.
    pub fn request_url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        url
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<FetchedPage, RippleError> {
        let url = self.request_url(path);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| RippleError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status().as_u16();
        if response.url() != &url {
            tracing::trace!("{} redirected to {}", url, response.url());
        }

        // A status was received, so a body that fails to decode still counts
        // as a response
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Could not read body of {} ({}): {}", url, status, e);
                String::new()
            }
        };

        Ok(FetchedPage { status, body })
    }
}
