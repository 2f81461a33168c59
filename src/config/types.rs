use serde::Deserialize;

/// Main configuration structure for Doc-Ripple
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub check: CheckConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Which site to crawl and where the traversal starts
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Origin the fetcher sends requests to (e.g. "http://localhost:3000")
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Host name treated as local when links carry an explicit host.
    /// Defaults to the host of `base-url`.
    #[serde(rename = "local-host", default)]
    pub local_host: Option<String>,

    /// Path the crawl is seeded with
    #[serde(default = "default_root")]
    pub root: String,

    /// Only pages under this prefix have their links followed
    #[serde(rename = "docs-prefix", default = "default_root")]
    pub docs_prefix: String,

    /// Additional paths seeded after the root
    #[serde(rename = "extra-seeds", default)]
    pub extra_seeds: Vec<String>,
}

impl SiteConfig {
    /// The host name links are compared against, lowercased
    ///
    /// Falls back to the host of `base-url` when `local-host` is not set.
    /// Returns `None` only for a base URL without a host, which validation
    /// rejects.
    pub fn effective_local_host(&self) -> Option<String> {
        match &self.local_host {
            Some(host) => Some(host.to_lowercase()),
            None => url::Url::parse(&self.base_url)
                .ok()
                .and_then(|url| crate::url::extract_host(&url)),
        }
    }
}

/// Link validation policy
#[derive(Debug, Clone, Deserialize)]
pub struct CheckConfig {
    /// Status codes that count as a healthy page
    #[serde(rename = "accepted-statuses", default = "default_accepted_statuses")]
    pub accepted_statuses: Vec<u16>,

    /// CSS class of the permalink anchors attached to headings
    #[serde(
        rename = "heading-anchor-class",
        default = "default_heading_anchor_class"
    )]
    pub heading_anchor_class: String,

    /// Pause between two requests (milliseconds)
    #[serde(rename = "request-delay", default)]
    pub request_delay: u64,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            accepted_statuses: default_accepted_statuses(),
            heading_anchor_class: default_heading_anchor_class(),
            request_delay: 0,
            timeout: default_timeout(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: env!("CARGO_PKG_NAME").to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Path of the markdown report, if one should be written
    #[serde(rename = "report-path", default)]
    pub report_path: Option<String>,
}

fn default_root() -> String {
    "/docs".to_string()
}

fn default_accepted_statuses() -> Vec<u16> {
    vec![200, 403]
}

fn default_heading_anchor_class() -> String {
    "Docs__heading__anchor".to_string()
}

fn default_timeout() -> u64 {
    30
}
