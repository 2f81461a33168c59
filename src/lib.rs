//! Doc-Ripple: a link integrity crawler for documentation sites
//!
//! This crate walks a documentation site breadth-first from a root page and
//! verifies that every internal link resolves to an accepted page and that
//! every fragment a link points at exists on the target page.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Doc-Ripple operations
///
/// Broken links are not errors at this level: they are collected as
/// [`output::ErrorRecord`]s in the crawl report.
#[derive(Debug, Error)]
pub enum RippleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid crawl phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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
}

/// Result type alias for Doc-Ripple operations
pub type Result<T> = std::result::Result<T, RippleError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Crawler, Fetch, FetchedPage, HttpFetcher};
pub use output::{CrawlReport, ErrorKind, ErrorRecord};
pub use state::{CrawlPhase, CrawlUnit, SourceLink};
pub use url::{resolve, ResolvedLink, VisitDecision, VisitFilter};
