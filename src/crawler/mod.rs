//! Crawler module for page fetching and link checking
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`Fetch`] trait
//! - HTML parsing into anchors and fragment targets
//! - The breadth-first frontier and visited set
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{run_crawl, CrawlPolicy, Crawler};
pub use fetcher::{build_http_client, Fetch, FetchedPage, HttpFetcher};
pub use frontier::CrawlState;
pub use parser::{parse_page, Anchor, ParsedPage};

use crate::config::Config;
use crate::output::CrawlReport;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client and visit filter
/// 2. Seed the frontier with the root and any extra seeds
/// 3. Fetch, check and expand pages breadth-first
/// 4. Return the report with every finding
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl ran to completion, findings included
/// * `Err(RippleError)` - Crawl could not be set up
pub async fn crawl(config: &Config) -> crate::Result<CrawlReport> {
    run_crawl(config).await
}
