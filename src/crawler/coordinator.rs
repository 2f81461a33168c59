//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties together:
//! - The frontier and visited set
//! - Fetching and validating each unit
//! - Extracting, resolving, and filtering links on documentation pages
//! - Producing the final report

use crate::config::Config;
use crate::crawler::frontier::CrawlState;
use crate::crawler::parser::{parse_page, ParsedPage};
use crate::crawler::{Fetch, HttpFetcher};
use crate::output::{CrawlReport, CrawlStatistics, ErrorRecord};
use crate::state::{CrawlPhase, CrawlUnit, SourceLink};
use crate::url::{resolve, VisitFilter};
use crate::RippleError;
use chrono::Utc;
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Visits between two progress log lines
const PROGRESS_INTERVAL: usize = 25;

/// What counts as healthy and which pages get expanded
#[derive(Debug, Clone)]
pub struct CrawlPolicy {
    /// Statuses that do not produce a finding
    pub accepted_statuses: HashSet<u16>,

    /// Only pages whose path starts with this prefix have links followed
    pub docs_prefix: String,

    /// Pause between two requests
    pub request_delay: Duration,
}

impl CrawlPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            accepted_statuses: config.check.accepted_statuses.iter().copied().collect(),
            docs_prefix: config.site.docs_prefix.clone(),
            request_delay: Duration::from_millis(config.check.request_delay),
        }
    }

    pub fn is_accepted(&self, status: u16) -> bool {
        self.accepted_statuses.contains(&status)
    }

    /// Returns true if links on `path` should be followed
    pub fn should_expand(&self, path: &str) -> bool {
        path.starts_with(&self.docs_prefix)
    }
}

impl Default for CrawlPolicy {
    fn default() -> Self {
        Self {
            accepted_statuses: [200, 403].into_iter().collect(),
            docs_prefix: "/docs".to_string(),
            request_delay: Duration::ZERO,
        }
    }
}

/// Main crawler structure
///
/// A crawler runs exactly once: Idle -> Running -> Done.
pub struct Crawler<F> {
    fetcher: F,
    filter: VisitFilter,
    policy: CrawlPolicy,
    seeds: Vec<String>,
    state: CrawlState,
    stats: CrawlStatistics,
    phase: CrawlPhase,
}

impl Crawler<HttpFetcher> {
    /// Creates an HTTP crawler seeded with the configured root and extra seeds
    pub fn from_config(config: &Config) -> Result<Self, RippleError> {
        let fetcher = HttpFetcher::from_config(config)?;
        let filter = VisitFilter::from_config(config)?;
        let policy = CrawlPolicy::from_config(config);

        Ok(Self::new(fetcher, filter, policy, config.site.root.clone())
            .with_extra_seeds(config.site.extra_seeds.iter().cloned()))
    }
}

impl<F: Fetch> Crawler<F> {
    /// Creates a new crawler that starts at `root`
    pub fn new(fetcher: F, filter: VisitFilter, policy: CrawlPolicy, root: impl Into<String>) -> Self {
        Self {
            fetcher,
            filter,
            policy,
            seeds: vec![root.into()],
            state: CrawlState::new(),
            stats: CrawlStatistics::default(),
            phase: CrawlPhase::Idle,
        }
    }

    /// Adds paths to seed after the root
    pub fn with_extra_seeds<I>(mut self, seeds: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.seeds.extend(seeds);
        self
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Runs the crawl loop until the frontier is empty
    ///
    /// Findings never abort the crawl; they are collected into the report.
    /// Calling `run` a second time fails with an invalid phase transition.
    pub async fn run(&mut self) -> Result<CrawlReport, RippleError> {
        self.phase.transition(CrawlPhase::Running)?;

        let started_at = Utc::now();
        let start_time = Instant::now();

        for seed in &self.seeds {
            self.state.enqueue(CrawlUnit::seed(seed.clone()));
        }
        tracing::info!(
            "Starting crawl from {} ({} seed(s))",
            self.seeds[0],
            self.state.frontier_size()
        );

        while let Some(unit) = self.state.dequeue() {
            let visits = self.state.visited_count();
            if visits > 1 && !self.policy.request_delay.is_zero() {
                tokio::time::sleep(self.policy.request_delay).await;
            }

            if let Some(page) = self.fetch_and_check(&unit).await {
                if self.policy.should_expand(unit.path()) {
                    for discovered in self.extract_links(&page, unit.path()) {
                        if self.state.enqueue(discovered) {
                            self.stats.links_enqueued += 1;
                        } else {
                            self.stats.duplicates_suppressed += 1;
                        }
                    }
                }
            }

            if visits % PROGRESS_INTERVAL == 0 {
                tracing::info!(
                    "Progress: {} links checked, {} in frontier, {} broken so far",
                    visits,
                    self.state.frontier_size(),
                    self.state.errors().len()
                );
            }
        }

        self.stats.elapsed = start_time.elapsed();
        self.phase.transition(CrawlPhase::Done)?;

        let errors = std::mem::take(&mut self.state).into_errors();
        tracing::info!(
            "Crawl completed: {} pages checked in {:?}, {} broken link(s)",
            self.stats.pages_fetched,
            self.stats.elapsed,
            errors.len()
        );

        Ok(CrawlReport {
            root: self.seeds[0].clone(),
            config_hash: None,
            started_at,
            finished_at: Utc::now(),
            errors,
            stats: std::mem::take(&mut self.stats),
        })
    }

    /// Fetches one unit and records any findings
    ///
    /// This method:
    /// 1. Fetches the unit's path
    /// 2. Checks the status against the accepted set
    /// 3. Checks the fragment, if the unit has one
    ///
    /// Returns the parsed page when it may still be needed for link
    /// extraction, `None` when the request failed or the page is not expanded.
    async fn fetch_and_check(&mut self, unit: &CrawlUnit) -> Option<ParsedPage> {
        tracing::debug!("Visiting {}", unit);

        let fetched = match self.fetcher.fetch(unit.path()).await {
            Ok(fetched) => fetched,
            Err(e) => {
                tracing::warn!("Could not load {}: {}", unit.path(), e);
                self.stats.record_request_failure();
                self.state.record_error(ErrorRecord::request_failed(unit, &e));
                return None;
            }
        };
        self.stats.record_status(fetched.status);

        if !self.policy.is_accepted(fetched.status) {
            tracing::warn!("{} returned {}", unit.path(), fetched.status);
            self.state
                .record_error(ErrorRecord::unexpected_status(unit, fetched.status));
        }

        let expand = self.policy.should_expand(unit.path());
        if unit.fragment().is_none() && !expand {
            return None;
        }

        let page = parse_page(&fetched.body);

        if let Some(fragment) = unit.fragment() {
            if !page.has_fragment_target(fragment) {
                tracing::warn!("Section #{} not found on {}", fragment, unit.path());
                self.state
                    .record_error(ErrorRecord::fragment_not_found(unit, fragment));
            }
        }

        expand.then_some(page)
    }

    /// Resolves and filters the anchors of a page into candidate units
    ///
    /// Every returned unit carries `source_path` and the anchor text as its
    /// source link. Skipped and malformed links are only counted.
    fn extract_links(&mut self, page: &ParsedPage, source_path: &str) -> Vec<CrawlUnit> {
        let mut units = Vec::new();

        for anchor in &page.anchors {
            self.stats.links_seen += 1;

            let link = match resolve(source_path, &anchor.href) {
                Some(link) => link,
                None => {
                    tracing::debug!("Skipping malformed href {:?} on {}", anchor.href, source_path);
                    self.stats.malformed_hrefs += 1;
                    continue;
                }
            };

            let decision = self.filter.decide(&link, anchor);
            if !decision.should_follow() {
                tracing::debug!("Skipping {} ({})", anchor.href, decision.label());
                self.stats.record_skip(decision);
                continue;
            }

            units.push(CrawlUnit::discovered(
                link.path,
                link.fragment,
                SourceLink::new(anchor.text.clone(), source_path),
            ));
        }

        units
    }
}

/// Runs a complete crawl from a configuration
///
/// # Example
///
/// ```no_run
/// use doc_ripple::config::load_config;
/// use doc_ripple::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("ripple.toml"))?;
/// let report = run_crawl(&config).await?;
/// println!("passed: {}", report.passed());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlReport, RippleError> {
    let mut crawler = Crawler::from_config(config)?;
    crawler.run().await
}
