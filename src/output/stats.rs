//! Statistics gathered while crawling
//!
//! This module provides the counters the crawl loop updates and a console
//! printer for them.

use crate::url::VisitDecision;
use std::collections::BTreeMap;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default)]
pub struct CrawlStatistics {
    /// Pages requested (one per distinct `(path, fragment)`)
    pub pages_fetched: u64,

    /// Responses by status code
    pub status_counts: BTreeMap<u16, u64>,

    /// Requests that produced no response at all
    pub request_failures: u64,

    /// Anchors with an href found on expanded pages
    pub links_seen: u64,

    /// Links that passed the filter and were new to the frontier
    pub links_enqueued: u64,

    /// Links that passed the filter but were already pending or visited
    pub duplicates_suppressed: u64,

    /// Links rejected by the visit filter, per decision
    pub skipped: BTreeMap<VisitDecision, u64>,

    /// Hrefs that could not be parsed
    pub malformed_hrefs: u64,

    /// Wall time of the crawl
    pub elapsed: Duration,
}

impl CrawlStatistics {
    pub fn record_status(&mut self, status: u16) {
        self.pages_fetched += 1;
        *self.status_counts.entry(status).or_insert(0) += 1;
    }

    pub fn record_request_failure(&mut self) {
        self.pages_fetched += 1;
        self.request_failures += 1;
    }

    pub fn record_skip(&mut self, decision: VisitDecision) {
        *self.skipped.entry(decision).or_insert(0) += 1;
    }

    /// Total links the filter rejected
    pub fn total_skipped(&self) -> u64 {
        self.skipped.values().sum()
    }

    /// Pages per second over the whole crawl
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.pages_fetched as f64 / secs
        } else {
            0.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Pages fetched: {}", stats.pages_fetched);
    println!("  Links seen: {}", stats.links_seen);
    println!("  Links enqueued: {}", stats.links_enqueued);
    println!("  Duplicates suppressed: {}", stats.duplicates_suppressed);
    println!("  Malformed hrefs: {}", stats.malformed_hrefs);
    println!(
        "  Elapsed: {:.2}s ({:.1} pages/sec)",
        stats.elapsed.as_secs_f64(),
        stats.rate()
    );
    println!();

    println!("Responses:");
    for (status, count) in &stats.status_counts {
        println!("  {}: {}", status, count);
    }
    if stats.request_failures > 0 {
        println!("  no response: {}", stats.request_failures);
    }
    println!();

    if !stats.skipped.is_empty() {
        println!("Skipped Links ({}):", stats.total_skipped());
        for (decision, count) in &stats.skipped {
            println!("  {}: {}", decision.label(), count);
        }
        println!();
    }
}
