//! Output module for crawl findings and reports
//!
//! This module handles:
//! - The error records and verdict of a crawl
//! - Crawl statistics
//! - Console and markdown rendering of the report

mod markdown;
mod report;
pub mod stats;

pub use markdown::{format_markdown_report, generate_markdown_report};
pub use report::{CrawlReport, ErrorKind, ErrorRecord};
pub use stats::{print_statistics, CrawlStatistics};

/// Prints the full report to stdout: statistics, then every finding
pub fn print_report(report: &CrawlReport) {
    print_statistics(&report.stats);

    if report.passed() {
        println!("✓ No broken links found from {}", report.root);
        return;
    }

    println!(
        "✗ {} broken link(s) found ({} page load failures, {} missing sections):\n",
        report.errors.len(),
        report.count(ErrorKind::PageLoadFailed),
        report.count(ErrorKind::FragmentNotFound)
    );
    for error in &report.errors {
        println!("  - {}", error);
    }
}
