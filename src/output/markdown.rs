//! Markdown report generation
//!
//! This module writes a human-readable markdown report of a crawl: run
//! information, statistics, and every broken link with its provenance.

use crate::output::report::CrawlReport;
use crate::RippleError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown report for a crawl to `output_path`
///
/// # Arguments
///
/// * `report` - The finished crawl report
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(RippleError)` - Failed to create or write the file
pub fn generate_markdown_report(report: &CrawlReport, output_path: &Path) -> Result<(), RippleError> {
    let markdown = format_markdown_report(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl report as markdown
pub fn format_markdown_report(report: &CrawlReport) -> String {
    let mut md = String::new();
    let stats = &report.stats;

    md.push_str("# Doc-Ripple Link Report\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Root**: `{}`\n", report.root));
    md.push_str(&format!("- **Started**: {}\n", report.started_at.to_rfc3339()));
    md.push_str(&format!("- **Finished**: {}\n", report.finished_at.to_rfc3339()));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n",
        stats.elapsed.as_secs_f64()
    ));
    if let Some(hash) = &report.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    let verdict = if report.passed() { "PASS" } else { "FAIL" };
    md.push_str(&format!("- **Verdict**: {}\n\n", verdict));

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Pages Fetched**: {}\n", stats.pages_fetched));
    md.push_str(&format!("- **Links Seen**: {}\n", stats.links_seen));
    md.push_str(&format!("- **Links Enqueued**: {}\n", stats.links_enqueued));
    md.push_str(&format!(
        "- **Duplicates Suppressed**: {}\n",
        stats.duplicates_suppressed
    ));
    md.push_str(&format!("- **Malformed Hrefs**: {}\n", stats.malformed_hrefs));
    md.push_str(&format!("- **Broken Links**: {}\n\n", report.errors.len()));

    // Responses
    if !stats.status_counts.is_empty() || stats.request_failures > 0 {
        md.push_str("## Responses\n\n");
        md.push_str("| Status | Count |\n");
        md.push_str("|--------|-------|\n");
        for (status, count) in &stats.status_counts {
            md.push_str(&format!("| {} | {} |\n", status, count));
        }
        if stats.request_failures > 0 {
            md.push_str(&format!("| no response | {} |\n", stats.request_failures));
        }
        md.push('\n');
    }

    // Skipped links
    if !stats.skipped.is_empty() {
        md.push_str("## Skipped Links\n\n");
        md.push_str("| Reason | Count |\n");
        md.push_str("|--------|-------|\n");
        for (decision, count) in &stats.skipped {
            md.push_str(&format!("| {} | {} |\n", decision.label(), count));
        }
        md.push('\n');
    }

    // Findings
    md.push_str("## Broken Links\n\n");
    if report.errors.is_empty() {
        md.push_str("No broken links found.\n");
        return md;
    }

    md.push_str("| Error | Page | Detail | Linked From | Link Text |\n");
    md.push_str("|-------|------|--------|-------------|-----------|\n");
    for error in &report.errors {
        let (from, text) = match &error.source_link {
            Some(source) => (
                format!("`{}`", source.href),
                escape_cell(&source.text),
            ),
            None => ("(seed)".to_string(), String::new()),
        };
        md.push_str(&format!(
            "| {} | `{}` | {} | {} | {} |\n",
            error.kind,
            error.page,
            escape_cell(&error.detail),
            from,
            text
        ));
    }

    md
}

/// Keeps table cells on one line and unbroken by pipes
fn escape_cell(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}
