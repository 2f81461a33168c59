//! Doc-Ripple main entry point
//!
//! This is the command-line interface for the Doc-Ripple link checker.

use anyhow::Context;
use clap::Parser;
use doc_ripple::config::{load_config_with_hash, validate, Config};
use doc_ripple::crawler::crawl;
use doc_ripple::output::{generate_markdown_report, print_report};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Doc-Ripple: a link integrity crawler for documentation sites
///
/// Doc-Ripple walks a documentation site breadth-first from a root page,
/// checks that every internal link loads with an accepted status and that
/// every linked section exists, then reports what is broken.
#[derive(Parser, Debug)]
#[command(name = "doc-ripple")]
#[command(version)]
#[command(about = "A link integrity crawler for documentation sites", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Start the crawl at this path instead of the configured root
    #[arg(long, value_name = "PATH")]
    root: Option<String>,

    /// Write a markdown report to this file
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if let Some(root) = cli.root {
        config.site.root = root;
        validate(&config).context("Invalid --root override")?;
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(ExitCode::SUCCESS);
    }

    let report_path = cli
        .report
        .or_else(|| config.output.report_path.as_ref().map(PathBuf::from));

    handle_crawl(&config, config_hash, report_path.as_deref()).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("doc_ripple=info,warn"),
            1 => EnvFilter::new("doc_ripple=debug,info"),
            2 => EnvFilter::new("doc_ripple=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Doc-Ripple Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!(
        "  Local host: {}",
        config.site.effective_local_host().unwrap_or_default()
    );
    println!("  Root: {}", config.site.root);
    println!("  Docs prefix: {}", config.site.docs_prefix);

    println!("\nExtra Seeds ({}):", config.site.extra_seeds.len());
    for seed in &config.site.extra_seeds {
        println!("  - {}", seed);
    }

    println!("\nChecks:");
    println!("  Accepted statuses: {:?}", config.check.accepted_statuses);
    println!(
        "  Heading anchor class: {}",
        config.check.heading_anchor_class
    );
    println!("  Request delay: {}ms", config.check.request_delay);
    println!("  Timeout: {}s", config.check.timeout);

    println!("\nUser Agent:");
    println!(
        "  {}/{}",
        config.user_agent.crawler_name, config.user_agent.crawler_version
    );

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start crawling with {} seed path(s)",
        1 + config.site.extra_seeds.len()
    );
}

/// Handles the main crawl operation
///
/// Exits with failure when the crawl finds broken links.
async fn handle_crawl(
    config: &Config,
    config_hash: String,
    report_path: Option<&Path>,
) -> anyhow::Result<ExitCode> {
    tracing::info!(
        "Checking {}{} (links followed under {})",
        config.site.base_url.trim_end_matches('/'),
        config.site.root,
        config.site.docs_prefix
    );

    let report = crawl(config)
        .await
        .context("Crawl failed")?
        .with_config_hash(config_hash);

    print_report(&report);

    if let Some(path) = report_path {
        generate_markdown_report(&report, path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        println!("\n✓ Report written to: {}", path.display());
    }

    if report.passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
