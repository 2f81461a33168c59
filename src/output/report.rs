//! Crawl findings and the final verdict

use crate::output::stats::CrawlStatistics;
use crate::state::{CrawlUnit, SourceLink};
use chrono::{DateTime, Utc};
use std::fmt;

/// The two kinds of broken navigation the crawler reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorKind {
    /// The page answered with a status outside the accepted set,
    /// or could not be fetched at all
    PageLoadFailed,

    /// The page loaded but has no element for the linked fragment
    FragmentNotFound,
}

impl ErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::PageLoadFailed => "Page load failed",
            Self::FragmentNotFound => "Section not found",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One finding, tied to the link that led the crawler there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub kind: ErrorKind,

    /// Path of the page that failed
    pub page: String,

    /// "Page returned 404", a transport error, or the missing "#section"
    pub detail: String,

    /// `None` for seeds
    pub source_link: Option<SourceLink>,
}

impl ErrorRecord {
    /// A page answered with an unaccepted status
    pub fn unexpected_status(unit: &CrawlUnit, status: u16) -> Self {
        Self {
            kind: ErrorKind::PageLoadFailed,
            page: unit.path().to_string(),
            detail: format!("Page returned {}", status),
            source_link: unit.source_link().cloned(),
        }
    }

    /// The request for a page failed before any status was received
    pub fn request_failed(unit: &CrawlUnit, reason: impl fmt::Display) -> Self {
        Self {
            kind: ErrorKind::PageLoadFailed,
            page: unit.path().to_string(),
            detail: format!("Request failed: {}", reason),
            source_link: unit.source_link().cloned(),
        }
    }

    /// The linked fragment has no target on the page
    pub fn fragment_not_found(unit: &CrawlUnit, fragment: &str) -> Self {
        Self {
            kind: ErrorKind::FragmentNotFound,
            page: unit.path().to_string(),
            detail: format!("#{}", fragment),
            source_link: unit.source_link().cloned(),
        }
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.kind, self.page, self.detail)?;
        if let Some(source) = &self.source_link {
            write!(f, ", linked from {}", source)?;
        }
        Ok(())
    }
}

/// Everything a finished crawl produced
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Path the crawl was seeded with
    pub root: String,

    /// Hash of the configuration file, when the crawl was driven by one
    pub config_hash: Option<String>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Findings in discovery order
    pub errors: Vec<ErrorRecord>,

    pub stats: CrawlStatistics,
}

impl CrawlReport {
    /// The verdict: true iff no finding was recorded
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of findings of the given kind
    pub fn count(&self, kind: ErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind == kind).count()
    }

    /// Stamps the report with a configuration hash
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }
}
