//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlUnit`: one traversal work item, identified by `(path, fragment)`
//! - `SourceLink`: provenance of a discovered link, used in error reports
//! - `CrawlPhase`: the Idle -> Running -> Done lifecycle of a crawl

mod phase;
mod unit;

// Re-export main types
pub use phase::CrawlPhase;
pub use unit::{CrawlUnit, SourceLink, UnitKey};
