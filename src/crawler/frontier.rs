//! Frontier queue, visited set, and findings of one crawl
//!
//! All mutable traversal state lives in a single [`CrawlState`] owned by the
//! crawl loop.

use crate::output::ErrorRecord;
use crate::state::{CrawlUnit, UnitKey};
use std::collections::{HashSet, VecDeque};

/// The state a crawl mutates while it runs
///
/// Invariants:
/// - a key is in at most one of `pending` and `visited`
/// - `pending` holds exactly the keys of the units in `frontier`
/// - `visited` only grows
#[derive(Debug, Default)]
pub struct CrawlState {
    /// FIFO queue of units to visit (breadth-first)
    frontier: VecDeque<CrawlUnit>,

    /// Keys of the units currently in the frontier
    pending: HashSet<UnitKey>,

    /// Keys of the units already dequeued
    visited: HashSet<UnitKey>,

    /// Findings in discovery order
    errors: Vec<ErrorRecord>,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a unit at the tail of the frontier
    ///
    /// Returns false, leaving the frontier untouched, when a unit with the
    /// same `(path, fragment)` is pending or was already visited.
    pub fn enqueue(&mut self, unit: CrawlUnit) -> bool {
        let key = unit.key();
        if self.visited.contains(&key) || self.pending.contains(&key) {
            tracing::trace!("Already known: {}", unit);
            return false;
        }

        self.pending.insert(key);
        self.frontier.push_back(unit);
        true
    }

    /// Takes the next unit from the head of the frontier
    ///
    /// The unit counts as visited from this point on, so links a page makes
    /// to itself are not enqueued again while it is processed.
    pub fn dequeue(&mut self) -> Option<CrawlUnit> {
        let unit = self.frontier.pop_front()?;
        let key = unit.key();
        self.pending.remove(&key);
        self.visited.insert(key);
        Some(unit)
    }

    /// Appends a finding
    pub fn record_error(&mut self, error: ErrorRecord) {
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    /// Consumes the state, keeping only the findings
    pub fn into_errors(self) -> Vec<ErrorRecord> {
        self.errors
    }

    pub fn is_visited(&self, path: &str, fragment: Option<&str>) -> bool {
        self.visited
            .contains(&(path.to_string(), fragment.map(str::to_string)))
    }

    /// Returns the number of units in the frontier
    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    /// Returns the number of units visited so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Returns whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.frontier.is_empty()
    }
}
