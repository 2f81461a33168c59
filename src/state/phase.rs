//! Lifecycle phases of a single crawl
//!
//! A crawl moves Idle -> Running -> Done exactly once. Done is terminal.

use crate::RippleError;
use std::fmt;

/// Represents where a crawl is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Crawler built, nothing fetched yet
    Idle,

    /// Frontier is being drained
    Running,

    /// Frontier emptied, verdict available
    Done,
}

impl CrawlPhase {
    /// Returns true if this is the terminal phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Checks whether moving from this phase to `to` is allowed
    pub fn can_transition_to(&self, to: CrawlPhase) -> bool {
        matches!(
            (self, to),
            (Self::Idle, Self::Running) | (Self::Running, Self::Done)
        )
    }

    /// Moves to `to`, or fails with [`RippleError::InvalidTransition`]
    pub fn transition(&mut self, to: CrawlPhase) -> Result<(), RippleError> {
        if !self.can_transition_to(to) {
            return Err(RippleError::InvalidTransition { from: *self, to });
        }
        *self = to;
        Ok(())
    }
}

impl Default for CrawlPhase {
    fn default() -> Self {
        Self::Idle
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Done => "done",
        };
        write!(f, "{}", name)
    }
}
