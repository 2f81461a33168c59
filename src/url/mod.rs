//! URL handling module for Doc-Ripple
//!
//! This module provides href resolution, host extraction, and the visit
//! filter that decides which discovered links are traversed.

mod host;
mod resolve;

use crate::config::Config;
use crate::crawler::Anchor;
use crate::ConfigError;

// Re-export main functions
pub use host::{extract_host, is_local_host};
pub use resolve::{resolve, ResolvedLink};

/// Outcome of the visit filter for one discovered link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VisitDecision {
    /// Same-site http(s) link - enqueue it
    Follow,
    /// Non-http(s) scheme such as mailto: or javascript:
    SkipScheme,
    /// Link to another host - neither followed nor reported
    SkipExternal,
    /// Heading permalink that always points at its own heading
    SkipCosmetic,
}

impl VisitDecision {
    /// Returns true if the link should be enqueued
    pub fn should_follow(&self) -> bool {
        matches!(self, Self::Follow)
    }

    /// Short label used in logs and reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Follow => "followed",
            Self::SkipScheme => "non-http scheme",
            Self::SkipExternal => "external host",
            Self::SkipCosmetic => "heading anchor",
        }
    }
}

/// Decides whether resolved links are eligible for traversal
#[derive(Debug, Clone)]
pub struct VisitFilter {
    local_host: String,
    heading_anchor_class: String,
}

impl VisitFilter {
    /// Creates a filter for the given local host and heading-anchor class
    pub fn new(local_host: impl Into<String>, heading_anchor_class: impl Into<String>) -> Self {
        Self {
            local_host: local_host.into().to_lowercase(),
            heading_anchor_class: heading_anchor_class.into(),
        }
    }

    /// Builds the filter from the site and check sections of a config
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let local_host = config.site.effective_local_host().ok_or_else(|| {
            ConfigError::InvalidUrl(format!("base-url '{}' has no host", config.site.base_url))
        })?;

        Ok(Self::new(local_host, config.check.heading_anchor_class.clone()))
    }

    /// The host links must name (if they name one) to be followed
    pub fn local_host(&self) -> &str {
        &self.local_host
    }

    /// Classifies a resolved link
    ///
    /// Rules are checked in order and the first match decides:
    /// 1. Scheme other than http/https
    /// 2. Host other than the local host
    /// 3. Anchor carrying the heading-anchor class (matched as one token of
    ///    the class attribute, so extra classes do not hide it)
    /// 4. Otherwise follow
    ///
    /// # Examples
    ///
    /// ```
    /// use doc_ripple::crawler::Anchor;
    /// use doc_ripple::url::{resolve, VisitDecision, VisitFilter};
    ///
    /// let filter = VisitFilter::new("buildkite.localhost", "Docs__heading__anchor");
    /// let anchor = Anchor::new("mailto:support@buildkite.com", "Email us");
    /// let link = resolve("/docs", &anchor.href).unwrap();
    /// assert_eq!(filter.decide(&link, &anchor), VisitDecision::SkipScheme);
    /// ```
    pub fn decide(&self, link: &ResolvedLink, anchor: &Anchor) -> VisitDecision {
        // Priority 1: scheme
        if let Some(scheme) = &link.scheme {
            if scheme != "http" && scheme != "https" {
                return VisitDecision::SkipScheme;
            }
        }

        // Priority 2: host
        if let Some(host) = &link.host {
            if !is_local_host(host, &self.local_host) {
                return VisitDecision::SkipExternal;
            }
        }

        // Priority 3: heading permalinks
        if anchor.has_class(&self.heading_anchor_class) {
            return VisitDecision::SkipCosmetic;
        }

        VisitDecision::Follow
    }
}
