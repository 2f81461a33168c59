use std::fmt;

/// Where a link was found: the anchor text and the page containing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLink {
    /// Visible text of the anchor
    pub text: String,

    /// Path of the page the anchor was found on
    pub href: String,
}

impl SourceLink {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
        }
    }
}

impl fmt::Display for SourceLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "{}", self.href)
        } else {
            write!(f, "{} (\"{}\")", self.href, self.text)
        }
    }
}

/// Identity of a visitation target: `(path, fragment)`
pub type UnitKey = (String, Option<String>);

/// One traversal work item
///
/// Two units are the same visitation target iff their path and fragment are
/// equal. The source link is provenance for error reports only.
#[derive(Debug, Clone)]
pub struct CrawlUnit {
    path: String,
    fragment: Option<String>,
    source_link: Option<SourceLink>,
}

impl CrawlUnit {
    /// A seed unit, which has no source link
    pub fn seed(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            fragment: None,
            source_link: None,
        }
    }

    /// A unit discovered through a link on another page
    pub fn discovered(
        path: impl Into<String>,
        fragment: Option<String>,
        source_link: SourceLink,
    ) -> Self {
        Self {
            path: path.into(),
            fragment,
            source_link: Some(source_link),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn source_link(&self) -> Option<&SourceLink> {
        self.source_link.as_ref()
    }

    /// The dedup key of this unit
    pub fn key(&self) -> UnitKey {
        (self.path.clone(), self.fragment.clone())
    }
}

impl PartialEq for CrawlUnit {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.fragment == other.fragment
    }
}

impl Eq for CrawlUnit {}

impl fmt::Display for CrawlUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.fragment {
            Some(fragment) => write!(f, "{}#{}", self.path, fragment),
            None => write!(f, "{}", self.path),
        }
    }
}
