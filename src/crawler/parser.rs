//! HTML parser for extracting anchors and fragment targets
//!
//! A fetched body is parsed once into a [`ParsedPage`] that owns everything
//! the crawl needs afterwards: the anchors to consider for traversal, and the
//! set of identifiers a fragment may point at.

use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

/// An `<a href>` element as seen by the crawler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Raw value of the href attribute
    pub href: String,

    /// Visible text with whitespace collapsed
    pub text: String,

    /// Entries of the class attribute
    pub classes: Vec<String>,
}

impl Anchor {
    pub fn new(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            text: text.into(),
            classes: Vec::new(),
        }
    }

    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// What the crawler keeps from a fetched document
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// All anchors with an href, in document order
    pub anchors: Vec<Anchor>,

    /// Values of every `id` attribute and every `<a name>`
    fragment_targets: HashSet<String>,
}

impl ParsedPage {
    /// Checks whether `fragment` names an element on the page
    ///
    /// A fragment matches an element whose `id` equals it, or a legacy
    /// `<a name="...">` target.
    pub fn has_fragment_target(&self, fragment: &str) -> bool {
        self.fragment_targets.contains(fragment)
    }
}

/// Parses HTML content into anchors and fragment targets
///
/// Parsing is lenient: malformed markup yields whatever html5ever recovers.
///
/// # Example
///
/// ```
/// use doc_ripple::crawler::parse_page;
///
/// let html = r#"<h2 id="install">Install</h2><a href="/docs/agent">Agent</a>"#;
/// let page = parse_page(html);
/// assert!(page.has_fragment_target("install"));
/// assert_eq!(page.anchors[0].href, "/docs/agent");
/// ```
pub fn parse_page(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        anchors: extract_anchors(&document),
        fragment_targets: extract_fragment_targets(&document),
    }
}

/// Extracts every `<a>` that carries an href
fn extract_anchors(document: &Html) -> Vec<Anchor> {
    let mut anchors = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                anchors.push(Anchor {
                    href: href.to_string(),
                    text: collapsed_text(&element),
                    classes: element.value().classes().map(str::to_string).collect(),
                });
            }
        }
    }

    anchors
}

/// Collects the identifiers fragments can resolve to
fn extract_fragment_targets(document: &Html) -> HashSet<String> {
    let mut targets = HashSet::new();

    if let Ok(id_selector) = Selector::parse("[id]") {
        for element in document.select(&id_selector) {
            if let Some(id) = element.value().attr("id") {
                targets.insert(id.to_string());
            }
        }
    }

    if let Ok(name_selector) = Selector::parse("a[name]") {
        for element in document.select(&name_selector) {
            if let Some(name) = element.value().attr("name") {
                targets.insert(name.to_string());
            }
        }
    }

    targets
}

fn collapsed_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
