use crate::url::extract_host;
use percent_encoding::percent_decode_str;
use url::{ParseError, Url};

/// Origin that anchors relative resolution
///
/// Only the path and fragment of a resolved link are kept, so the origin never
/// leaks into results. `.invalid` is reserved and can never be fetched.
const RESOLUTION_ORIGIN: &str = "http://ripple.invalid/";

/// A link href resolved against the page it was found on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// Absolute site path, without query or fragment
    pub path: String,

    /// Percent-decoded fragment, `None` when absent or empty
    pub fragment: Option<String>,

    /// Host named by the href itself (absolute or scheme-relative hrefs only)
    pub host: Option<String>,

    /// Scheme named by the href itself (absolute hrefs only)
    pub scheme: Option<String>,
}

/// Resolves an href found on `current_path` into a site path and fragment
///
/// # Resolution Rules
///
/// 1. `#section` keeps `current_path` and takes the fragment
/// 2. `getting-started` resolves against the directory of `current_path`
/// 3. `/docs/agent` replaces the path entirely
/// 4. `https://host/path` keeps its path and reports its host and scheme so
///    the visit filter can reject it
/// 5. Query strings are dropped; dot segments are removed
///
/// Returns `None` for hrefs that cannot be parsed. Those are not followable
/// and are not reported.
///
/// # Examples
///
/// ```
/// use doc_ripple::url::resolve;
///
/// let link = resolve("/docs/tutorials/other", "getting-started").unwrap();
/// assert_eq!(link.path, "/docs/tutorials/getting-started");
/// assert_eq!(link.fragment, None);
///
/// let link = resolve("/docs/agent", "#install").unwrap();
/// assert_eq!(link.path, "/docs/agent");
/// assert_eq!(link.fragment.as_deref(), Some("install"));
/// ```
pub fn resolve(current_path: &str, href: &str) -> Option<ResolvedLink> {
    let href = href.trim();
    let origin = Url::parse(RESOLUTION_ORIGIN).ok()?;
    let page = origin.join(current_path).ok()?;

    let (target, scheme, host) = match Url::parse(href) {
        Ok(url) => {
            let scheme = Some(url.scheme().to_string());
            let host = extract_host(&url);
            (url, scheme, host)
        }
        Err(ParseError::RelativeUrlWithoutBase) => {
            let url = page.join(href).ok()?;
            // Scheme-relative hrefs name their own host
            let host = if href.starts_with("//") {
                extract_host(&url)
            } else {
                None
            };
            (url, None, host)
        }
        Err(_) => return None,
    };

    Some(ResolvedLink {
        path: target.path().to_string(),
        fragment: target.fragment().and_then(decode_fragment),
        host,
        scheme,
    })
}

/// Percent-decodes a fragment; the empty fragment of `href="#"` is dropped
fn decode_fragment(raw: &str) -> Option<String> {
    let decoded = percent_decode_str(raw).decode_utf8_lossy();
    if decoded.is_empty() {
        None
    } else {
        Some(decoded.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_fragment_keeps_current_path() {
        let link = resolve("/docs/agent", "#install").unwrap();
        assert_eq!(link.path, "/docs/agent");
        assert_eq!(link.fragment.as_deref(), Some("install"));
        assert_eq!(link.host, None);
        assert_eq!(link.scheme, None);
    }

    #[test]
    fn test_relative_against_directory() {
        let link = resolve("/docs/tutorials/other", "getting-started").unwrap();
        assert_eq!(link.path, "/docs/tutorials/getting-started");
    }

    #[test]
    fn test_relative_from_directory_with_trailing_slash() {
        let link = resolve("/docs/tutorials/", "getting-started").unwrap();
        assert_eq!(link.path, "/docs/tutorials/getting-started");
    }

    #[test]
    fn test_parent_segments() {
        let link = resolve("/docs/tutorials/other", "../agent/v3").unwrap();
        assert_eq!(link.path, "/docs/agent/v3");

        let link = resolve("/docs", "../../../x").unwrap();
        assert_eq!(link.path, "/x");
    }

    #[test]
    fn test_absolute_path_ignores_current() {
        let link = resolve("/docs/tutorials/other", "/docs/agent").unwrap();
        assert_eq!(link.path, "/docs/agent");
        assert_eq!(link.host, None);
    }

    #[test]
    fn test_absolute_path_with_fragment() {
        let link = resolve("/docs", "/docs/agent#install").unwrap();
        assert_eq!(link.path, "/docs/agent");
        assert_eq!(link.fragment.as_deref(), Some("install"));
    }

    #[test]
    fn test_query_is_dropped() {
        let link = resolve("/docs", "/docs/apis?page=2#list").unwrap();
        assert_eq!(link.path, "/docs/apis");
        assert_eq!(link.fragment.as_deref(), Some("list"));
    }

    #[test]
    fn test_absolute_url_reports_host_and_scheme() {
        let link = resolve("/docs", "https://GitHub.com/buildkite/docs#readme").unwrap();
        assert_eq!(link.path, "/buildkite/docs");
        assert_eq!(link.host.as_deref(), Some("github.com"));
        assert_eq!(link.scheme.as_deref(), Some("https"));
        assert_eq!(link.fragment.as_deref(), Some("readme"));
    }

    #[test]
    fn test_scheme_relative_reports_host() {
        let link = resolve("/docs", "//cdn.example.com/asset").unwrap();
        assert_eq!(link.path, "/asset");
        assert_eq!(link.host.as_deref(), Some("cdn.example.com"));
        assert_eq!(link.scheme, None);
    }

    #[test]
    fn test_mailto_reports_scheme() {
        let link = resolve("/docs", "mailto:support@example.com").unwrap();
        assert_eq!(link.scheme.as_deref(), Some("mailto"));
        assert_eq!(link.host, None);
    }

    #[test]
    fn test_empty_fragment_is_none() {
        let link = resolve("/docs/agent", "#").unwrap();
        assert_eq!(link.path, "/docs/agent");
        assert_eq!(link.fragment, None);
    }

    #[test]
    fn test_fragment_is_percent_decoded() {
        let link = resolve("/docs", "/docs/agent#caf%C3%A9-setup").unwrap();
        assert_eq!(link.fragment.as_deref(), Some("café-setup"));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let link = resolve("/docs", "  /docs/agent \n").unwrap();
        assert_eq!(link.path, "/docs/agent");
    }

    #[test]
    fn test_empty_href_is_current_page() {
        let link = resolve("/docs/agent", "").unwrap();
        assert_eq!(link.path, "/docs/agent");
        assert_eq!(link.fragment, None);
    }

    #[test]
    fn test_double_slash_path_keeps_href_host() {
        let link = resolve("/docs", "http://buildkite.localhost//evil.example/x").unwrap();
        assert_eq!(link.host.as_deref(), Some("buildkite.localhost"));
        assert_eq!(link.path, "//evil.example/x");
    }

    #[test]
    fn test_malformed_href_is_skipped() {
        assert_eq!(resolve("/docs", "http://[::1"), None);
        assert_eq!(resolve("/docs", "http://exa mple.com/"), None);
    }
}
