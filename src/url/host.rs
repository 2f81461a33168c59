use url::Url;

/// Extracts the host from a URL, lowercased
///
/// The port is not part of the host, so `http://localhost:3000` and
/// `http://localhost` share the host `localhost`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use doc_ripple::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("mailto:someone@example.com").unwrap();
/// assert_eq!(extract_host(&url), None);
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks whether `host` names the local site
pub fn is_local_host(host: &str, local_host: &str) -> bool {
    host.eq_ignore_ascii_case(local_host)
}
