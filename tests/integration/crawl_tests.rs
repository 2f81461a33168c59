//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use doc_ripple::config::{parse_config, Config};
use doc_ripple::crawler::{crawl, Crawler};
use doc_ripple::output::generate_markdown_report;
use doc_ripple::{CrawlPhase, ErrorKind};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
///
/// `site_extra` is appended to the `[site]` table.
fn create_test_config(base_url: &str, site_extra: &str) -> Config {
    parse_config(&format!(
        r#"
[site]
base-url = "{}"
{}

[user-agent]
crawler-name = "TestBot"
crawler-version = "1.0.0"
"#,
        base_url, site_extra
    ))
    .expect("Failed to parse test config")
}

/// Mounts an HTML page that is expected to be requested exactly once
async fn mount_page(server: &MockServer, page_path: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_missing_page_reported_with_source() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/docs",
        200,
        r#"<html><body>
            <a href="/docs/agent">Agent</a>
            <a href="/docs/missing">Missing page</a>
        </body></html>"#,
    )
    .await;
    mount_page(&mock_server, "/docs/agent", 200, "<h1>Agent</h1>").await;
    mount_page(&mock_server, "/docs/missing", 404, "<h1>Not Found</h1>").await;

    let config = create_test_config(&mock_server.uri(), "");
    let report = crawl(&config).await.expect("Crawl failed");

    assert!(!report.passed());
    assert_eq!(report.errors.len(), 1);

    let error = &report.errors[0];
    assert_eq!(error.kind, ErrorKind::PageLoadFailed);
    assert_eq!(error.page, "/docs/missing");
    assert_eq!(error.detail, "Page returned 404");

    let source = error.source_link.as_ref().expect("Missing source link");
    assert_eq!(source.href, "/docs");
    assert_eq!(source.text, "Missing page");

    assert_eq!(report.stats.pages_fetched, 3);
    assert_eq!(report.stats.status_counts.get(&404), Some(&1));
}

#[tokio::test]
async fn test_forbidden_pages_are_accepted() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/docs",
        200,
        r#"<a href="/docs/enterprise">Enterprise</a>"#,
    )
    .await;
    mount_page(&mock_server, "/docs/enterprise", 403, "<p>Sign in</p>").await;

    let config = create_test_config(&mock_server.uri(), "");
    let report = crawl(&config).await.expect("Crawl failed");

    assert!(report.passed());
    assert_eq!(report.stats.status_counts.get(&403), Some(&1));
}

#[tokio::test]
async fn test_fragment_checks() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/docs",
        200,
        r#"<a href="/docs/agent#install">Install</a>
           <a href="/docs/agent#uninstall">Uninstall</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/docs/agent"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r##"<h2 id="install">Install<a class="Docs__heading__anchor" href="#install"></a></h2>"##,
        ))
        .expect(2)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "");
    let report = crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.errors.len(), 1);
    let error = &report.errors[0];
    assert_eq!(error.kind, ErrorKind::FragmentNotFound);
    assert_eq!(error.page, "/docs/agent");
    assert_eq!(error.detail, "#uninstall");
    assert_eq!(error.source_link.as_ref().unwrap().text, "Uninstall");
}

#[tokio::test]
async fn test_redirects_are_followed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/docs",
        200,
        r#"<a href="/docs/old-name#setup">Setup</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/docs/old-name"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/docs/new-name", base_url).as_str()),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/docs/new-name", 200, r#"<h2 id="setup">Setup</h2>"#).await;

    let config = create_test_config(&base_url, "");
    let report = crawl(&config).await.expect("Crawl failed");

    assert!(report.passed(), "unexpected findings: {:?}", report.errors);
    assert_eq!(report.stats.status_counts.get(&301), None);
}

#[tokio::test]
async fn test_cycles_fetch_each_page_once() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/docs",
        200,
        r#"<a href="/docs/a">A</a><a href="/docs/b">B</a>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/docs/a",
        200,
        r#"<a href="b">B</a><a href="/docs">Home</a><a href="a">Self</a>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/docs/b",
        200,
        r#"<a href="/docs/a">A</a><a href="/docs">Home</a>"#,
    )
    .await;

    let config = create_test_config(&mock_server.uri(), "");
    let report = crawl(&config).await.expect("Crawl failed");

    assert!(report.passed());
    assert_eq!(report.stats.pages_fetched, 3);
    // Expectations are verified when the mock server is dropped
}

#[tokio::test]
async fn test_external_and_non_http_links_ignored() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/docs",
        200,
        &format!(
            r#"<a href="https://github.com/buildkite/agent">GitHub</a>
               <a href="mailto:support@buildkite.com">Email</a>
               <a href="javascript:void(0)">Menu</a>
               <a href="{}/docs/local">Absolute local</a>"#,
            base_url
        ),
    )
    .await;
    mount_page(&mock_server, "/docs/local", 200, "").await;

    let config = create_test_config(&base_url, "");
    let report = crawl(&config).await.expect("Crawl failed");

    assert!(report.passed());
    assert_eq!(report.stats.pages_fetched, 2);
    assert_eq!(report.stats.total_skipped(), 3);
}

#[tokio::test]
async fn test_pages_outside_docs_prefix_not_expanded() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/docs", 200, r#"<a href="/pricing">Pricing</a>"#).await;
    mount_page(&mock_server, "/pricing", 200, r#"<a href="/careers">Careers</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/careers"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "");
    let report = crawl(&config).await.expect("Crawl failed");

    assert!(report.passed());
}

#[tokio::test]
async fn test_custom_root_and_extra_seeds() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/handbook", 200, r#"<a href="/handbook/intro">Intro</a>"#).await;
    mount_page(&mock_server, "/handbook/intro", 200, "").await;
    mount_page(&mock_server, "/handbook/orphan", 200, "").await;

    let config = create_test_config(
        &mock_server.uri(),
        r#"root = "/handbook"
docs-prefix = "/handbook"
extra-seeds = ["/handbook/orphan"]"#,
    );
    let report = crawl(&config).await.expect("Crawl failed");

    assert!(report.passed());
    assert_eq!(report.root, "/handbook");
    assert_eq!(report.stats.pages_fetched, 3);
}

#[tokio::test]
async fn test_user_agent_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/docs"))
        .and(header("user-agent", "TestBot/1.0.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<h1>Docs</h1>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "");
    let report = crawl(&config).await.expect("Crawl failed");

    assert!(report.passed());
}

#[tokio::test]
async fn test_unreachable_server_reported() {
    // Nothing listens on port 1
    let config = create_test_config("http://127.0.0.1:1", "");
    let mut crawler = Crawler::from_config(&config).expect("Failed to build crawler");
    let report = crawler.run().await.expect("Crawl failed");

    assert_eq!(crawler.phase(), CrawlPhase::Done);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].kind, ErrorKind::PageLoadFailed);
    assert!(report.errors[0].detail.starts_with("Request failed"));
    assert_eq!(report.stats.request_failures, 1);
}

#[tokio::test]
async fn test_markdown_report_written() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/docs",
        200,
        r#"<a href="/docs/gone">Gone | removed</a>"#,
    )
    .await;
    mount_page(&mock_server, "/docs/gone", 410, "").await;

    let config = create_test_config(&mock_server.uri(), "");
    let report = crawl(&config)
        .await
        .expect("Crawl failed")
        .with_config_hash("abc123");

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let report_path = dir.path().join("report.md");
    generate_markdown_report(&report, &report_path).expect("Failed to write report");

    let markdown = std::fs::read_to_string(&report_path).expect("Failed to read report");
    assert!(markdown.contains("# Doc-Ripple Link Report"));
    assert!(markdown.contains("**Verdict**: FAIL"));
    assert!(markdown.contains("**Config Hash**: abc123"));
    assert!(markdown.contains("`/docs/gone`"));
    assert!(markdown.contains("Page returned 410"));
    assert!(markdown.contains("Gone \\| removed"));
}

#[tokio::test]
async fn test_status_kept_when_body_unreadable() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/docs", 200, r#"<a href="/docs/private">Private</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/docs/private"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("content-encoding", "gzip")
                .set_body_bytes(b"definitely not gzip".to_vec()),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "");
    let report = crawl(&config).await.expect("Crawl failed");

    assert!(report.passed(), "unexpected findings: {:?}", report.errors);
    assert_eq!(report.stats.status_counts.get(&403), Some(&1));
    assert_eq!(report.stats.request_failures, 0);
}
