//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use site_chart::config::RunConfig;
use site_chart::crawler::{run_crawl, Crawler};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with no rate limit
fn create_test_config(max_depth: u32) -> RunConfig {
    RunConfig {
        max_depth,
        concurrency: 5,
        rate_limit: 0.0,
        user_agent: "TestBot/1.0".to_string(),
        ..RunConfig::default()
    }
}

/// Mounts an HTML page at `route`
async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_seed_and_linked_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><body><a href="/page1">Page 1</a></body></html>"#,
    )
    .await;
    mount_page(&mock_server, "/page1", "<html><body>No links</body></html>").await;

    let pages = run_crawl(&base_url, &create_test_config(1), CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(pages, vec![base_url.clone(), format!("{}/page1", base_url)]);
}

#[tokio::test]
async fn test_relative_links_are_resolved() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r##"<html><body>
        <a href="projects/chart">Chart</a>
        <a href="/contact">Contact</a>
        <a href="mailto:team@example.com">Mail</a>
        <a href="javascript:void(0)">Nothing</a>
        <a href="#top">Top</a>
        </body></html>"##,
    )
    .await;

    let pages = run_crawl(&base_url, &create_test_config(1), CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(
        pages,
        vec![
            base_url.clone(),
            format!("{}/contact", base_url),
            format!("{}/projects/chart", base_url),
        ]
    );
}

#[tokio::test]
async fn test_path_relative_links_use_page_directory() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/docs/intro",
        r#"<a href="projects/chart">Chart</a><a href="../about">About</a>"#,
    )
    .await;

    let seed = format!("{}/docs/intro", base_url);
    let pages = run_crawl(&seed, &create_test_config(1), CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(
        pages,
        vec![
            format!("{}/about", base_url),
            format!("{}/docs/intro", base_url),
            format!("{}/docs/projects/chart", base_url),
        ]
    );
}

#[tokio::test]
async fn test_depth_zero_fetches_only_seed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"<a href="/page1">Page 1</a>"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let pages = run_crawl(&base_url, &create_test_config(0), CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(pages, vec![base_url]);
}

#[tokio::test]
async fn test_cycles_are_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<a href="/b">B</a><a href="/a">Self</a><a href="/a/">Self again</a>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"<a href="/a#top">A</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let seed = format!("{}/a", base_url);
    let pages = run_crawl(&seed, &create_test_config(5), CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(
        pages,
        vec![format!("{}/a", base_url), format!("{}/b", base_url)]
    );
}

#[tokio::test]
async fn test_extra_depth_changes_nothing() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/one">One</a>"#).await;
    mount_page(&mock_server, "/one", r#"<a href="/two">Two</a>"#).await;
    mount_page(&mock_server, "/two", "<p>end</p>").await;

    let shallow = run_crawl(&base_url, &create_test_config(2), CancellationToken::new())
        .await
        .expect("Crawl failed");
    let deep = run_crawl(&base_url, &create_test_config(10), CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(shallow.len(), 3);
    assert_eq!(shallow, deep);
}

#[tokio::test]
async fn test_failed_pages_are_still_listed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/missing">Missing</a><a href="/broken">Broken</a>"#,
    )
    .await;

    // Linked from the 500 page, must never be discovered
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string(r#"<a href="/secret">Secret</a>"#),
        )
        .mount(&mock_server)
        .await;

    // "/missing" has no mock, so wiremock answers 404
    let pages = run_crawl(&base_url, &create_test_config(3), CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(
        pages,
        vec![
            base_url.clone(),
            format!("{}/broken", base_url),
            format!("{}/missing", base_url),
        ]
    );
}

#[tokio::test]
async fn test_foreign_origins_are_excluded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let body = format!(
        r#"<a href="https://example.org/elsewhere">Elsewhere</a>
        <a href="https://127.0.0.1/">Other scheme</a>
        <a href="{}/local">Local</a>"#,
        base_url
    );
    mount_page(&mock_server, "/", &body).await;
    mount_page(&mock_server, "/local", "<p>leaf</p>").await;

    let pages = run_crawl(&base_url, &create_test_config(2), CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(pages, vec![base_url.clone(), format!("{}/local", base_url)]);
}

#[tokio::test]
async fn test_links_are_scoped_to_redirect_target() {
    let origin_server = MockServer::start().await;
    let target_server = MockServer::start().await;
    let origin_url = origin_server.uri();
    let target_url = target_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/home", target_url).as_str()),
        )
        .mount(&origin_server)
        .await;

    // Only answers requests carrying the configured user agent
    Mock::given(method("GET"))
        .and(path("/home"))
        .and(header("user-agent", "TestBot/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<a href="/x">Local</a><a href="{}/y">Back to origin</a>"#,
            origin_url
        )))
        .expect(1)
        .mount(&target_server)
        .await;

    let pages = run_crawl(&origin_url, &create_test_config(1), CancellationToken::new())
        .await
        .expect("Crawl failed");

    let mut expected = vec![origin_url.clone(), format!("{}/x", target_url)];
    expected.sort();
    assert_eq!(pages, expected);
}

#[tokio::test]
async fn test_cancel_stops_slow_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<a href="/next">Next</a>"#)
                .set_delay(Duration::from_secs(20)),
        )
        .mount(&mock_server)
        .await;

    let cancel = CancellationToken::new();
    let crawler = Crawler::new(&create_test_config(3), cancel.clone()).expect("Crawler");

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let pages = tokio::time::timeout(Duration::from_secs(10), crawler.crawl(&base_url))
        .await
        .expect("Crawl did not stop after cancellation");

    assert!(started.elapsed() < Duration::from_secs(10));
    // The seed was taken for the first level before cancellation hit
    assert_eq!(pages, vec![base_url]);
}
