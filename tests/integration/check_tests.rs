//! Integration tests for the liveness checker

use site_chart::config::RunConfig;
use site_chart::{Checker, LinkStatus};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_checker() -> Checker {
    let config = RunConfig {
        concurrency: 4,
        rate_limit: 0.0,
        ..RunConfig::default()
    };
    Checker::new(&config, CancellationToken::new()).expect("Failed to build checker")
}

#[tokio::test]
async fn test_live_and_dead_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("HEAD"))
        .and(path("/live"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let live = format!("{}/live", base_url);
    let gone = format!("{}/gone", base_url);

    let report = create_checker()
        .check(vec![gone.clone(), live.clone()])
        .await;

    assert_eq!(report.live.len(), 1);
    assert_eq!(report.live[0].url, live);
    assert_eq!(report.live[0].code, 200);
    assert_eq!(report.live[0].status, LinkStatus::Live);

    assert_eq!(report.dead.len(), 1);
    assert_eq!(report.dead[0].url, gone);
    assert_eq!(report.dead[0].code, 404);
    assert_eq!(report.dead[0].status, LinkStatus::Dead);
}

#[tokio::test]
async fn test_unreachable_urls_are_dead_with_code_zero() {
    let report = create_checker()
        .check(vec!["http://invalid-url:".to_string(), "not a url".to_string()])
        .await;

    assert!(report.live.is_empty());
    assert_eq!(report.dead.len(), 2);
    for result in &report.dead {
        assert_eq!(result.code, 0);
        assert_eq!(result.status, LinkStatus::Dead);
    }

    let urls: Vec<&str> = report.dead.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, vec!["http://invalid-url:", "not a url"]);
}

#[tokio::test]
async fn test_groups_are_sorted_by_url() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let urls: Vec<String> = ["/c", "/a", "/b"]
        .iter()
        .map(|p| format!("{}{}", base_url, p))
        .collect();

    let report = create_checker().check(urls).await;

    let live: Vec<String> = report.live.iter().map(|r| r.url.clone()).collect();
    assert_eq!(
        live,
        vec![
            format!("{}/a", base_url),
            format!("{}/b", base_url),
            format!("{}/c", base_url),
        ]
    );
    assert!(report.dead.is_empty());
}

#[tokio::test]
async fn test_urls_are_checked_as_given() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("HEAD"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&mock_server)
        .await;

    let url = format!("{}/page#section", base_url);
    let report = create_checker().check(vec![url.clone(), url.clone()]).await;

    assert_eq!(report.live.len(), 2);
    assert!(report.live.iter().all(|r| r.url == url));
}

#[tokio::test]
async fn test_check_sends_configured_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/agent"))
        .and(header("user-agent", "CheckBot/2.0"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = RunConfig {
        rate_limit: 0.0,
        user_agent: "CheckBot/2.0".to_string(),
        ..RunConfig::default()
    };
    let checker = Checker::new(&config, CancellationToken::new()).expect("Failed to build checker");

    let url = format!("{}/agent", mock_server.uri());
    let report = checker.check(vec![url.clone()]).await;

    assert_eq!(report.live.len(), 1);
    assert_eq!(report.live[0].url, url);
    assert_eq!(report.live[0].code, 200);
}
