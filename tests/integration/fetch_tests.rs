//! Integration tests for robots.txt retrieval
//!
//! These tests use wiremock to serve robots.txt and drive the blocking
//! `HttpFetcher` from a `spawn_blocking` task.

use robots_gate::robots::{HttpFetcher, RobotsFetcher};
use robots_gate::{FetchError, RobotsDocument};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AGENT: &str = "TestBot/1.0 (+https://example.com/bot)";

/// Runs a blocking fetch for `<server>/some/page` off the async runtime
async fn fetch_from(server: &MockServer, timeout: Duration) -> Option<RobotsDocument> {
    let target = Url::parse(&format!("{}/some/page?x=1", server.uri())).expect("mock server URI");
    tokio::task::spawn_blocking(move || {
        let fetcher = HttpFetcher::new(timeout).expect("Failed to build fetcher");
        fetcher.fetch(&target, AGENT)
    })
    .await
    .expect("fetch task panicked")
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_plain_text_robots() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .and(header("user-agent", AGENT))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("User-agent: *\nDisallow: /admin", "text/plain"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let document = fetch_from(&mock_server, Duration::from_secs(3))
        .await
        .expect("robots.txt should be fetched");

    assert_eq!(document.status, 200);
    assert_eq!(document.body, "User-agent: *\nDisallow: /admin");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_accepts_charset_parameter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("User-agent: *\nAllow: /", "text/plain; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    let document = fetch_from(&mock_server, Duration::from_secs(3)).await;
    assert!(document.is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404).set_body_raw("not found", "text/plain"))
        .mount(&mock_server)
        .await;

    assert!(fetch_from(&mock_server, Duration::from_secs(3)).await.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    assert!(fetch_from(&mock_server, Duration::from_secs(3)).await.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_wrong_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>User-agent: *</body></html>", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let target = Url::parse(&format!("{}/", mock_server.uri())).unwrap();
    let result = tokio::task::spawn_blocking(move || {
        HttpFetcher::new(Duration::from_secs(3))
            .unwrap()
            .try_fetch(&target, AGENT)
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(FetchError::ContentType { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_follows_redirect() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/live-robots.txt", mock_server.uri()).as_str()),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/live-robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("User-agent: *\nDisallow: /x", "text/plain"))
        .mount(&mock_server)
        .await;

    let document = fetch_from(&mock_server, Duration::from_secs(3))
        .await
        .expect("redirect should be followed");
    assert_eq!(document.body, "User-agent: *\nDisallow: /x");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("User-agent: *\nDisallow: /", "text/plain")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let target = Url::parse(&format!("{}/", mock_server.uri())).unwrap();
    let result = tokio::task::spawn_blocking(move || {
        HttpFetcher::new(Duration::from_secs(1))
            .unwrap()
            .try_fetch(&target, AGENT)
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(FetchError::Timeout { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_connection_refused() {
    // Reserve a port, then free it so nothing is listening there
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let target = Url::parse(&format!("http://127.0.0.1:{}/page", port)).unwrap();
    let document = tokio::task::spawn_blocking(move || {
        HttpFetcher::new(Duration::from_secs(2))
            .unwrap()
            .fetch(&target, AGENT)
    })
    .await
    .unwrap();

    assert!(document.is_none());
}
