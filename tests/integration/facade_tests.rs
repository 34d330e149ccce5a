//! End-to-end tests for the `Robots` facade
//!
//! A wiremock server plays the crawled site; the facade fetches robots.txt
//! from it over real HTTP. Crawl delays are observed through a manual clock.

use chrono::{TimeZone, Utc};
use robots_gate::config::Config;
use robots_gate::robots::{HttpFetcher, ManualClock};
use robots_gate::{Robots, RobotsDocument};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AGENT: &str = "TestBot/1.0";

async fn serve_robots(body: &str) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/plain"))
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_server
}

fn gate() -> (Robots<HttpFetcher, ManualClock>, ManualClock) {
    let clock = ManualClock::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap());
    let fetcher = HttpFetcher::new(Duration::from_secs(3)).expect("Failed to build fetcher");
    (Robots::with_parts(AGENT, fetcher, clock.clone()), clock)
}

#[tokio::test(flavor = "multi_thread")]
async fn test_policy_fetched_once_and_enforced() {
    let mock_server =
        serve_robots("User-agent: *\nDisallow: /private\nSitemap: https://x/a.xml").await;
    let base = mock_server.uri();

    let (allowed_public, allowed_private, other) = tokio::task::spawn_blocking(move || {
        let (mut robots, _clock) = gate();
        let public = robots.is_allowed(&format!("{}/public", base));
        let private = robots.is_allowed(&format!("{}/private/x", base));
        let other = robots.other_values(&format!("{}/", base));
        (public, private, other)
    })
    .await
    .unwrap();

    assert!(allowed_public);
    assert!(!allowed_private);
    assert_eq!(other["Sitemap"], vec!["https://x/a.xml"]);
    // `.expect(1)` on the mock is verified when the server drops
}

#[tokio::test(flavor = "multi_thread")]
async fn test_allow_overrides_disallow_over_http() {
    let mock_server = serve_robots("User-agent: *\nDisallow: /\nAllow: /public").await;
    let base = mock_server.uri();

    let results = tokio::task::spawn_blocking(move || {
        let (mut robots, _clock) = gate();
        (
            robots.is_allowed(&format!("{}/public", base)),
            robots.is_allowed(&format!("{}/other", base)),
        )
    })
    .await
    .unwrap();

    assert_eq!(results, (true, false));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_robots_allows_everything() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;
    let base = mock_server.uri();

    let results = tokio::task::spawn_blocking(move || {
        let (mut robots, _clock) = gate();
        (
            robots.is_allowed(&format!("{}/", base)),
            robots.is_allowed(&format!("{}/admin", base)),
            robots.other_values(&format!("{}/", base)).is_empty(),
        )
    })
    .await
    .unwrap();

    assert_eq!(results, (true, true, true));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_crawl_delay_over_http() {
    let mock_server = serve_robots("User-agent: TestBot\nCrawl-delay: 4").await;
    let base = mock_server.uri();

    let sleeps = tokio::task::spawn_blocking(move || {
        let (mut robots, clock) = gate();
        robots.is_allowed(&format!("{}/a", base));
        clock.advance(chrono::Duration::seconds(1));
        robots.is_allowed(&format!("{}/b", base));
        clock.sleeps()
    })
    .await
    .unwrap();

    assert_eq!(sleeps, vec![Duration::from_secs(3)]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_prefetched_document_avoids_network() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("User-agent: *\nAllow: /", "text/plain"))
        .expect(0)
        .mount(&mock_server)
        .await;
    let base = mock_server.uri();

    let allowed = tokio::task::spawn_blocking(move || {
        let (robots, _clock) = gate();
        let mut robots =
            robots.with_prefetched(RobotsDocument::ok("User-agent: *\nDisallow: /cached"));
        robots.is_allowed(&format!("{}/cached/page", base))
    })
    .await
    .unwrap();

    assert!(!allowed);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_from_config_sends_configured_agent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .and(wiremock::matchers::header("user-agent", "ConfigBot/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("User-agent: ConfigBot\nDisallow: /", "text/plain"))
        .expect(1)
        .mount(&mock_server)
        .await;
    let base = mock_server.uri();

    let allowed = tokio::task::spawn_blocking(move || {
        let mut robots = Robots::from_config(&Config::from_user_agent("ConfigBot")).unwrap();
        robots.is_allowed(&format!("{}/page", base))
    })
    .await
    .unwrap();

    assert!(!allowed);
}
