//! Network- and browser-backed checks in isolation.

mod support;

use prd_validator::CheckStatus;
use prd_validator_runtime::checks::browser::{check_performance, check_responsive_design};
use prd_validator_runtime::checks::network::{
    check_accessibility, check_links, link_targets, LinkTarget,
};
use prd_validator_runtime::config::{BrowserOptions, RESPONSIVE_VIEWPORTS};
use prd_validator_runtime::dom::Document;
use prd_validator_runtime::http_client::HttpClient;
use prd_validator_runtime::renderer::{BrowserLauncher, RenderContext};
use std::time::Duration;
use support::FakeBrowser;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(2);

async fn open_page(browser: &FakeBrowser) -> Box<dyn RenderContext> {
    let renderer = browser.launch(&BrowserOptions::default()).await.unwrap();
    renderer.new_context().await.unwrap()
}

async fn head_server(ok: usize, broken: usize) -> (MockServer, Vec<LinkTarget>) {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut targets = Vec::new();
    for _ in 0..ok {
        targets.push(LinkTarget::Probe(format!("{}/ok", server.uri())));
    }
    for _ in 0..broken {
        targets.push(LinkTarget::Probe(format!("{}/broken", server.uri())));
    }
    (server, targets)
}

#[tokio::test]
async fn test_accessibility_status_codes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/up"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let http = HttpClient::new().unwrap();

    let up = check_accessibility(&http, &format!("{}/up", server.uri()), TIMEOUT).await;
    assert_eq!(up.status, CheckStatus::Passed);
    assert_eq!(up.details, "Status code: 200");

    let down = check_accessibility(&http, &format!("{}/down", server.uri()), TIMEOUT).await;
    assert_eq!(down.status, CheckStatus::Failed);
    assert_eq!(down.details, "Status code: 503");
}

#[tokio::test]
async fn test_accessibility_timeout_is_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;
    let http = HttpClient::new().unwrap();

    let r = check_accessibility(&http, &server.uri(), Duration::from_millis(200)).await;
    assert_eq!(r.status, CheckStatus::Failed);
    assert!(r.details.starts_with("Error: "));
}

#[tokio::test]
async fn test_links_grading() {
    let http = HttpClient::new().unwrap();

    let (_server, targets) = head_server(4, 0).await;
    let r = check_links(&http, &targets, TIMEOUT).await;
    assert_eq!(r.status, CheckStatus::Passed);
    assert_eq!(r.details, "Valid: 4, Broken: 0");

    let (_server, targets) = head_server(3, 2).await;
    let r = check_links(&http, &targets, TIMEOUT).await;
    assert_eq!(r.status, CheckStatus::Warning);
    assert_eq!(r.details, "Valid: 3, Broken: 2");

    let (_server, targets) = head_server(1, 3).await;
    let r = check_links(&http, &targets, TIMEOUT).await;
    assert_eq!(r.status, CheckStatus::Failed);

    let none = check_links(&http, &[], TIMEOUT).await;
    assert_eq!(none.status, CheckStatus::Passed);
    assert_eq!(none.details, "Valid: 0, Broken: 0");
}

#[tokio::test]
async fn test_links_redirect_and_unreachable_are_broken() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/moved"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/ok"))
        .mount(&server)
        .await;
    let http = HttpClient::new().unwrap();

    let targets = vec![
        LinkTarget::Probe(format!("{}/moved", server.uri())),
        LinkTarget::Probe("http://127.0.0.1:9/".to_string()),
    ];
    let r = check_links(&http, &targets, TIMEOUT).await;
    assert_eq!(r.details, "Valid: 0, Broken: 2");
    assert_eq!(r.status, CheckStatus::Warning);
}

#[tokio::test]
async fn test_only_first_ten_links_are_probed() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .expect(10)
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/late"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&server)
        .await;

    let mut html = String::from("<html><body>");
    for _ in 0..10 {
        html.push_str("<a href=\"/ok\">ok</a>");
    }
    for _ in 0..5 {
        html.push_str("<a href=\"/late\">late</a>");
    }
    html.push_str("</body></html>");

    let base = Url::parse(&server.uri()).unwrap();
    let targets = link_targets(&Document::parse(&html), &base, 10);
    let http = HttpClient::new().unwrap();
    let r = check_links(&http, &targets, TIMEOUT).await;

    assert_eq!(r.status, CheckStatus::Passed);
    assert_eq!(r.details, "Valid: 10, Broken: 0");
}

#[tokio::test]
async fn test_responsive_visits_every_viewport() {
    let browser = FakeBrowser::serving("<html></html>");
    let page = open_page(&browser).await;

    let r = check_responsive_design(page.as_ref(), &RESPONSIVE_VIEWPORTS, Duration::ZERO).await;

    assert_eq!(r.status, CheckStatus::Passed);
    assert_eq!(r.details, "Responsive score: 100.0%");
    assert_eq!(*browser.viewports.lock().unwrap(), RESPONSIVE_VIEWPORTS.to_vec());
}

#[tokio::test]
async fn test_responsive_overflow_grading() {
    // 800px wide content overflows the two narrow viewports
    let mut browser = FakeBrowser::serving("<html></html>");
    browser.content_width = 800;
    let page = open_page(&browser).await;
    let r = check_responsive_design(page.as_ref(), &RESPONSIVE_VIEWPORTS, Duration::ZERO).await;
    assert_eq!(r.status, CheckStatus::Warning);
    assert_eq!(r.details, "Responsive score: 50.0%");

    browser.content_width = 1400;
    let page = open_page(&browser).await;
    let r = check_responsive_design(page.as_ref(), &RESPONSIVE_VIEWPORTS, Duration::ZERO).await;
    assert_eq!(r.status, CheckStatus::Failed);
    assert_eq!(r.details, "Responsive score: 25.0%");
}

#[tokio::test]
async fn test_responsive_script_error_is_failed() {
    let mut browser = FakeBrowser::serving("<html></html>");
    browser.fail_js = true;
    let page = open_page(&browser).await;

    let r = check_responsive_design(page.as_ref(), &RESPONSIVE_VIEWPORTS, Duration::ZERO).await;

    assert_eq!(r.status, CheckStatus::Failed);
    assert!(r.details.contains("Execution context was destroyed"));
}

#[tokio::test]
async fn test_performance_fast_reload_passes() {
    let browser = FakeBrowser::serving("<html><body></body></html>");
    let page = open_page(&browser).await;

    let r = check_performance(page.as_ref(), Duration::from_secs(10)).await;

    assert_eq!(r.status, CheckStatus::Passed);
    assert!(r.details.starts_with("Load time: 0.0"));
}

#[tokio::test]
async fn test_performance_reload_error_is_failed() {
    let mut browser = FakeBrowser::serving("<html></html>");
    browser.fail_reload = true;
    let page = open_page(&browser).await;

    let r = check_performance(page.as_ref(), Duration::from_secs(10)).await;

    assert_eq!(r.status, CheckStatus::Failed);
    assert_eq!(r.details, "Error: page reload failed: target closed");
}

#[tokio::test]
async fn test_performance_reload_is_bounded() {
    let mut browser = FakeBrowser::serving("<html><body></body></html>");
    browser.reload_delay = Duration::from_secs(2);
    let page = open_page(&browser).await;

    let started = std::time::Instant::now();
    let r = check_performance(page.as_ref(), Duration::from_millis(200)).await;

    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(r.status, CheckStatus::Failed);
    assert_eq!(r.details, "Error: page did not reload within 0.2s");
}
