//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for a Payhip store and run the
//! crawler end-to-end, with an instant sleeper so no test waits in real time.

use payhip_scraper::config::{Config, SiteConfig};
use payhip_scraper::crawler::{
    crawl, CardError, Coordinator, CrawlReporter, PageOutcome, RunSettings, Sleeper,
};
use payhip_scraper::model::{ProductRecord, FREE_PRICE, NOT_AVAILABLE, NO_DESCRIPTION, NO_LINK};
use payhip_scraper::output::{export_records, ExportFormat};
use payhip_scraper::prompt::{finish_run, resolve_export, ScriptedPrompt};
use payhip_scraper::url::{validate_target, CrawlTarget};
use payhip_scraper::ScrapeError;
use std::cell::RefCell;
use std::future::Future;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING_PATH: &str = "/vespr/collection/all";

/// Records requested pauses and returns immediately
#[derive(Default)]
struct InstantSleeper {
    pauses: RefCell<Vec<Duration>>,
}

impl Sleeper for InstantSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        self.pauses.borrow_mut().push(duration);
        std::future::ready(())
    }
}

/// Collects reporter events as strings
#[derive(Default)]
struct RecordingReporter {
    events: RefCell<Vec<String>>,
}

impl RecordingReporter {
    fn count(&self, prefix: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }
}

impl CrawlReporter for RecordingReporter {
    fn pages_resolved(&self, total_pages: usize) {
        self.events
            .borrow_mut()
            .push(format!("pages_resolved {}", total_pages));
    }

    fn pagination_fallback(&self, url: &str, reason: &str) {
        self.events
            .borrow_mut()
            .push(format!("pagination_fallback {} {}", url, reason));
    }

    fn page_failed(&self, url: &str, _error: &ScrapeError) {
        self.events.borrow_mut().push(format!("page_failed {}", url));
    }

    fn card_skipped(&self, index: usize, error: &CardError) {
        self.events
            .borrow_mut()
            .push(format!("card_skipped {} {}", index, error));
    }

    fn description_attempt_failed(
        &self,
        url: &str,
        attempt: u32,
        max_attempts: u32,
        _error: &ScrapeError,
    ) {
        self.events.borrow_mut().push(format!(
            "description_attempt_failed {} {}/{}",
            url, attempt, max_attempts
        ));
    }
}

type TestCoordinator = Coordinator<InstantSleeper, RecordingReporter>;

/// Creates a configuration pointing at the mock server
fn create_test_config(server: &MockServer) -> Config {
    Config {
        site: SiteConfig {
            origin: server.uri(),
            ..SiteConfig::default()
        },
        ..Config::default()
    }
}

fn create_coordinator(server: &MockServer, delay: Duration) -> TestCoordinator {
    Coordinator::with_parts(
        &create_test_config(server),
        delay,
        InstantSleeper::default(),
        RecordingReporter::default(),
    )
    .expect("Failed to create coordinator")
}

fn target(server: &MockServer) -> CrawlTarget {
    let site = create_test_config(server).site;
    validate_target(&format!("{}/vespr", server.uri()), &site).expect("Invalid target")
}

fn card(title: &str, href: &str, price: Option<&str>) -> String {
    let price = price
        .map(|p| format!(r#"<span class="price-item--regular">{}</span>"#, p))
        .unwrap_or_default();
    format!(
        r#"<div class="product-card-wrapper">
            <img src="https://cdn.example.com/{title}.png">
            <h3 class="card__heading"><a href="{href}">{title}</a></h3>
            {price}
        </div>"#
    )
}

fn listing(cards: &[String], offsets: &[u32]) -> String {
    let pagination = if offsets.is_empty() {
        String::new()
    } else {
        let links: String = offsets
            .iter()
            .map(|o| format!(r#"<a href="{}?page={}">{}</a>"#, LISTING_PATH, o, o))
            .collect();
        format!(r#"<div class="pagination-wrapper">{}</div>"#, links)
    };
    format!(
        "<html><body><main>{}</main>{}</body></html>",
        cards.concat(),
        pagination
    )
}

fn detail(description: &str) -> String {
    format!(
        r#"<html><body><div class="product-description"><p>{}</p></div></body></html>"#,
        description
    )
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_two_pages() {
    let server = MockServer::start().await;

    // The offset page must be mounted before the base page, which matches any query
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("page", "16"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing(
            &[card("Gamma", "/b/3", Some("$9.00"))],
            &[0, 16],
        )))
        .expect(1)
        .mount(&server)
        .await;

    mount_html(
        &server,
        LISTING_PATH,
        listing(
            &[
                card("Alpha", "/b/1", Some("$5.00")),
                card("Beta", "/b/2", None),
            ],
            &[0, 16],
        ),
    )
    .await;

    mount_html(&server, "/b/1", detail("First product")).await;
    mount_html(&server, "/b/2", detail("Second product")).await;
    mount_html(&server, "/b/3", detail("Third product")).await;

    let coordinator = create_coordinator(&server, Duration::from_secs(1));
    let output = coordinator.run(&target(&server)).await;

    let titles: Vec<&str> = output.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "Beta", "Gamma"]);

    let beta = &output.records[1];
    assert_eq!(beta.price, FREE_PRICE);
    assert_eq!(beta.link, format!("{}/b/2", server.uri()));
    assert_eq!(beta.image, "https://cdn.example.com/Beta.png");
    assert_eq!(beta.description, "Second product");

    assert_eq!(output.stats.pages_planned, 2);
    assert_eq!(output.stats.pages_failed, 0);
    assert_eq!(output.stats.cards_found, 3);
    assert_eq!(output.stats.records, 3);
    assert_eq!(output.stats.descriptions_missing, 0);

    // One pause after every product
    assert_eq!(
        *coordinator.sleeper().pauses.borrow(),
        vec![Duration::from_secs(1); 3]
    );
    assert_eq!(coordinator.reporter().count("pages_resolved 2"), 1);
}

#[tokio::test]
async fn test_pagination_offsets_infer_page_count() {
    let server = MockServer::start().await;
    mount_html(&server, LISTING_PATH, listing(&[], &[0, 16, 48])).await;

    let coordinator = create_coordinator(&server, Duration::ZERO);
    assert_eq!(coordinator.resolve_total_pages(&target(&server)).await, 4);

    let pages = coordinator.plan_pages(&target(&server)).await;
    assert_eq!(pages.len(), 4);
    assert_eq!(pages[0], format!("{}{}", server.uri(), LISTING_PATH));
    assert_eq!(pages[3], format!("{}{}?page=48", server.uri(), LISTING_PATH));
}

#[tokio::test]
async fn test_no_pagination_is_single_page() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        LISTING_PATH,
        listing(&[card("Alpha", "/b/1", None)], &[]),
    )
    .await;

    let coordinator = create_coordinator(&server, Duration::ZERO);
    assert_eq!(coordinator.resolve_total_pages(&target(&server)).await, 1);
    assert_eq!(coordinator.reporter().count("pagination_fallback"), 1);
}

#[tokio::test]
async fn test_pagination_fetch_failure_is_single_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let coordinator = create_coordinator(&server, Duration::ZERO);
    assert_eq!(coordinator.resolve_total_pages(&target(&server)).await, 1);
    assert_eq!(coordinator.reporter().count("pagination_fallback"), 1);
}

#[tokio::test]
async fn test_description_retries_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/b/broken"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let coordinator = create_coordinator(&server, Duration::ZERO);
    let description = coordinator
        .fetch_description(&format!("{}/b/broken", server.uri()))
        .await;

    assert_eq!(description, NO_DESCRIPTION);
    assert_eq!(coordinator.reporter().count("description_attempt_failed"), 3);
    assert!(coordinator.reporter().events.borrow()[2].ends_with("3/3"));

    // Fixed interval between attempts, none after the last
    assert_eq!(
        *coordinator.sleeper().pauses.borrow(),
        vec![Duration::from_secs(2); 2]
    );
}

#[tokio::test]
async fn test_description_recovers_after_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/b/flaky"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_html(&server, "/b/flaky", detail("Worth the wait")).await;

    let coordinator = create_coordinator(&server, Duration::ZERO);
    let description = coordinator
        .fetch_description(&format!("{}/b/flaky", server.uri()))
        .await;

    assert_eq!(description, "Worth the wait");
    assert_eq!(coordinator.reporter().count("description_attempt_failed"), 1);
    assert_eq!(coordinator.sleeper().pauses.borrow().len(), 1);
}

#[tokio::test]
async fn test_description_container_missing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/b/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>plain</body></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let coordinator = create_coordinator(&server, Duration::ZERO);
    let description = coordinator
        .fetch_description(&format!("{}/b/plain", server.uri()))
        .await;

    assert_eq!(description, NO_DESCRIPTION);
    assert!(coordinator.sleeper().pauses.borrow().is_empty());
}

#[tokio::test]
async fn test_page_fetch_failure_yields_no_records() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("page", "16"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_html(
        &server,
        LISTING_PATH,
        listing(&[card("Alpha", "/b/1", Some("$1.00"))], &[16]),
    )
    .await;
    mount_html(&server, "/b/1", detail("Only product")).await;

    let coordinator = create_coordinator(&server, Duration::ZERO);
    let output = coordinator.run(&target(&server)).await;

    assert_eq!(output.records.len(), 1);
    assert_eq!(output.stats.pages_planned, 2);
    assert_eq!(output.stats.pages_failed, 1);
    assert_eq!(coordinator.reporter().count("page_failed"), 1);
}

#[tokio::test]
async fn test_broken_card_is_skipped() {
    let server = MockServer::start().await;
    let broken = r#"<div class="product-card-wrapper">
            <h3 class="card__heading"><a>Broken</a></h3>
        </div>"#
        .to_string();
    let page = listing(
        &[
            card("Alpha", "/b/1", None),
            broken,
            card("Gamma", "/b/3", None),
        ],
        &[],
    );
    mount_html(&server, LISTING_PATH, page).await;
    mount_html(&server, "/b/1", detail("First")).await;
    mount_html(&server, "/b/3", detail("Third")).await;

    let coordinator = create_coordinator(&server, Duration::ZERO);
    let url = target(&server).page_url(0);

    match coordinator.scrape_page(&url).await {
        PageOutcome::Scraped {
            records,
            cards,
            skipped,
        } => {
            assert_eq!(cards, 3);
            assert_eq!(skipped, 1);
            let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
            assert_eq!(titles, vec!["Alpha", "Gamma"]);
        }
        PageOutcome::FetchFailed(e) => panic!("unexpected fetch failure: {}", e),
    }
    assert_eq!(coordinator.reporter().count("card_skipped 2"), 1);
}

#[tokio::test]
async fn test_card_without_heading_uses_sentinels() {
    let server = MockServer::start().await;
    let bare = r#"<div class="product-card-wrapper"><p>Mystery</p></div>"#.to_string();
    mount_html(&server, LISTING_PATH, listing(&[bare], &[])).await;

    let coordinator = create_coordinator(&server, Duration::ZERO);
    let output = coordinator.run(&target(&server)).await;

    assert_eq!(
        output.records,
        vec![ProductRecord {
            title: NOT_AVAILABLE.to_string(),
            price: FREE_PRICE.to_string(),
            link: NO_LINK.to_string(),
            image: NOT_AVAILABLE.to_string(),
            description: NO_DESCRIPTION.to_string(),
        }]
    );
    assert_eq!(output.stats.descriptions_missing, 1);

    // The sentinel link is never requested; only the listing page was fetched twice
    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.iter().all(|r| r.url.path() == LISTING_PATH));
}

#[tokio::test]
async fn test_crawl_then_export() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        LISTING_PATH,
        listing(
            &[
                card("Alpha", "/b/1", Some("$5.00")),
                card("Beta", "/b/2", None),
            ],
            &[],
        ),
    )
    .await;
    mount_html(&server, "/b/1", detail("Première édition")).await;
    mount_html(&server, "/b/2", detail("Second, with comma")).await;

    let coordinator = create_coordinator(&server, Duration::ZERO);
    let output = coordinator.run(&target(&server)).await;
    assert_eq!(output.records.len(), 2);

    let dir = TempDir::new().unwrap();

    let csv_path = export_records(&output.records, ExportFormat::Csv, dir.path(), "vespr/all").unwrap();
    assert_eq!(csv_path, dir.path().join("vespr_all.csv"));
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Title,Price,Link,Image,Description");
    assert!(lines[1].starts_with("Alpha,$5.00,"));
    assert!(lines[2].ends_with("\"Second, with comma\""));

    let json_path = export_records(&output.records, ExportFormat::Json, dir.path(), "vespr").unwrap();
    let json = std::fs::read_to_string(&json_path).unwrap();
    assert!(json.contains("Première édition"));
    let parsed: Vec<ProductRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, output.records);
}

#[tokio::test]
async fn test_crawl_with_invalid_export_choice() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        LISTING_PATH,
        listing(&[card("Alpha", "/b/1", Some("$5.00"))], &[]),
    )
    .await;
    mount_html(&server, "/b/1", detail("First product")).await;

    let settings = RunSettings {
        target: target(&server),
        delay: Duration::ZERO,
    };
    let output = crawl(&create_test_config(&server), &settings)
        .await
        .expect("Crawl failed");
    assert_eq!(output.records.len(), 1);

    let dir = TempDir::new().unwrap();
    let mut prompt = ScriptedPrompt::new(["9", "vespr"]);
    let choice = resolve_export(None, None, &mut prompt).unwrap();

    assert_eq!(finish_run(&output, &choice, dir.path(), &mut prompt), None);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    assert!(prompt
        .messages
        .iter()
        .any(|m| m == "Invalid choice. No export performed."));
    assert!(prompt.messages.last().unwrap().ends_with("Scraped 1 products."));
}
