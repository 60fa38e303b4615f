//! Unit tests for the ViewController: which requests each location issues
//! and what ends up on the page.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use searchview::managers::view_controller::{ViewController, ViewControllerTrait};
use searchview::services::loopback::LoopbackTransport;
use searchview::services::navigation::NavigationState;
use searchview::services::search_service::SearchService;
use searchview::services::session_client::SessionClient;
use searchview::services::transport::{HttpRequest, HttpResponse, Method, Transport};
use searchview::types::errors::TransportError;
use searchview::types::record::SearchHit;
use searchview::types::settings::ClientSettings;
use searchview::types::view::View;
use searchview::ui::list_renderer::ListRenderer;
use searchview::ui::view_model::{ContentBlock, RenderedPage};

const ORIGIN: &str = "http://localhost:8080";

fn controller(transport: Arc<dyn Transport>) -> ViewController {
    let session = Arc::new(SessionClient::new(transport.clone(), "/api/session"));
    let search = Arc::new(SearchService::new(transport, "/api/search"));
    ViewController::new(session, search, ORIGIN)
        .with_renderer(ListRenderer::with_formatter(|ms| ms.to_string()))
}

fn loopback() -> Arc<LoopbackTransport> {
    Arc::new(LoopbackTransport::new(ClientSettings::default()).with_index(vec![
        SearchHit {
            location: "https://cats.test/one".to_string(),
            title: "Cats one".to_string(),
            count: 4,
            score: 0.9,
            timestamp: 1,
        },
        SearchHit {
            location: "https://cats.test/two".to_string(),
            title: "Cats two".to_string(),
            count: 2,
            score: 0.4567,
            timestamp: 2,
        },
        SearchHit {
            location: "https://dogs.test".to_string(),
            title: "A dog".to_string(),
            count: 1,
            score: 0.2,
            timestamp: 3,
        },
    ]))
}

async fn render(transport: Arc<dyn Transport>, location: &str) -> RenderedPage {
    let nav = NavigationState::parse(location).unwrap();
    controller(transport).render(&nav).await
}

fn assert_stats_format(stats: &str, prefix: &str) {
    let seconds = stats
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix('s'))
        .unwrap_or_else(|| panic!("unexpected stats line: {}", stats));
    let (whole, fraction) = seconds.split_once('.').expect("decimal seconds");
    assert!(whole.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(fraction.len(), 2, "exactly two decimals in {}", stats);
}

#[tokio::test]
async fn test_search_issues_search_then_history_append() {
    let transport = loopback();
    let page = render(transport.clone(), "/?q=cats").await;

    assert_eq!(
        transport.requests(),
        vec![
            HttpRequest::get("/api/search?q=cats"),
            HttpRequest::post("/api/session?view=history", "http://localhost:8080?q=cats\ncats"),
        ]
    );
    assert_eq!(page.view, Some(View::Search));
    assert_eq!(page.search_value.as_deref(), Some("cats"));
    assert_stats_format(page.execution_stats.as_deref().unwrap(), "2 results in about ");
    assert_eq!(page.items().count(), 2);
    assert!(page.alerts.is_empty());
}

#[tokio::test]
async fn test_single_result_uses_singular() {
    let page = render(loopback(), "/?q=dog").await;
    assert_stats_format(page.execution_stats.as_deref().unwrap(), "1 result in about ");
}

#[tokio::test]
async fn test_zero_results_still_records_history() {
    let transport = loopback();
    let page = render(transport.clone(), "/?view=search&q=zebras").await;

    assert_stats_format(page.execution_stats.as_deref().unwrap(), "0 results in about ");
    assert_eq!(
        page.blocks,
        vec![ContentBlock::NoResults {
            query: "zebras".to_string()
        }]
    );
    let posts: Vec<_> = transport
        .requests()
        .into_iter()
        .filter(|r| r.method == Method::Post)
        .collect();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].body.as_deref(), Some("http://localhost:8080?q=zebras\nzebras"));
}

#[tokio::test]
async fn test_empty_query_issues_no_request() {
    for location in ["/", "/?q=", "/?q=%20%20", "/?view=search"] {
        let transport = loopback();
        let page = render(transport.clone(), location).await;
        assert!(transport.requests().is_empty(), "{} should not fetch", location);
        assert!(page.blocks.is_empty());
        assert_eq!(page.execution_stats, None);
        assert_eq!(page.selected_option.as_deref(), Some("search"));
    }
}

#[tokio::test]
async fn test_encoded_query_reaches_endpoints() {
    let transport = loopback();
    let page = render(transport.clone(), "/?q=%20cats%20%26%20more%20").await;

    let requests = transport.requests();
    assert_eq!(requests[0].target, "/api/search?q=cats%20%26%20more");
    assert_eq!(
        requests[1].body.as_deref(),
        Some("http://localhost:8080?q=cats%20%26%20more\ncats%20%26%20more")
    );
    assert_eq!(page.search_value.as_deref(), Some("cats & more"));
}

#[tokio::test]
async fn test_favorites_empty_state() {
    let transport = loopback();
    let page = render(transport.clone(), "/?view=favorites").await;

    assert_eq!(transport.requests(), vec![HttpRequest::get("/api/session?view=favorites")]);
    assert_eq!(
        page.blocks,
        vec![
            ContentBlock::Header("⭐ Favorites".to_string()),
            ContentBlock::EmptyState("No favorites...".to_string()),
        ]
    );
    assert_eq!(page.selected_option.as_deref(), Some("favorites"));
    assert_eq!(page.execution_stats, None);
}

#[tokio::test]
async fn test_history_sorted_newest_first() {
    let transport = loopback();
    for q in ["cats", "dog", "zebras"] {
        render(transport.clone(), &format!("/?q={}", q)).await;
    }

    let page = render(transport.clone(), "/?view=history").await;
    let urls: Vec<&str> = page.items().map(|i| i.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "http://localhost:8080?q=zebras",
            "http://localhost:8080?q=dog",
            "http://localhost:8080?q=cats",
        ]
    );
}

#[tokio::test]
async fn test_unknown_view_renders_nothing() {
    let transport = loopback();
    let page = render(transport.clone(), "/?view=settings").await;

    assert!(transport.requests().is_empty());
    assert_eq!(page.view, None);
    assert!(page.blocks.is_empty());
    assert!(page.alerts.is_empty());
    assert_eq!(page.selected_option.as_deref(), Some("settings"));
}

#[tokio::test]
async fn test_list_failure_alerts_and_renders_nothing() {
    let transport = loopback();
    transport.set_failure(Some(500));
    let page = render(transport.clone(), "/?view=visited").await;

    assert!(page.blocks.is_empty());
    assert_eq!(page.alerts, vec!["Request failed with status code 500".to_string()]);
}

#[tokio::test]
async fn test_search_failure_skips_history() {
    let transport = loopback();
    transport.set_failure(Some(503));
    let page = render(transport.clone(), "/?q=cats").await;

    assert_eq!(transport.requests().len(), 1, "only the search is attempted");
    assert_eq!(page.alerts, vec!["Request failed with status code 503".to_string()]);
    assert_eq!(page.execution_stats, None);
    assert_eq!(page.search_value.as_deref(), Some("cats"));
}

/// Serves search results but rejects every session write.
struct ReadOnlySession {
    requests: Mutex<Vec<HttpRequest>>,
}

#[async_trait]
impl Transport for ReadOnlySession {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = request.method;
        self.requests.lock().unwrap().push(request);
        match method {
            Method::Get => Ok(HttpResponse {
                status: 200,
                body: r#"[{"where": "https://a.test", "title": "A", "count": 1, "score": 0.5, "timestamp": "1700000000000"}]"#
                    .to_string(),
            }),
            _ => Err(TransportError::Status(403)),
        }
    }
}

#[tokio::test]
async fn test_history_failure_still_renders_results() {
    let transport = Arc::new(ReadOnlySession {
        requests: Mutex::new(Vec::new()),
    });
    let page = render(transport.clone(), "/?q=a").await;

    assert_eq!(page.items().count(), 1);
    assert_eq!(
        page.items().next().unwrap().detail,
        "Frequency: 1 | Score: 50.00% | Processed on 1700000000000"
    );
    assert_eq!(page.alerts, vec!["Request failed with status code 403".to_string()]);
    assert_eq!(transport.requests.lock().unwrap().len(), 2);
}

/// Search index whose pages were never dated; accepts every session write.
struct UndatedIndex {
    requests: Mutex<Vec<HttpRequest>>,
}

#[async_trait]
impl Transport for UndatedIndex {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let body = match request.method {
            Method::Get => r#"[{"where":"https://a.test","title":"A","count":2,"score":0.5,"timestamp":""}]"#,
            _ => "",
        };
        self.requests.lock().unwrap().push(request);
        Ok(HttpResponse {
            status: 200,
            body: body.to_string(),
        })
    }
}

#[tokio::test]
async fn test_undated_hit_still_renders_and_records_history() {
    let transport = Arc::new(UndatedIndex {
        requests: Mutex::new(Vec::new()),
    });
    let session = Arc::new(SessionClient::new(transport.clone(), "/api/session"));
    let search = Arc::new(SearchService::new(transport.clone(), "/api/search"));
    let controller = ViewController::new(session, search, ORIGIN);

    let nav = NavigationState::parse("/?q=cats").unwrap();
    let page = controller.render(&nav).await;

    assert!(page.alerts.is_empty());
    assert_stats_format(page.execution_stats.as_deref().unwrap(), "1 result in about ");
    let items: Vec<_> = page.items().collect();
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0].detail,
        "Frequency: 2 | Score: 50.00% | Processed on Unknown date"
    );

    let posts: Vec<HttpRequest> = transport
        .requests
        .lock()
        .unwrap()
        .iter()
        .filter(|r| r.method == Method::Post)
        .cloned()
        .collect();
    assert_eq!(
        posts,
        vec![HttpRequest::post(
            "/api/session?view=history",
            "http://localhost:8080?q=cats\ncats"
        )]
    );
}
