//! Unit tests for the SessionClient request shapes and error handling.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use searchview::services::session_client::{SessionClient, SessionClientTrait};
use searchview::services::transport::{HttpRequest, HttpResponse, Method, Transport};
use searchview::types::errors::{SessionError, TransportError};
use searchview::types::view::View;

/// Records every request and answers with a fixed body or status.
struct RecordingTransport {
    reply: Result<String, u16>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingTransport {
    fn ok(body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(body.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(status),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Ok(body) => Ok(HttpResponse {
                status: 200,
                body: body.clone(),
            }),
            Err(status) => Err(TransportError::Status(*status)),
        }
    }
}

fn client(transport: &Arc<RecordingTransport>) -> SessionClient {
    SessionClient::new(transport.clone(), "/api/session")
}

#[tokio::test]
async fn test_append_posts_url_and_title() {
    let transport = RecordingTransport::ok("");
    client(&transport)
        .append(View::Visited, "https://x.test/a", "A page")
        .await
        .unwrap();

    assert_eq!(
        transport.requests(),
        vec![HttpRequest {
            method: Method::Post,
            target: "/api/session?view=visited".to_string(),
            body: Some("https://x.test/a\nA page".to_string()),
        }]
    );
}

#[tokio::test]
async fn test_append_defaults_empty_title() {
    let transport = RecordingTransport::ok("");
    client(&transport)
        .append(View::Favorites, "https://x.test", "")
        .await
        .unwrap();

    let body = transport.requests()[0].body.clone().unwrap();
    assert_eq!(body, "https://x.test\n[No Title]");
}

#[tokio::test]
async fn test_append_keeps_whitespace_title() {
    let transport = RecordingTransport::ok("");
    client(&transport)
        .append(View::Visited, "https://x.test", "  ")
        .await
        .unwrap();

    let body = transport.requests()[0].body.clone().unwrap();
    assert_eq!(body, "https://x.test\n  ");
}

#[tokio::test]
async fn test_append_rejects_search_view_and_empty_url() {
    let transport = RecordingTransport::ok("");
    let client = client(&transport);

    assert_eq!(
        client.append(View::Search, "https://x.test", "t").await,
        Err(SessionError::InvalidView("search".to_string()))
    );
    assert!(matches!(
        client.append(View::History, "", "t").await,
        Err(SessionError::InvalidRecord(_))
    ));
    assert!(transport.requests().is_empty(), "nothing should be sent");
}

#[tokio::test]
async fn test_remove_targets_favorites_with_encoded_url() {
    let transport = RecordingTransport::ok("");
    client(&transport).remove("https://x.test/?a=1&b=2").await.unwrap();

    let request = &transport.requests()[0];
    assert_eq!(request.method, Method::Delete);
    assert_eq!(
        request.target,
        "/api/session?view=favorites&url=https%3A%2F%2Fx.test%2F%3Fa%3D1%26b%3D2"
    );
}

#[tokio::test]
async fn test_list_decodes_records() {
    let transport = RecordingTransport::ok(
        r#"[{"url": "https://x.test", "title": "X", "isFavorite": true, "timestamp": 1700000000000},
            {"url": "https://y.test", "title": "", "isFavorite": false, "timestamp": 1700000000500}]"#,
    );
    let records = client(&transport).list(View::History).await.unwrap();

    assert_eq!(records.len(), 2);
    assert!(records[0].is_favorite);
    assert_eq!(records[1].timestamp, 1_700_000_000_500);
    assert_eq!(transport.requests()[0].target, "/api/session?view=history");
    assert_eq!(transport.requests()[0].method, Method::Get);
}

#[tokio::test]
async fn test_list_empty_body_is_empty_sequence() {
    for body in ["", "null", "[]"] {
        let transport = RecordingTransport::ok(body);
        let records = client(&transport).list(View::Favorites).await.unwrap();
        assert!(records.is_empty(), "body {:?} should yield no records", body);
    }
}

#[tokio::test]
async fn test_failure_surfaces_transport_message() {
    let transport = RecordingTransport::failing(500);
    let err = client(&transport).list(View::Visited).await.unwrap_err();
    assert_eq!(err.to_string(), "Request failed with status code 500");
}
