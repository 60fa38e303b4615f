//! In-process stand-in for the search and session services.
//!
//! `LoopbackTransport` answers the same requests a live server would, keeping
//! the session collections in memory. It powers the demo mode and the tests.
//!
//! Collection semantics:
//! - entries are keyed by URL; adding an existing URL replaces it with a fresh timestamp
//! - adding a favorite marks matching history/visited entries as favorite, removing clears it
//! - POST bodies that do not split into exactly `url` and `title` lines are ignored
//! - DELETE only applies to `favorites`

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use url::Url;

use crate::services::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::types::errors::TransportError;
use crate::types::record::{Record, SearchHit};
use crate::types::settings::ClientSettings;
use crate::types::view::View;

#[derive(Default)]
struct LoopbackState {
    history: Vec<Record>,
    visited: Vec<Record>,
    favorites: Vec<Record>,
    index: Vec<SearchHit>,
    requests: Vec<HttpRequest>,
    failure: Option<u16>,
    last_timestamp: i64,
}

impl LoopbackState {
    fn collection_mut(&mut self, view: View) -> Option<&mut Vec<Record>> {
        match view {
            View::History => Some(&mut self.history),
            View::Visited => Some(&mut self.visited),
            View::Favorites => Some(&mut self.favorites),
            View::Search => None,
        }
    }

    /// Monotonic epoch milliseconds so insertion order is always recoverable.
    fn next_timestamp(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last_timestamp = now.max(self.last_timestamp + 1);
        self.last_timestamp
    }

    fn is_favorite(&self, url: &str) -> bool {
        self.favorites.iter().any(|r| r.url == url)
    }

    fn set_favorite_flag(&mut self, url: &str, flag: bool) {
        for record in self.history.iter_mut().chain(self.visited.iter_mut()) {
            if record.url == url {
                record.is_favorite = flag;
            }
        }
    }

    fn add(&mut self, view: View, url: &str, title: &str) {
        let timestamp = self.next_timestamp();
        let is_favorite = view == View::Favorites || self.is_favorite(url);
        let record = Record {
            url: url.to_string(),
            title: title.to_string(),
            timestamp,
            is_favorite,
        };
        if let Some(collection) = self.collection_mut(view) {
            collection.retain(|r| r.url != url);
            collection.push(record);
        }
        if view == View::Favorites {
            self.set_favorite_flag(url, true);
        }
    }

    fn remove_favorite(&mut self, url: &str) {
        self.favorites.retain(|r| r.url != url);
        self.set_favorite_flag(url, false);
    }

    fn search(&self, query: &str) -> Vec<SearchHit> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.index
            .iter()
            .filter(|hit| {
                hit.title.to_lowercase().contains(&needle)
                    || hit.location.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }
}

/// In-memory emulation of `/api/search` and `/api/session`.
pub struct LoopbackTransport {
    settings: ClientSettings,
    state: Mutex<LoopbackState>,
}

impl LoopbackTransport {
    pub fn new(settings: ClientSettings) -> Self {
        Self {
            settings,
            state: Mutex::new(LoopbackState::default()),
        }
    }

    /// Adds searchable hits, served in the given (relevance) order.
    pub fn with_index(self, hits: Vec<SearchHit>) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.index.extend(hits);
        }
        self
    }

    /// Makes every later request fail with `status` (`None` restores service).
    pub fn set_failure(&self, status: Option<u16>) {
        if let Ok(mut state) = self.state.lock() {
            state.failure = status;
        }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state
            .lock()
            .map(|s| s.requests.clone())
            .unwrap_or_default()
    }

    /// Current contents of a session collection, in insertion order.
    pub fn records(&self, view: View) -> Vec<Record> {
        self.state
            .lock()
            .ok()
            .and_then(|mut s| s.collection_mut(view).map(|c| c.clone()))
            .unwrap_or_default()
    }

    fn handle(
        &self,
        state: &mut LoopbackState,
        request: &HttpRequest,
    ) -> Result<String, TransportError> {
        let url = Url::parse("http://loopback.invalid/")
            .and_then(|base| base.join(&request.target))
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let param = |name: &str| {
            url.query_pairs()
                .filter(|(k, _)| k == name)
                .map(|(_, v)| v.into_owned())
                .last()
        };

        if url.path() == self.settings.search_endpoint {
            if request.method != Method::Get {
                return Err(TransportError::Status(405));
            }
            let hits = state.search(&param("q").unwrap_or_default());
            return serde_json::to_string(&hits).map_err(|e| TransportError::Decode(e.to_string()));
        }

        if url.path() != self.settings.session_endpoint {
            return Err(TransportError::Status(404));
        }

        let view = param("view").and_then(|v| v.parse::<View>().ok());
        match request.method {
            Method::Get => {
                let records = match view {
                    Some(v) => state.collection_mut(v).map(|c| c.clone()).unwrap_or_default(),
                    None => Vec::new(),
                };
                serde_json::to_string(&records).map_err(|e| TransportError::Decode(e.to_string()))
            }
            Method::Post => {
                let body = request.body.as_deref().unwrap_or_default();
                let lines: Vec<&str> = body.split('\n').collect();
                if let (Some(v), [link, title]) = (view, lines.as_slice()) {
                    state.add(v, link, title);
                }
                Ok(String::new())
            }
            Method::Delete => {
                if view == Some(View::Favorites) {
                    if let Some(target) = param("url") {
                        state.remove_favorite(&target);
                    }
                }
                Ok(String::new())
            }
        }
    }
}

#[async_trait]
impl Transport for LoopbackTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        debug!("loopback {} {}", request.method.as_str(), request.target);
        state.requests.push(request.clone());

        if let Some(status) = state.failure {
            return Err(TransportError::Status(status));
        }

        let body = self.handle(&mut state, &request)?;
        Ok(HttpResponse { status: 200, body })
    }
}
