//! HTTP transport used to reach the search and session services.
//!
//! The `Transport` trait is the seam between the page logic and the network:
//! `ReqwestTransport` talks to a live server, `LoopbackTransport` (see
//! `services::loopback`) emulates one in-process.

use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;

use crate::types::errors::TransportError;

/// HTTP verbs used by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// A request against the page origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Path and query relative to the origin, e.g. `/api/session?view=history`.
    pub target: String,
    /// Plain-text body, sent only with POST.
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get(target: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            target: target.into(),
            body: None,
        }
    }

    pub fn post(target: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            target: target.into(),
            body: Some(body.into()),
        }
    }

    pub fn delete(target: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            target: target.into(),
            body: None,
        }
    }
}

/// A successful (2xx) response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Sends requests to the page origin.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request`; any non-2xx status is reported as `TransportError::Status`.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Decodes a JSON array body. An empty body or `null` is an empty list.
pub fn decode_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, TransportError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let items: Option<Vec<T>> =
        serde_json::from_str(trimmed).map_err(|e| TransportError::Decode(e.to_string()))?;
    Ok(items.unwrap_or_default())
}

/// Transport backed by `reqwest`.
///
/// The cookie store is enabled so the server-side session cookie set on the
/// first response is replayed on every later request.
pub struct ReqwestTransport {
    origin: String,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(origin: &str) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self {
            origin: origin.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = format!("{}{}", self.origin, request.target);
        debug!("{} {}", request.method.as_str(), url);

        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Delete => self.client.delete(&url),
            Method::Post => self
                .client
                .post(&url)
                .header(reqwest::header::CONTENT_TYPE, "text/plain")
                .body(request.body.unwrap_or_default()),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            body,
        })
    }
}
