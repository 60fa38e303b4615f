//! Session Client for SearchView.
//!
//! Thin wrapper around the session service: append to, remove from, and list
//! the server-held collections (`history`, `visited`, `favorites`).

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::services::navigation::encode_component;
use crate::services::transport::{decode_list, HttpRequest, Transport};
use crate::types::errors::SessionError;
use crate::types::record::{Record, NO_TITLE};
use crate::types::view::View;

/// Trait defining session collection operations.
#[async_trait]
pub trait SessionClientTrait: Send + Sync {
    async fn append(&self, view: View, url: &str, title: &str) -> Result<(), SessionError>;
    async fn remove(&self, url: &str) -> Result<(), SessionError>;
    async fn list(&self, view: View) -> Result<Vec<Record>, SessionError>;
}

/// Session client backed by a [`Transport`].
pub struct SessionClient {
    transport: Arc<dyn Transport>,
    endpoint: String,
}

impl SessionClient {
    /// Creates a client that reaches the session service at `endpoint`.
    pub fn new(transport: Arc<dyn Transport>, endpoint: &str) -> Self {
        Self {
            transport,
            endpoint: endpoint.to_string(),
        }
    }

    fn collection(&self, view: View) -> Result<String, SessionError> {
        if !view.is_session_collection() {
            return Err(SessionError::InvalidView(view.as_str().to_string()));
        }
        Ok(format!("{}?view={}", self.endpoint, view.as_str()))
    }

    /// Body of an append request: `<url>\n<title>`.
    pub fn append_body(url: &str, title: &str) -> String {
        let title = if title.is_empty() { NO_TITLE } else { title };
        format!("{}\n{}", url, title)
    }
}

#[async_trait]
impl SessionClientTrait for SessionClient {
    /// Creates one record in `view`. The server assigns the timestamp.
    async fn append(&self, view: View, url: &str, title: &str) -> Result<(), SessionError> {
        if url.is_empty() {
            return Err(SessionError::InvalidRecord("url is empty".to_string()));
        }
        let target = self.collection(view)?;
        debug!("append to {}: {}", view, url);
        self.transport
            .send(HttpRequest::post(target, Self::append_body(url, title)))
            .await?;
        Ok(())
    }

    /// Deletes the favorites entry whose URL matches exactly.
    async fn remove(&self, url: &str) -> Result<(), SessionError> {
        let target = format!(
            "{}&url={}",
            self.collection(View::Favorites)?,
            encode_component(url)
        );
        debug!("remove favorite: {}", url);
        self.transport.send(HttpRequest::delete(target)).await?;
        Ok(())
    }

    /// Fetches the whole collection for `view`, in server order.
    async fn list(&self, view: View) -> Result<Vec<Record>, SessionError> {
        let target = self.collection(view)?;
        let response = self.transport.send(HttpRequest::get(target)).await?;
        Ok(decode_list(&response.body)?)
    }
}
