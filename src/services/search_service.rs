//! Search Service client for SearchView.
//!
//! Issues a query against the ranking service and times the round trip.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::debug;

use crate::services::transport::{decode_list, HttpRequest, Transport};
use crate::types::errors::SearchError;
use crate::types::record::SearchHit;

/// Ranked hits plus the client-side wall-clock time the request took.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub hits: Vec<SearchHit>,
    pub elapsed: Duration,
}

/// Trait defining search operations.
#[async_trait]
pub trait SearchServiceTrait: Send + Sync {
    /// Runs an already percent-encoded, non-empty query.
    async fn search(&self, encoded_query: &str) -> Result<SearchOutcome, SearchError>;
}

/// Search client backed by a [`Transport`].
pub struct SearchService {
    transport: Arc<dyn Transport>,
    endpoint: String,
}

impl SearchService {
    pub fn new(transport: Arc<dyn Transport>, endpoint: &str) -> Self {
        Self {
            transport,
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl SearchServiceTrait for SearchService {
    async fn search(&self, encoded_query: &str) -> Result<SearchOutcome, SearchError> {
        if encoded_query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        let target = format!("{}?q={}", self.endpoint, encoded_query);

        let start = Instant::now();
        let response = self.transport.send(HttpRequest::get(target)).await?;
        let elapsed = start.elapsed();

        // Relevance order from the server is kept as-is.
        let hits: Vec<SearchHit> = decode_list(&response.body)?;
        debug!("{} hits for {:?} in {:?}", hits.len(), encoded_query, elapsed);
        Ok(SearchOutcome { hits, elapsed })
    }
}
