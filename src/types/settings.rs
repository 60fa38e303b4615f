use serde::{Deserialize, Serialize};

/// Where the page lives and where its collaborator endpoints are mounted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientSettings {
    /// Scheme, host and port of the page, without a trailing slash.
    pub origin: String,
    pub search_endpoint: String,
    pub session_endpoint: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            origin: "http://localhost:8080".to_string(),
            search_endpoint: "/api/search".to_string(),
            session_endpoint: "/api/session".to_string(),
        }
    }
}
