use serde::{Deserialize, Deserializer, Serialize};

/// Title shown (and sent) in place of an empty one.
pub const NO_TITLE: &str = "[No Title]";

/// A timestamped URL/title entry held in one of the session collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub url: String,
    #[serde(default)]
    pub title: String,
    /// Epoch milliseconds, assigned by the session service.
    #[serde(default)]
    pub timestamp: i64,
    #[serde(rename = "isFavorite", default)]
    pub is_favorite: bool,
}

/// A single ranked result returned by the search service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Source URL of the matching page.
    #[serde(rename = "where")]
    pub location: String,
    #[serde(default)]
    pub title: String,
    /// Frequency of the query terms in the page.
    #[serde(default)]
    pub count: u64,
    /// Relevance in `[0, 1]`.
    #[serde(default)]
    pub score: f64,
    /// Epoch milliseconds at which the page was processed.
    #[serde(default, deserialize_with = "lenient_millis")]
    pub timestamp: i64,
}

/// Timestamp used when the service sends one that cannot be read. It is out of
/// range for any calendar date, so it formats as `Unknown date`.
pub const UNKNOWN_TIMESTAMP: i64 = i64::MIN;

/// The search service sends timestamps as quoted strings (empty for pages it
/// never dated); the session service sends plain integers. Accept either.
fn lenient_millis<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Millis {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Millis::deserialize(deserializer)? {
        Millis::Int(v) => Ok(v),
        Millis::Float(v) => Ok(v as i64),
        Millis::Text(s) => Ok(s.trim().parse::<i64>().unwrap_or(UNKNOWN_TIMESTAMP)),
    }
}
