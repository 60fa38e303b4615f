//! Text formatting shared by the search and session views.

use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};

use crate::types::record::NO_TITLE;

/// Returns `title`, or the `[No Title]` placeholder when it is blank.
pub fn display_title(title: &str) -> &str {
    if title.trim().is_empty() {
        NO_TITLE
    } else {
        title
    }
}

/// Elapsed wall-clock time in seconds with exactly two decimals.
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.2}", elapsed.as_secs_f64())
}

/// Stats line shown above search results.
pub fn format_stats(count: usize, elapsed: Duration) -> String {
    let noun = if count == 1 { "result" } else { "results" };
    format!("{} {} in about {}s", count, noun, format_elapsed(elapsed))
}

/// Relevance score as a percentage with two decimals, e.g. `0.4567` → `45.67%`.
pub fn format_score(score: f64) -> String {
    format!("{:.2}%", score * 100.0)
}

/// Formats epoch milliseconds in the local timezone.
pub fn format_timestamp(millis: i64) -> String {
    format_timestamp_in(millis, &Local)
}

/// Formats epoch milliseconds as `M/D/YYYY at h:mm:ss AM` in `tz`.
pub fn format_timestamp_in<Tz>(millis: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match DateTime::from_timestamp_millis(millis) {
        Some(utc) => utc
            .with_timezone(tz)
            .format("%-m/%-d/%Y at %-I:%M:%S %p")
            .to_string(),
        None => "Unknown date".to_string(),
    }
}

/// Stat line under a search hit.
pub fn format_hit_stats(count: u64, score: f64, processed: &str) -> String {
    format!(
        "Frequency: {} | Score: {} | Processed on {}",
        count,
        format_score(score),
        processed
    )
}
