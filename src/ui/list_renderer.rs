//! List Renderer for SearchView.
//!
//! Pure functions from records (or search hits) to [`ContentBlock`]s. Item
//! ids are assigned by position, so they are unique within one render.

use crate::services::formatting::{display_title, format_hit_stats, format_stats, format_timestamp};
use crate::services::search_service::SearchOutcome;
use crate::types::record::Record;
use crate::types::view::View;
use crate::ui::view_model::{ContentBlock, ItemControl, ItemId, ListItem};

/// Which per-item control a session list carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    FavoriteToggle,
    RemoveButton,
}

/// View-specific copy for a session list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListCopy {
    pub header: &'static str,
    pub empty: &'static str,
    pub timestamp_label: &'static str,
    pub mode: ListMode,
}

impl ListCopy {
    /// Copy for a session collection view; `None` for search.
    pub fn for_view(view: View) -> Option<Self> {
        match view {
            View::History => Some(Self {
                header: "📜 Search History",
                empty: "No history...",
                timestamp_label: "Searched on",
                mode: ListMode::FavoriteToggle,
            }),
            View::Visited => Some(Self {
                header: "🖱️ Pages Visited",
                empty: "No pages visited...",
                timestamp_label: "Visited on",
                mode: ListMode::FavoriteToggle,
            }),
            View::Favorites => Some(Self {
                header: "⭐ Favorites",
                empty: "No favorites...",
                timestamp_label: "Favorited on",
                mode: ListMode::RemoveButton,
            }),
            View::Search => None,
        }
    }
}

/// Sorts newest first. Ties may land in any order.
pub fn sort_newest_first(records: &mut [Record]) {
    records.sort_unstable_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Renders lists; the timestamp formatter is swappable for deterministic output.
#[derive(Clone, Copy)]
pub struct ListRenderer {
    format_time: fn(i64) -> String,
}

impl Default for ListRenderer {
    fn default() -> Self {
        Self {
            format_time: format_timestamp,
        }
    }
}

impl ListRenderer {
    pub fn with_formatter(format_time: fn(i64) -> String) -> Self {
        Self { format_time }
    }

    /// Header followed by either the list or the empty-state text.
    pub fn render_records(&self, records: &[Record], copy: &ListCopy) -> Vec<ContentBlock> {
        let mut blocks = vec![ContentBlock::Header(copy.header.to_string())];
        if records.is_empty() {
            blocks.push(ContentBlock::EmptyState(copy.empty.to_string()));
            return blocks;
        }

        let items = records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let control = match copy.mode {
                    ListMode::FavoriteToggle => ItemControl::Favorite {
                        url: record.url.clone(),
                        title: record.title.clone(),
                        enabled: !record.is_favorite,
                    },
                    ListMode::RemoveButton => ItemControl::Remove {
                        url: record.url.clone(),
                    },
                };
                ListItem {
                    id: ItemId(i),
                    url: record.url.clone(),
                    title: display_title(&record.title).to_string(),
                    detail: format!(
                        "{} {}",
                        copy.timestamp_label,
                        (self.format_time)(record.timestamp)
                    ),
                    favorited: copy.mode == ListMode::RemoveButton || record.is_favorite,
                    control,
                }
            })
            .collect();
        blocks.push(ContentBlock::List(items));
        blocks
    }

    /// Stats line and blocks for a search outcome, hits kept in relevance order.
    pub fn render_search(&self, query: &str, outcome: &SearchOutcome) -> (String, Vec<ContentBlock>) {
        let stats = format_stats(outcome.hits.len(), outcome.elapsed);
        if outcome.hits.is_empty() {
            return (
                stats,
                vec![ContentBlock::NoResults {
                    query: query.to_string(),
                }],
            );
        }

        let items = outcome
            .hits
            .iter()
            .enumerate()
            .map(|(i, hit)| ListItem {
                id: ItemId(i),
                url: hit.location.clone(),
                title: display_title(&hit.title).to_string(),
                detail: format_hit_stats(hit.count, hit.score, &(self.format_time)(hit.timestamp)),
                favorited: false,
                control: ItemControl::Visit {
                    url: hit.location.clone(),
                    title: hit.title.clone(),
                },
            })
            .collect();
        (stats, vec![ContentBlock::List(items)])
    }
}
