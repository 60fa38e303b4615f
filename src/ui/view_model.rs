//! Typed description of what the page shows.
//!
//! The controller and action handlers only ever produce these values; a
//! [`PageSurface`](crate::ui::page::PageSurface) applies them to a real UI tree.

use std::fmt;

use crate::types::view::View;

pub const FAVORITE_LABEL: &str = "Favorite ⭐";
pub const FAVORITED_LABEL: &str = "Already favorited ⭐";
pub const REMOVE_LABEL: &str = "Remove 🗑️";

/// Per-render identifier of a list item, e.g. `item-3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub usize);

impl ItemId {
    /// Parses the `item-<n>` form produced by `Display`.
    pub fn parse(s: &str) -> Option<Self> {
        s.strip_prefix("item-")?.parse().ok().map(ItemId)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

/// The action wired to a list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemControl {
    /// Opening a search hit: navigate and record a `visited` entry.
    Visit { url: String, title: String },
    /// Favorite toggle on history/visited entries.
    Favorite {
        url: String,
        title: String,
        enabled: bool,
    },
    /// Remove button on favorites entries.
    Remove { url: String },
}

impl ItemControl {
    /// Button text, `None` for plain links.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            ItemControl::Visit { .. } => None,
            ItemControl::Favorite { enabled: true, .. } => Some(FAVORITE_LABEL),
            ItemControl::Favorite { enabled: false, .. } => Some(FAVORITED_LABEL),
            ItemControl::Remove { .. } => Some(REMOVE_LABEL),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, ItemControl::Favorite { enabled: false, .. })
    }
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub id: ItemId,
    /// Small URL line above the title.
    pub url: String,
    /// Display title, never empty.
    pub title: String,
    /// Stat or timestamp line under the title.
    pub detail: String,
    /// Entry lives in the favorites collection.
    pub favorited: bool,
    pub control: ItemControl,
}

/// A block appended to the results container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    Header(String),
    List(Vec<ListItem>),
    /// Centered text shown instead of an empty list.
    EmptyState(String),
    /// Search produced nothing for `query`.
    NoResults { query: String },
}

/// Everything one page render produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedPage {
    /// Recognised view that was rendered.
    pub view: Option<View>,
    /// Name of the view option to mark selected (`<name>-view`).
    pub selected_option: Option<String>,
    /// Value for the search input.
    pub search_value: Option<String>,
    /// Execution stats line, search view only.
    pub execution_stats: Option<String>,
    pub blocks: Vec<ContentBlock>,
    /// Failures to report to the user, in order.
    pub alerts: Vec<String>,
}

impl RenderedPage {
    /// All list items across blocks, in render order.
    pub fn items(&self) -> impl Iterator<Item = &ListItem> {
        self.blocks.iter().flat_map(|block| match block {
            ContentBlock::List(items) => items.as_slice(),
            _ => &[][..],
        })
    }
}

/// An incremental change produced by an action handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagePatch {
    None,
    DisableFavorite(ItemId),
    RemoveItem(ItemId),
    Alert(String),
    /// Full navigation (view switch or new search).
    Navigate(String),
    /// Open an external page without leaving this one.
    OpenLink(String),
}
