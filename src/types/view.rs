use std::fmt;
use std::str::FromStr;

/// One of the four presentation modes of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Search,
    History,
    Visited,
    Favorites,
}

impl View {
    pub const ALL: [View; 4] = [View::Search, View::History, View::Visited, View::Favorites];

    /// Wire name used in `?view=` parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Search => "search",
            View::History => "history",
            View::Visited => "visited",
            View::Favorites => "favorites",
        }
    }

    /// Whether this view is backed by a server-side session collection.
    pub fn is_session_collection(&self) -> bool {
        !matches!(self, View::Search)
    }

    /// Id of the view-selection control for this view.
    pub fn option_id(&self) -> String {
        format!("{}-view", self.as_str())
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "search" => Ok(View::Search),
            "history" => Ok(View::History),
            "visited" => Ok(View::Visited),
            "favorites" => Ok(View::Favorites),
            other => Err(format!("unknown view: {}", other)),
        }
    }
}

/// The outcome of resolving navigation state into something to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedView {
    /// Search view. `encoded` is empty when there is nothing to search for.
    Search { raw: String, encoded: String },
    History,
    Visited,
    Favorites,
    /// A `view` value nobody recognises; renders nothing.
    Unknown(String),
}

impl ResolvedView {
    /// The recognised view, if any.
    pub fn view(&self) -> Option<View> {
        match self {
            ResolvedView::Search { .. } => Some(View::Search),
            ResolvedView::History => Some(View::History),
            ResolvedView::Visited => Some(View::Visited),
            ResolvedView::Favorites => Some(View::Favorites),
            ResolvedView::Unknown(_) => None,
        }
    }

    /// Name used to select the view option control, recognised or not.
    pub fn name(&self) -> &str {
        match self {
            ResolvedView::Unknown(name) => name,
            other => other.view().map(|v| v.as_str()).unwrap_or_default(),
        }
    }
}
