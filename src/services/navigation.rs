//! Navigation state for SearchView.
//!
//! The page URL is parsed exactly once per render into an immutable
//! [`NavigationState`]; everything downstream works from the resolved value
//! instead of re-reading the location.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use crate::types::view::{ResolvedView, View};

/// Characters left untouched by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Base used to resolve relative locations such as `/?q=cats`.
const RELATIVE_BASE: &str = "http://localhost/";

/// Percent-encodes a single URL component.
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Query parameters relevant to rendering, captured from one location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub view: Option<String>,
    pub query: Option<String>,
}

impl NavigationState {
    /// Parses an absolute URL or an origin-relative location.
    ///
    /// Repeated parameters resolve to their last occurrence.
    pub fn parse(location: &str) -> Result<Self, url::ParseError> {
        let url = match Url::parse(location) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Url::parse(RELATIVE_BASE)?.join(location)?
            }
            Err(e) => return Err(e),
        };

        let mut state = NavigationState::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "view" => state.view = Some(value.into_owned()),
                "q" => state.query = Some(value.into_owned()),
                _ => {}
            }
        }
        Ok(state)
    }

    /// Resolves which view to render. A missing or empty `view` means search.
    pub fn resolve(&self) -> ResolvedView {
        let name = self.view.as_deref().unwrap_or_default();
        if name.is_empty() {
            return self.resolve_search();
        }
        match name.parse::<View>() {
            Ok(View::Search) => self.resolve_search(),
            Ok(View::History) => ResolvedView::History,
            Ok(View::Visited) => ResolvedView::Visited,
            Ok(View::Favorites) => ResolvedView::Favorites,
            Err(_) => ResolvedView::Unknown(name.to_string()),
        }
    }

    fn resolve_search(&self) -> ResolvedView {
        let raw = self.query.as_deref().unwrap_or_default().trim().to_string();
        let encoded = encode_component(&raw);
        ResolvedView::Search { raw, encoded }
    }
}

/// Location the view-selection control navigates to.
pub fn view_switch_location(choice: Option<View>) -> String {
    match choice {
        Some(view) => format!("/?view={}", view.as_str()),
        None => "/".to_string(),
    }
}

/// Location for running a search from the search box.
pub fn search_location(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/?q={}", encode_component(trimmed))
    }
}
