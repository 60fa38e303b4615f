//! Action Handlers for SearchView.
//!
//! User-triggered callbacks. Each handler performs at most one session call
//! and returns the [`PagePatch`]es to apply; nothing is changed before the
//! server confirms, so a failure only needs to be reported.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use log::{debug, warn};

use crate::services::navigation::{search_location, view_switch_location};
use crate::services::session_client::SessionClientTrait;
use crate::types::view::View;
use crate::ui::page::PageSurface;
use crate::ui::view_model::{ItemControl, ItemId, PagePatch};

/// Handlers bound to one rendered page.
pub struct ActionHandlers {
    session: Arc<dyn SessionClientTrait>,
    /// Favorite toggles with a request in flight or already confirmed.
    claimed: Mutex<HashSet<ItemId>>,
}

impl ActionHandlers {
    pub fn new(session: Arc<dyn SessionClientTrait>) -> Self {
        Self {
            session,
            claimed: Mutex::new(HashSet::new()),
        }
    }

    /// Navigates to a search for `input`.
    pub fn run_search(&self, input: &str) -> PagePatch {
        PagePatch::Navigate(search_location(input))
    }

    /// Navigates to the chosen view, or `/` when nothing is chosen.
    pub fn switch_view(&self, choice: Option<View>) -> PagePatch {
        PagePatch::Navigate(view_switch_location(choice))
    }

    /// Opens a search hit and records it as visited.
    pub async fn visit(&self, url: &str, title: &str) -> Vec<PagePatch> {
        let mut patches = vec![PagePatch::OpenLink(url.to_string())];
        if let Err(e) = self.session.append(View::Visited, url, title).await {
            warn!("recording visit to {} failed: {}", url, e);
            patches.push(PagePatch::Alert(e.to_string()));
        }
        patches
    }

    /// Adds a favorite and disables the toggle once the server confirms.
    ///
    /// Repeated clicks while a request for the same item is in flight, or
    /// after it succeeded, are ignored.
    pub async fn favorite(&self, item: ItemId, url: &str, title: &str) -> PagePatch {
        if !self.claim(item) {
            debug!("favorite for {} already requested", item);
            return PagePatch::None;
        }
        match self.session.append(View::Favorites, url, title).await {
            Ok(()) => PagePatch::DisableFavorite(item),
            Err(e) => {
                warn!("favoriting {} failed: {}", url, e);
                self.release(item);
                PagePatch::Alert(e.to_string())
            }
        }
    }

    /// Removes a favorite and its list item once the server confirms.
    pub async fn unfavorite(&self, item: ItemId, url: &str) -> PagePatch {
        match self.session.remove(url).await {
            Ok(()) => PagePatch::RemoveItem(item),
            Err(e) => {
                warn!("removing favorite {} failed: {}", url, e);
                PagePatch::Alert(e.to_string())
            }
        }
    }

    /// Runs the handler registered for `control`.
    pub async fn activate(&self, item: ItemId, control: ItemControl) -> Vec<PagePatch> {
        match control {
            ItemControl::Visit { url, title } => self.visit(&url, &title).await,
            ItemControl::Favorite {
                url,
                title,
                enabled: true,
            } => vec![self.favorite(item, &url, &title).await],
            ItemControl::Favorite { enabled: false, .. } => vec![PagePatch::None],
            ItemControl::Remove { url } => vec![self.unfavorite(item, &url).await],
        }
    }

    /// Looks up the control for `item` on `page`, runs it, and applies the result.
    ///
    /// Returns `false` when the item has no active control.
    pub async fn click<P: PageSurface>(&self, page: &mut P, item: ItemId) -> bool {
        let Some(control) = page.control(item) else {
            return false;
        };
        for patch in self.activate(item, control).await {
            page.apply_patch(patch);
        }
        true
    }

    fn claim(&self, item: ItemId) -> bool {
        match self.claimed.lock() {
            Ok(mut claimed) => claimed.insert(item),
            Err(_) => true,
        }
    }

    fn release(&self, item: ItemId) {
        if let Ok(mut claimed) = self.claimed.lock() {
            claimed.remove(&item);
        }
    }
}
