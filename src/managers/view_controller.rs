//! View Controller for SearchView.
//!
//! Turns one [`NavigationState`] into one [`RenderedPage`]: resolve the view,
//! issue exactly one data fetch (none for an empty search), and render.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use crate::services::navigation::NavigationState;
use crate::services::search_service::SearchServiceTrait;
use crate::services::session_client::SessionClientTrait;
use crate::types::view::{ResolvedView, View};
use crate::ui::list_renderer::{sort_newest_first, ListCopy, ListRenderer};
use crate::ui::view_model::RenderedPage;

/// Trait defining page rendering.
#[async_trait]
pub trait ViewControllerTrait: Send + Sync {
    async fn render(&self, nav: &NavigationState) -> RenderedPage;
}

/// Dispatches a navigation to the right fetch routine and renderer.
pub struct ViewController {
    session: Arc<dyn SessionClientTrait>,
    search: Arc<dyn SearchServiceTrait>,
    origin: String,
    renderer: ListRenderer,
}

impl ViewController {
    /// `origin` is the page's own origin, used to build canonical history URLs.
    pub fn new(
        session: Arc<dyn SessionClientTrait>,
        search: Arc<dyn SearchServiceTrait>,
        origin: &str,
    ) -> Self {
        Self {
            session,
            search,
            origin: origin.trim_end_matches('/').to_string(),
            renderer: ListRenderer::default(),
        }
    }

    pub fn with_renderer(mut self, renderer: ListRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Canonical URL recorded in history for an encoded query.
    pub fn history_url(&self, encoded_query: &str) -> String {
        format!("{}?q={}", self.origin, encoded_query)
    }

    async fn render_search(&self, raw: &str, encoded: &str, page: &mut RenderedPage) {
        page.search_value = Some(raw.to_string());

        let outcome = match self.search.search(encoded).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("search for {:?} failed: {}", encoded, e);
                page.alerts.push(e.to_string());
                return;
            }
        };

        // Recorded whether or not anything matched.
        if let Err(e) = self
            .session
            .append(View::History, &self.history_url(encoded), encoded)
            .await
        {
            warn!("recording search history failed: {}", e);
            page.alerts.push(e.to_string());
        }

        let (stats, blocks) = self.renderer.render_search(raw, &outcome);
        page.execution_stats = Some(stats);
        page.blocks.extend(blocks);
    }

    async fn render_collection(&self, view: View, page: &mut RenderedPage) {
        let Some(copy) = ListCopy::for_view(view) else {
            return;
        };
        match self.session.list(view).await {
            Ok(mut records) => {
                sort_newest_first(&mut records);
                page.blocks.extend(self.renderer.render_records(&records, &copy));
            }
            Err(e) => {
                warn!("listing {} failed: {}", view, e);
                page.alerts.push(e.to_string());
            }
        }
    }
}

#[async_trait]
impl ViewControllerTrait for ViewController {
    async fn render(&self, nav: &NavigationState) -> RenderedPage {
        let resolved = nav.resolve();
        debug!("resolved view: {:?}", resolved);

        let mut page = RenderedPage {
            view: resolved.view(),
            selected_option: Some(resolved.name().to_string()),
            ..RenderedPage::default()
        };

        match &resolved {
            ResolvedView::Search { raw, encoded } => {
                // An empty query is a no-op, not an error.
                if !encoded.is_empty() {
                    self.render_search(raw, encoded, &mut page).await;
                }
            }
            ResolvedView::History => self.render_collection(View::History, &mut page).await,
            ResolvedView::Visited => self.render_collection(View::Visited, &mut page).await,
            ResolvedView::Favorites => self.render_collection(View::Favorites, &mut page).await,
            ResolvedView::Unknown(_) => {}
        }
        page
    }
}
