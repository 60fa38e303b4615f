//! App Core for SearchView.
//!
//! Central struct wiring settings, transport, session client, search service
//! and the view controller. Each page open yields a fresh page tree plus the
//! action handlers bound to it.

use std::sync::Arc;

use crate::managers::action_handlers::ActionHandlers;
use crate::managers::view_controller::{ViewController, ViewControllerTrait};
use crate::services::navigation::NavigationState;
use crate::services::search_service::SearchService;
use crate::services::session_client::{SessionClient, SessionClientTrait};
use crate::services::transport::{ReqwestTransport, Transport};
use crate::types::errors::TransportError;
use crate::types::settings::ClientSettings;
use crate::ui::page::{MemoryPage, PageSurface};

/// Central application struct.
pub struct App {
    pub settings: ClientSettings,
    session: Arc<dyn SessionClientTrait>,
    controller: ViewController,
}

/// A rendered page and the handlers wired to its items.
pub struct OpenPage {
    pub page: MemoryPage,
    pub handlers: ActionHandlers,
}

impl App {
    /// Builds an app on top of any transport.
    pub fn new(settings: ClientSettings, transport: Arc<dyn Transport>) -> Self {
        let session: Arc<dyn SessionClientTrait> =
            Arc::new(SessionClient::new(transport.clone(), &settings.session_endpoint));
        let search = Arc::new(SearchService::new(transport, &settings.search_endpoint));
        let controller = ViewController::new(session.clone(), search, &settings.origin);
        Self {
            settings,
            session,
            controller,
        }
    }

    /// Builds an app talking to the live server at `settings.origin`.
    pub fn connect(settings: ClientSettings) -> Result<Self, TransportError> {
        let transport = Arc::new(ReqwestTransport::new(&settings.origin)?);
        Ok(Self::new(settings, transport))
    }

    pub fn controller(&self) -> &ViewController {
        &self.controller
    }

    /// Renders `location` (absolute or `/?...`) into a fresh page.
    pub async fn open(&self, location: &str) -> Result<OpenPage, url::ParseError> {
        let nav = NavigationState::parse(location)?;
        let rendered = self.controller.render(&nav).await;

        let mut page = MemoryPage::new();
        page.apply_render(rendered);
        Ok(OpenPage {
            page,
            handlers: ActionHandlers::new(self.session.clone()),
        })
    }
}
