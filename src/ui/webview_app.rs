//! WebView front end using `wry` + `tao`.
//!
//! Architecture:
//! - The current page tree lives in Rust; the webview shows `render_html` of it,
//!   served over the `sv://` custom protocol.
//! - Clicks, searches and view switches arrive as IPC messages
//!   (`{"item": "item-3"}`, `{"search": "..."}`, `{"view": "history"}`).
//! - Patches are applied to the page tree and the page is re-served; only
//!   navigations re-render from the server.

use std::sync::{Arc, Mutex};

use log::{debug, warn};
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder};
use tao::window::WindowBuilder;
use wry::WebViewBuilder;

use crate::app::{App, OpenPage};
use crate::types::view::View;
use crate::ui::html::render_html;
use crate::ui::page::PageSurface;
use crate::ui::view_model::{ItemId, PagePatch};

const PAGE_URL: &str = "sv://localhost/";

#[derive(Debug)]
enum UserEvent {
    /// Re-serve the current page tree.
    Refresh,
    /// Open an external page.
    LoadUrl(String),
}

struct ShellState {
    app: App,
    current: OpenPage,
    runtime: tokio::runtime::Runtime,
    /// Alerts already shown to the user.
    shown_alerts: usize,
}

impl ShellState {
    fn open(&mut self, location: &str) {
        match self.runtime.block_on(self.app.open(location)) {
            Ok(page) => {
                self.current = page;
                self.shown_alerts = 0;
            }
            Err(e) => warn!("cannot open {}: {}", location, e),
        }
    }

    /// Current page as HTML, with a script raising any alerts not shown yet.
    fn serve(&mut self) -> String {
        let html = render_html(&self.current.page);
        let pending = &self.current.page.alerts[self.shown_alerts.min(self.current.page.alerts.len())..];
        let mut script = String::new();
        for message in pending {
            let literal = serde_json::to_string(message).unwrap_or_else(|_| "\"\"".to_string());
            script.push_str(&format!("window.alert({});", literal));
        }
        self.shown_alerts = self.current.page.alerts.len();
        if script.is_empty() {
            html
        } else {
            html.replace("</body>", &format!("<script>{}</script></body>", script))
        }
    }
}

fn apply(state: &mut ShellState, patches: Vec<PagePatch>) -> Vec<UserEvent> {
    let mut events = Vec::new();
    for patch in patches {
        match patch {
            PagePatch::Navigate(location) => {
                state.open(&location);
                events.push(UserEvent::Refresh);
            }
            PagePatch::OpenLink(url) => events.push(UserEvent::LoadUrl(url)),
            PagePatch::None => {}
            other => {
                state.current.page.apply_patch(other);
                events.push(UserEvent::Refresh);
            }
        }
    }
    events
}

fn handle_ipc(state: &mut ShellState, body: &str) -> Vec<UserEvent> {
    let Ok(msg) = serde_json::from_str::<serde_json::Value>(body) else {
        warn!("malformed IPC message");
        return Vec::new();
    };

    if let Some(item) = msg.get("item").and_then(|v| v.as_str()).and_then(ItemId::parse) {
        let Some(control) = state.current.page.control(item) else {
            return Vec::new();
        };
        let patches = state
            .runtime
            .block_on(state.current.handlers.activate(item, control));
        return apply(state, patches);
    }
    if let Some(input) = msg.get("search").and_then(|v| v.as_str()) {
        let patch = state.current.handlers.run_search(input);
        return apply(state, vec![patch]);
    }
    if let Some(choice) = msg.get("view").and_then(|v| v.as_str()) {
        let patch = state.current.handlers.switch_view(choice.parse::<View>().ok());
        return apply(state, vec![patch]);
    }
    Vec::new()
}

/// Opens the main window on `location` and runs the event loop.
pub fn run(app: App, location: &str) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    let current = runtime.block_on(app.open(location))?;
    let state = Arc::new(Mutex::new(ShellState {
        app,
        current,
        runtime,
        shown_alerts: 0,
    }));

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title("Search")
        .with_inner_size(tao::dpi::LogicalSize::new(1024.0, 768.0))
        .build(&event_loop)?;

    let protocol_state = state.clone();
    let ipc_state = state.clone();

    let builder = WebViewBuilder::new()
        .with_custom_protocol("sv".into(), move |_wv_id, _request| {
            let html = match protocol_state.lock() {
                Ok(mut s) => s.serve(),
                Err(_) => String::from("<!DOCTYPE html><p>unavailable</p>"),
            };
            wry::http::Response::builder()
                .header("Content-Type", "text/html; charset=utf-8")
                .body(html.into_bytes().into())
                .unwrap_or_else(|_| wry::http::Response::new(Vec::new().into()))
        })
        .with_url(PAGE_URL)
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let body = msg.body().as_str();
            debug!("[IPC] {}", body.chars().take(200).collect::<String>());
            let events = match ipc_state.lock() {
                Ok(mut s) => handle_ipc(&mut s, body),
                Err(_) => Vec::new(),
            };
            for event in events {
                let _ = proxy.send_event(event);
            }
        })
        .with_devtools(cfg!(debug_assertions));

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window.default_vbox().ok_or("no GTK vbox")?;
        builder.build_gtk(vbox)?
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(&window)?;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => *control_flow = ControlFlow::Exit,
            Event::UserEvent(UserEvent::Refresh) => {
                let _ = webview.load_url(PAGE_URL);
            }
            Event::UserEvent(UserEvent::LoadUrl(url)) => {
                debug!("[LOAD] {}", url);
                let _ = webview.load_url(&url);
            }
            _ => {}
        }
    })
}
