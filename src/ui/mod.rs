//! SearchView UI layer.
//!
//! `view_model` describes what a page shows, `list_renderer` builds it,
//! `page` applies it to a tree, and `html` turns the tree into markup.
//! With the `gui` feature, `webview_app` hosts that markup in a `wry` WebView.

pub mod html;
pub mod list_renderer;
pub mod page;
pub mod view_model;

#[cfg(feature = "gui")]
pub mod webview_app;
