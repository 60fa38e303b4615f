//! SearchView — presentation and session-sync layer for a personal search engine.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod managers;
pub mod services;
pub mod types;
pub mod ui;
