// SearchView managers
// Managers orchestrate a page: rendering a navigation and handling user actions.

pub mod action_handlers;
pub mod view_controller;
