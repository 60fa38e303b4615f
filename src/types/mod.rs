// SearchView shared type definitions
// Each submodule defines types used across the application.

pub mod errors;
pub mod record;
pub mod settings;
pub mod view;
