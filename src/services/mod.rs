// SearchView services
// Services talk to the collaborators (search and session endpoints) and hold shared helpers.

pub mod formatting;
pub mod loopback;
pub mod navigation;
pub mod search_service;
pub mod session_client;
pub mod settings_engine;
pub mod transport;
