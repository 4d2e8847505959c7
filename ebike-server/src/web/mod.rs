//! Web layer for the station finder.
//!
//! Serves the map page shell, its static assets, and the live page model
//! the page polls.

mod routes;
mod state;
pub mod templates;

pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
