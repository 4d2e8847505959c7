//! Application state for the web layer.

use crate::presenter::SceneStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Live page model, written by the session loop
    pub store: SceneStore,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: SceneStore) -> Self {
        Self { store }
    }
}
