//! Application state.

use std::sync::Arc;

use visit_store::VisitStore;

use crate::config::Config;

/// Shared application state.
///
/// Holds no per-user selection: the active user travels with each request.
pub struct AppState<S: VisitStore> {
    /// Server configuration.
    pub config: Config,
    /// Visit store.
    pub store: S,
}

impl<S: VisitStore> AppState<S> {
    /// Creates new application state.
    pub fn new(config: Config, store: S) -> Self {
        Self { config, store }
    }
}

/// Type alias for shared state.
pub type SharedState<S> = Arc<AppState<S>>;

/// Creates shared state from config and store.
pub fn create_shared_state<S: VisitStore>(config: Config, store: S) -> SharedState<S> {
    Arc::new(AppState::new(config, store))
}
