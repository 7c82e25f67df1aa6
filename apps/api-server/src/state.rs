//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::Connector;

/// Shared application state.
///
/// Holds no connection itself; every request opens its own through `connector`.
#[derive(Clone)]
pub struct AppState {
    pub connector: Arc<dyn Connector>,
}

impl AppState {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self { connector }
    }
}
