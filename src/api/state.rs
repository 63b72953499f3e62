//! Shared state for the Web API server.

use std::sync::Arc;

use crate::api::auth::ServerAuth;
use crate::store::TaskStore;

/// Application state handed to every handler via axum `State`.
///
/// The store is the single process-wide mutable collection; handlers hold
/// it by `Arc` reference rather than through globals so tests can spin up
/// isolated instances.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TaskStore>,
    pub auth: Arc<ServerAuth>,
}

impl AppState {
    pub fn new(store: TaskStore, auth: ServerAuth) -> Self {
        Self {
            store: Arc::new(store),
            auth: Arc::new(auth),
        }
    }
}
