//! Application state shared across handlers.

use std::sync::Arc;

use crate::store::Store;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The store handle is the only
/// shared state; handlers are otherwise stateless.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Store,
}

impl AppState {
    /// Create a new application state around a store handle.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store }),
        }
    }

    /// Get a reference to the document store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }
}
