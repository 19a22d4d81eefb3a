use std::sync::Arc;

use mnemonic_core::BookmarkStore;

/// Shared handler state. Built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn BookmarkStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn BookmarkStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn BookmarkStore {
        self.store.as_ref()
    }
}
