//! Reactive Application State
//!
//! Mirrors the synchronized collection into a reactive_stores Store so each
//! view only re-renders for the fields it reads.

use leptos::prelude::*;
use reactive_stores::Store;

use inventory_sync::{Category, InventoryItem};

#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Items as last synchronized
    pub items: Vec<InventoryItem>,
    /// Categories, possibly the built-in fallback list
    pub categories: Vec<Category>,
    pub is_loading: bool,
    /// Last inventory load failure
    pub error: Option<String>,
    /// Short-lived message from a failed create/update/delete
    pub notice: Option<String>,
    /// Id of the item open in the editor (None = creating)
    pub editing: Option<String>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Find an item in the store by ID without subscribing to changes
pub fn store_find_item(store: &AppStore, id: &str) -> Option<InventoryItem> {
    store.items().read_untracked().iter().find(|item| item.id == id).cloned()
}
