//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use inventory_sync::{InventoryStore, RestRepository};

use crate::store::{AppStore, AppStateStoreFields};

/// Synchronized collection backed by the REST store
pub type Inventory = InventoryStore<RestRepository>;

/// How long a notice stays on screen
const NOTICE_TIMEOUT_MS: u32 = 4_000;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Reactive mirror of the collection
    pub state: AppStore,
    inventory: StoredValue<Rc<Inventory>, LocalStorage>,
}

impl AppContext {
    pub fn new(state: AppStore, inventory: Inventory) -> Self {
        Self {
            state,
            inventory: StoredValue::new_local(Rc::new(inventory)),
        }
    }

    pub fn inventory(&self) -> Rc<Inventory> {
        self.inventory.get_value()
    }

    /// Copy the collection into the reactive state
    pub fn refresh(&self) {
        let inventory = self.inventory();
        let status = inventory.status();
        *self.state.items().write() = inventory.items();
        *self.state.categories().write() = inventory.categories();
        *self.state.is_loading().write() = status.is_loading();
        *self.state.error().write() = status.error;
    }

    /// Reload categories and items from the remote store
    pub fn reload(&self) {
        let ctx = *self;
        *ctx.state.is_loading().write() = true;
        spawn_local(async move {
            let inventory = ctx.inventory();
            inventory.load_categories().await;
            inventory.load_inventories().await;
            ctx.refresh();
        });
    }

    /// Show a message until it times out or another one replaces it
    pub fn notify(&self, message: impl Into<String>) {
        let message = message.into();
        let notice = self.state.notice();
        *notice.write() = Some(message.clone());
        spawn_local(async move {
            TimeoutFuture::new(NOTICE_TIMEOUT_MS).await;
            let mut current = notice.write();
            if current.as_deref() == Some(message.as_str()) {
                *current = None;
            }
        });
    }

    /// Open an item in the editor, or switch the editor back to creating
    pub fn edit(&self, id: Option<String>) {
        *self.state.editing().write() = id;
    }
}
