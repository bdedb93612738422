//! Inventory Frontend App
//!
//! Main application component: status line, editor form and item list.

use leptos::prelude::*;
use reactive_stores::Store;

use inventory_sync::{ApiConfig, InventoryStore, RestRepository};

use crate::components::{InventoryEditor, InventoryList, StatusLine};
use crate::context::AppContext;
use crate::store::{AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());

    let repository = RestRepository::from_build_env().unwrap_or_else(|err| {
        log::error!("{}; using the default API", err);
        RestRepository::new(ApiConfig::default())
    });
    log::info!("inventory API at {}", repository.config().base_url());
    let ctx = AppContext::new(store, InventoryStore::new(repository));

    // Provide context to all children
    provide_context(store);
    provide_context(ctx);

    // Load categories and items on mount
    Effect::new(move |_| ctx.reload());

    view! {
        <div class="app-layout">
            <main class="main-content">
                <h1>"Inventory"</h1>

                <StatusLine />

                <InventoryEditor />

                <InventoryList />

                <p class="item-count">
                    {move || format!(
                        "{} items, {} categories",
                        store.items().read().len(),
                        store.categories().read().len(),
                    )}
                </p>
                <button class="reload-btn" on:click=move |_| ctx.reload()>"Reload"</button>
            </main>
        </div>
    }
}
