//! Inventory List Component
//!
//! One row per item with edit and delete actions.

use leptos::prelude::*;
use leptos::task::spawn_local;

use inventory_sync::InventoryItem;

use crate::components::DeleteConfirmButton;
use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn InventoryList() -> impl IntoView {
    let store = use_app_store();

    view! {
        <Show
            when=move || !store.items().read().is_empty()
            fallback=|| view! { <p class="inventory-empty">"No items yet"</p> }
        >
            <ul class="inventory-list">
                <For
                    each=move || store.items().get().into_iter().enumerate()
                    key=|(index, item)| row_key(*index, item)
                    children=move |(_, item)| view! { <InventoryRow item=item /> }
                />
            </ul>
        </Show>
    }
}

/// Records the store never identified all share the empty id, so they are
/// keyed by position instead.
fn row_key(index: usize, item: &InventoryItem) -> String {
    if item.id.is_empty() {
        format!("#{}", index)
    } else {
        item.id.clone()
    }
}

#[component]
fn InventoryRow(item: InventoryItem) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let category = ctx
        .inventory()
        .category_name(&item.category)
        .unwrap_or_else(|| item.category.clone());
    let avatar = item.avatar_url().map(str::to_owned);
    let quantity_class = if item.quantity.is_number() {
        "inventory-quantity"
    } else {
        "inventory-quantity invalid"
    };

    let id = item.id.clone();
    let name = item.name.clone();
    // Edit and delete need an id to address the remote record
    let actions = (!id.is_empty()).then(move || {
        let edit_id = id.clone();
        let on_delete = move |_: ()| {
            let id = id.clone();
            spawn_local(async move {
                match ctx.inventory().delete(&id).await {
                    Ok(_) => ctx.refresh(),
                    Err(err) => ctx.notify(err.to_string()),
                }
            });
        };
        view! {
            <button
                class="edit-btn"
                on:click=move |_| ctx.edit(Some(edit_id.clone()))
            >
                "Edit"
            </button>
            <DeleteConfirmButton button_class="delete-btn" subject=name on_confirm=on_delete />
        }
    });

    view! {
        <li class="inventory-row">
            {avatar.map(|url| view! { <img class="inventory-avatar" src=url alt="" /> })}
            <span class="inventory-name">{item.name.clone()}</span>
            <span class="inventory-category">{category}</span>
            <span class="inventory-price">{format!("{:.2}", item.price)}</span>
            <span class=quantity_class>{item.quantity.to_string()}</span>
            {actions}
        </li>
    }
}
