//! Inventory Editor Component
//!
//! Form for creating a new item or editing the one selected in the list.
//! Form fields go through the same normalizer as remote payloads, so a
//! non-numeric quantity is submitted verbatim rather than zeroed.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::json;

use inventory_sync::{normalize_item, InventoryItem, DESCRIPTION_LIMIT};

use crate::context::AppContext;
use crate::store::{store_find_item, use_app_store, AppStateStoreFields};

#[component]
pub fn InventoryEditor() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let (name, set_name) = signal(String::new());
    let (category, set_category) = signal(String::new());
    let (price, set_price) = signal(String::new());
    let (quantity, set_quantity) = signal(String::new());
    let (description, set_description) = signal(String::new());

    let clear = move || {
        set_name.set(String::new());
        set_category.set(String::new());
        set_price.set(String::new());
        set_quantity.set(String::new());
        set_description.set(String::new());
    };

    // Prefill when an item is opened for editing
    Effect::new(move |_| match store.editing().get() {
        Some(id) => {
            if let Some(item) = store_find_item(&store, &id) {
                set_name.set(item.name);
                set_category.set(item.category);
                set_price.set(item.price.to_string());
                set_quantity.set(item.quantity.to_string());
                set_description.set(item.description);
            }
        }
        None => clear(),
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let fields = normalize_item(&json!({
            "name": name.get(),
            "category": category.get(),
            "price": price.get(),
            "quantity": quantity.get(),
            "description": description.get(),
        }));
        if fields.name.is_empty() {
            ctx.notify("Name is required");
            return;
        }
        let editing = store.editing().get_untracked();

        spawn_local(async move {
            let inventory = ctx.inventory();
            let result = match editing {
                Some(id) => {
                    let current = store_find_item(&store, &id).unwrap_or_default();
                    let draft = InventoryItem {
                        id: id.clone(),
                        photos: current.photos,
                        avatar: current.avatar,
                        avatar_index: current.avatar_index,
                        ..fields
                    };
                    inventory.update(&id, &draft).await
                }
                None => inventory.create(&fields).await,
            };
            match result {
                Ok(_) => {
                    ctx.edit(None);
                    clear();
                    ctx.refresh();
                }
                Err(err) => ctx.notify(err.to_string()),
            }
        });
    };

    view! {
        <form class="inventory-editor" on:submit=on_submit>
            <input
                type="text"
                placeholder="Name"
                prop:value=move || name.get()
                on:input=move |ev| set_name.set(event_target_value(&ev))
            />
            <select
                prop:value=move || category.get()
                on:change=move |ev| set_category.set(event_target_value(&ev))
            >
                <option value="">"No category"</option>
                <For
                    each=move || store.categories().get()
                    key=|c| c.id.clone()
                    children=move |c| view! { <option value=c.id.clone()>{c.name.clone()}</option> }
                />
            </select>
            <input
                type="text"
                placeholder="Price"
                prop:value=move || price.get()
                on:input=move |ev| set_price.set(event_target_value(&ev))
            />
            <input
                type="text"
                placeholder="Quantity"
                prop:value=move || quantity.get()
                on:input=move |ev| set_quantity.set(event_target_value(&ev))
            />
            <textarea
                placeholder="Description"
                maxlength=DESCRIPTION_LIMIT.to_string()
                prop:value=move || description.get()
                on:input=move |ev| set_description.set(event_target_value(&ev))
            />
            <button type="submit">
                {move || if store.editing().read().is_some() { "Save" } else { "Add" }}
            </button>
            {move || store.editing().get().map(|_| view! {
                <button type="button" class="cancel-btn" on:click=move |_| ctx.edit(None)>
                    "Cancel"
                </button>
            })}
        </form>
    }
}
