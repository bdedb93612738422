//! Status Line Component
//!
//! Loading indicator, inventory load error and transient notices.

use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn StatusLine() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="status-line">
            <Show when=move || store.is_loading().get()>
                <span class="status-loading">"Loading…"</span>
            </Show>
            {move || store.error().get().map(|err| view! {
                <span class="status-error">{err}</span>
            })}
            {move || store.notice().get().map(|msg| view! {
                <span class="status-notice">{msg}</span>
            })}
        </div>
    }
}
