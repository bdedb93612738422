//! Delete Confirm Button Component
//!
//! Two-step delete: the first click arms the button, the second one runs
//! the callback. Clicking "Keep" disarms it again.

use leptos::prelude::*;

/// Inline delete confirmation button
///
/// # Arguments
/// * `button_class` - CSS class of the unarmed button
/// * `subject` - what is being deleted, shown in the prompt
/// * `on_confirm` - runs once the user confirms
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into)] subject: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let armed = RwSignal::new(false);
    let prompt = format!("Delete {}?", subject);

    view! {
        <Show
            when=move || armed.get()
            fallback=move || {
                let class = button_class.clone();
                view! {
                    <button class=class title="Delete" on:click=move |_| armed.set(true)>
                        "×"
                    </button>
                }
            }
        >
            <span class="delete-confirm">
                <span class="delete-confirm-text">{prompt.clone()}</span>
                <button
                    class="confirm-btn"
                    on:click=move |_| {
                        armed.set(false);
                        on_confirm.run(());
                    }
                >
                    "Delete"
                </button>
                <button class="cancel-btn" on:click=move |_| armed.set(false)>
                    "Keep"
                </button>
            </span>
        </Show>
    }
}
