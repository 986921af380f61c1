//! Todo Form Component
//!
//! Single form used both to add new items and to edit the selected one.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{use_ui_store, UiStateStoreFields};

#[component]
pub fn TodoForm() -> impl IntoView {
    let ctx = use_app_context();
    let ui = use_ui_store();

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        ctx.spawn(|c| async move {
            c.submit().await;
        });
    };

    view! {
        <form class="todo-form" on:submit=save>
            <input
                type="text"
                name="todo"
                placeholder="What needs doing?"
                prop:value=move || ui.form().get().text
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    ctx.with(|c| c.set_text(text));
                }
            />
            <button id="add-btn" type="submit">
                {move || ui.form().get().submit_label}
            </button>
            <button
                id="reset-btn"
                type="button"
                on:click=move |_| {
                    ctx.with(|c| c.reset_form());
                }
            >
                "Reset"
            </button>
        </form>
    }
}
