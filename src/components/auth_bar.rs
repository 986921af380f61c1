//! Auth Bar Component
//!
//! Sign-in / sign-out controls and the signed-in user's name.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{use_ui_store, UiStateStoreFields};

#[component]
pub fn AuthBar() -> impl IntoView {
    let ctx = use_app_context();
    let ui = use_ui_store();

    view! {
        <div class="auth-bar">
            <span id="username">{move || ui.auth().get().username}</span>
            <button
                id="sign-in-btn"
                class:hide=move || !ui.auth().get().show_sign_in
                on:click=move |ev| {
                    ev.prevent_default();
                    ctx.spawn(|c| async move {
                        let _ = c.sign_in().await;
                    });
                }
            >
                "Sign in"
            </button>
            <button
                id="sign-out-btn"
                class:hide=move || !ui.auth().get().show_sign_out
                on:click=move |ev| {
                    ev.prevent_default();
                    ctx.spawn(|c| async move {
                        let _ = c.sign_out().await;
                    });
                }
            >
                "Sign out"
            </button>
        </div>
    }
}
