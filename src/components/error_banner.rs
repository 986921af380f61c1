//! Error Banner Component

use leptos::prelude::*;

use crate::store::{use_ui_store, UiStateStoreFields};

/// Global error banner; hidden when there is nothing to show
#[component]
pub fn ErrorBanner() -> impl IntoView {
    let ui = use_ui_store();

    view! {
        <div
            class="global-error-wrap"
            style:display=move || if ui.banner().get().visible { "block" } else { "none" }
        >
            <span>{move || ui.banner().get().message}</span>
        </div>
    }
}

/// Static banner for when the app could not start at all
#[component]
pub fn StartupError(message: String) -> impl IntoView {
    view! {
        <div class="global-error-wrap" style="display: block;">
            <span>{message}</span>
        </div>
    }
}
