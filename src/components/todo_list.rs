//! Todo List Component
//!
//! Redraws every row whenever the list slice changes; lists are small.

use leptos::prelude::*;

use super::TodoRow;
use crate::store::{use_ui_store, UiStateStoreFields};

#[component]
pub fn TodoList() -> impl IntoView {
    let ui = use_ui_store();

    view! {
        <div id="todo-list">
            {move || {
                ui.list()
                    .get()
                    .rows
                    .into_iter()
                    .map(|row| view! { <TodoRow row=row /> })
                    .collect_view()
            }}
        </div>
    }
}
