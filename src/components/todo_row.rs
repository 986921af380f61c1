//! Todo Row Component
//!
//! One item: its text (click to edit), a done checkbox and a delete link.

use leptos::prelude::*;
use todo_core::RowView;

use crate::context::use_app_context;

#[component]
pub fn TodoRow(row: RowView) -> impl IntoView {
    let ctx = use_app_context();

    let RowView { id, text, done, checkbox_id } = row;
    let edit_id = id.clone();
    let toggle_id = id.clone();
    let delete_id = id.clone();

    view! {
        <div class="list-item" data-id=id.to_string()>
            <a on:click=move |_| {
                ctx.with(|c| c.edit(&edit_id));
            }>{text}</a>
            <div class="actions">
                <div class="checkbox-wrap">
                    <input
                        type="checkbox"
                        id=checkbox_id.clone()
                        prop:checked=done
                        on:input=move |ev| {
                            let checked = event_target_checked(&ev);
                            let id = toggle_id.clone();
                            ctx.spawn(move |c| async move {
                                let _ = c.toggle_done(&id, checked).await;
                            });
                        }
                    />
                    <label for=checkbox_id></label>
                </div>
                <a on:click=move |_| {
                    let id = delete_id.clone();
                    ctx.spawn(move |c| async move {
                        let _ = c.delete(&id).await;
                    });
                }>"delete"</a>
            </div>
        </div>
    }
}
