//! UI State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity: each slice of the
//! rendered view is its own field, so a list change does not touch the auth
//! bar and vice versa.

use leptos::prelude::*;
use reactive_stores::Store;
use todo_core::{AuthView, BannerView, FormView, ListView, View};

/// Last view produced by the controller
#[derive(Clone, Debug, Default, Store)]
pub struct UiState {
    pub list: ListView,
    pub auth: AuthView,
    pub form: FormView,
    pub banner: BannerView,
}

/// Type alias for the store
pub type UiStore = Store<UiState>;

/// Get the UI store from context
pub fn use_ui_store() -> UiStore {
    expect_context::<UiStore>()
}

/// Write a freshly rendered view into the store, touching only the slices
/// that differ from what is on screen
pub fn store_apply_view(store: &UiStore, view: View) {
    let View { list, auth, form, banner } = view;
    if store.list().with_untracked(|current| *current != list) {
        store.list().set(list);
    }
    if store.auth().with_untracked(|current| *current != auth) {
        store.auth().set(auth);
    }
    if store.form().with_untracked(|current| *current != form) {
        store.form().set(form);
    }
    if store.banner().with_untracked(|current| *current != banner) {
        store.banner().set(banner);
    }
}
