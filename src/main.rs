//! Fire-Todo Frontend Entry Point

mod app;
mod commands;
mod components;
mod context;
mod errors;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    wasm_tracing::set_as_global_default();
    errors::install_global_handler();

    tracing::info!("starting Fire-Todo frontend");
    mount_to_body(App);
}
