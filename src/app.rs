//! Fire-Todo Frontend App
//!
//! Wires the Firebase-backed controller to the component tree.

use std::rc::Rc;

use leptos::prelude::*;
use reactive_stores::Store;
use todo_core::{BackendConfig, Services, TodoController};

use crate::commands::{self, BrowserTimer, FirebaseAuth, FirestoreItems};
use crate::components::{AuthBar, ErrorBanner, StartupError, TodoForm, TodoList};
use crate::context::AppContext;
use crate::errors;
use crate::store::{store_apply_view, UiState, UiStore};

#[component]
pub fn App() -> impl IntoView {
    let config = commands::load_config().and_then(|config| {
        commands::connect(&config)?;
        Ok(config)
    });

    match config {
        Ok(config) => view! { <TodoApp config=config /> }.into_any(),
        Err(message) => {
            tracing::error!(%message, "backend configuration unusable");
            errors::close();
            view! { <StartupError message=message /> }.into_any()
        }
    }
}

#[component]
fn TodoApp(config: BackendConfig) -> impl IntoView {
    // State
    let ui: UiStore = Store::new(UiState::default());
    provide_context(ui);

    let services = Services {
        store: Rc::new(FirestoreItems::new(config.collection.clone())),
        auth: Rc::new(FirebaseAuth::new()),
        timer: Rc::new(BrowserTimer),
    };
    let controller = TodoController::new(services, config.dismiss_after(), move |view| {
        store_apply_view(&ui, view);
    });

    let reporter = controller.clone();
    errors::set_reporter(move |message| reporter.report_error(message));
    controller.start();

    let ctx = AppContext::new(controller);
    provide_context(ctx);

    on_cleanup(move || {
        errors::clear_reporter();
        ctx.with(|c| c.stop());
    });

    view! {
        <div class="app-layout">
            <header>
                <h1>"Todos"</h1>
                <AuthBar />
            </header>
            <ErrorBanner />
            <main class="main-content">
                <TodoForm />
                <TodoList />
            </main>
        </div>
    }
}
