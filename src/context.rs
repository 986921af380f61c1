//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_core::TodoController;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Single-threaded controller, kept in the local arena
    controller: StoredValue<TodoController, LocalStorage>,
}

impl AppContext {
    pub fn new(controller: TodoController) -> Self {
        Self {
            controller: StoredValue::new_local(controller),
        }
    }

    pub fn controller(&self) -> Option<TodoController> {
        self.controller.try_get_value()
    }

    /// Run a synchronous intent
    pub fn with<R>(&self, f: impl FnOnce(&TodoController) -> R) -> Option<R> {
        self.controller().map(|c| f(&c))
    }

    /// Run an async intent to completion on the local executor
    pub fn spawn<F, Fut>(&self, task: F)
    where
        F: FnOnce(TodoController) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        if let Some(controller) = self.controller() {
            spawn_local(task(controller));
        }
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
