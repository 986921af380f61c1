//! Global Error Surface
//!
//! Routes uncaught errors, rejected promises, panics and listener failures to
//! the error banner. Messages that arrive before the banner exists are held
//! (bounded) and shown once it does; if the app never starts they are dropped.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use todo_core::PendingErrors;
use wasm_bindgen::prelude::*;

use crate::commands::js_error_message;

type Reporter = Rc<dyn Fn(String)>;

thread_local! {
    static REPORTER: RefCell<Option<Reporter>> = RefCell::new(None);
    static PENDING: RefCell<PendingErrors> = RefCell::new(PendingErrors::new());
}

/// Install the panic hook plus `window.onerror` and `unhandledrejection`
/// listeners so every uncaught failure reaches the banner
pub fn install_global_handler() {
    std::panic::set_hook(Box::new(report_panic));

    let Some(window) = web_sys::window() else {
        return;
    };

    let on_error = Closure::<dyn Fn(JsValue)>::new(|message: JsValue| {
        let message = message.as_string().unwrap_or_else(|| "Unexpected error".to_string());
        report(message);
    });
    window.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    // lives as long as the page
    on_error.forget();

    let on_rejection = Closure::<dyn Fn(JsValue)>::new(|event: JsValue| {
        let reason = js_sys::Reflect::get(&event, &JsValue::from_str("reason"))
            .unwrap_or(JsValue::UNDEFINED);
        report(js_error_message(&reason));
    });
    if let Err(e) = window
        .add_event_listener_with_callback("unhandledrejection", on_rejection.as_ref().unchecked_ref())
    {
        tracing::warn!(error = %js_error_message(&e), "could not listen for unhandled rejections");
    }
    on_rejection.forget();
}

fn report_panic(info: &std::panic::PanicHookInfo<'_>) {
    console_error_panic_hook::hook(info);
    let payload = info.payload();
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "Unexpected error".to_string());
    // state may be mid-borrow here; report from a fresh task
    Timeout::new(0, move || report(message)).forget();
}

/// Send every future message to `reporter`, flushing anything held
pub fn set_reporter(reporter: impl Fn(String) + 'static) {
    let reporter: Reporter = Rc::new(reporter);
    REPORTER.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&reporter)));
    let (held, dropped) = PENDING.with(|p| {
        let mut pending = p.borrow_mut();
        let dropped = pending.dropped();
        (pending.take(), dropped)
    });
    if dropped > 0 {
        tracing::warn!(dropped, "early error messages were dropped");
    }
    for message in held {
        reporter(message);
    }
}

pub fn clear_reporter() {
    REPORTER.with(|slot| slot.borrow_mut().take());
}

/// The app will never mount a banner; stop holding messages for one
pub fn close() {
    clear_reporter();
    PENDING.with(|p| p.borrow_mut().close());
}

/// Show `message` on the global error banner
pub fn report(message: impl Into<String>) {
    let message = message.into();
    tracing::error!(%message, "reporting error");
    let reporter = REPORTER.with(|slot| slot.borrow().clone());
    match reporter {
        Some(reporter) => reporter(message),
        None => {
            PENDING.with(|p| p.borrow_mut().push(message));
        }
    }
}
