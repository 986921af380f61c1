//! Firebase Bindings
//!
//! Frontend bindings to the hosted backend, organized by concern. The raw
//! SDK calls live in `js/firebase-bridge.js`; this module adapts them to the
//! core crate's `ItemStore`, `AuthProvider` and `Timer` seams.

mod auth;
mod config;
mod items;
mod timer;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/js/firebase-bridge.js")]
extern "C" {
    #[wasm_bindgen(js_name = initFirebase, catch)]
    fn init_firebase(config: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = addDocument, catch)]
    async fn add_document(collection: &str, fields: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = updateDocument, catch)]
    async fn update_document(collection: &str, id: &str, fields: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = deleteDocument, catch)]
    async fn delete_document(collection: &str, id: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = subscribeCollection)]
    fn subscribe_collection(
        collection: &str,
        on_batch: &Closure<dyn Fn(JsValue)>,
        on_error: &Closure<dyn Fn(JsValue)>,
    ) -> js_sys::Function;

    #[wasm_bindgen(js_name = onAuthChange)]
    fn on_auth_change(callback: &Closure<dyn Fn(JsValue)>) -> js_sys::Function;

    #[wasm_bindgen(js_name = signInWithPopup, catch)]
    async fn sign_in_with_popup() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = signOut, catch)]
    async fn sign_out() -> Result<JsValue, JsValue>;
}

/// Best-effort human message from a thrown JS value
pub fn js_error_message(err: &JsValue) -> String {
    js_sys::Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}

pub use auth::FirebaseAuth;
pub use config::{connect, load_config};
pub use items::FirestoreItems;
pub use timer::BrowserTimer;
