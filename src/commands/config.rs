//! Backend Configuration
//!
//! Reads the connection settings the page publishes on `window` and
//! initializes the SDK with them.

use todo_core::BackendConfig;
use wasm_bindgen::prelude::*;

use super::{init_firebase, js_error_message};

/// Global object holding the Firebase project settings
const CONFIG_GLOBAL: &str = "FIRE_TODO_CONFIG";

pub fn load_config() -> Result<BackendConfig, String> {
    let window = web_sys::window().ok_or("no window")?;
    let raw = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))
        .map_err(|e| js_error_message(&e))?;
    if raw.is_undefined() || raw.is_null() {
        return Err(format!("window.{} is not set", CONFIG_GLOBAL));
    }
    let json: String = js_sys::JSON::stringify(&raw)
        .map_err(|e| js_error_message(&e))?
        .into();
    BackendConfig::from_json(&json).map_err(|e| e.to_string())
}

/// Initialize the SDK for `config`
pub fn connect(config: &BackendConfig) -> Result<(), String> {
    let js_config = serde_wasm_bindgen::to_value(config).map_err(|e| e.to_string())?;
    init_firebase(js_config).map_err(|e| js_error_message(&e))?;
    tracing::info!(project = %config.project_id, collection = %config.collection, "connected to backend");
    Ok(())
}
