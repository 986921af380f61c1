//! Firebase Auth
//!
//! `AuthProvider` backed by Firebase Auth with the Google popup flow.

use async_trait::async_trait;
use todo_core::{AuthCallback, AuthProvider, DomainError, DomainResult, Subscription, UserInfo};
use wasm_bindgen::prelude::*;

use super::{js_error_message, on_auth_change, sign_in_with_popup, sign_out};

#[derive(Default)]
pub struct FirebaseAuth;

impl FirebaseAuth {
    pub fn new() -> Self {
        Self
    }
}

fn auth_error(err: JsValue) -> DomainError {
    DomainError::Auth(js_error_message(&err))
}

#[async_trait(?Send)]
impl AuthProvider for FirebaseAuth {
    fn on_auth_change(&self, callback: AuthCallback) -> Subscription {
        let listener = Closure::<dyn Fn(JsValue)>::new(move |raw: JsValue| {
            if raw.is_null() || raw.is_undefined() {
                callback(None);
                return;
            }
            match serde_wasm_bindgen::from_value::<UserInfo>(raw) {
                Ok(user) => callback(Some(user)),
                Err(e) => tracing::error!(error = %e, "undecodable user record"),
            }
        });
        let unsubscribe = on_auth_change(&listener);

        Subscription::new(move || {
            let _ = unsubscribe.call0(&JsValue::NULL);
            drop(listener);
        })
    }

    async fn sign_in_interactive(&self) -> DomainResult<UserInfo> {
        let raw = sign_in_with_popup().await.map_err(auth_error)?;
        serde_wasm_bindgen::from_value(raw).map_err(|e| DomainError::Auth(e.to_string()))
    }

    async fn sign_out(&self) -> DomainResult<()> {
        sign_out().await.map_err(auth_error)?;
        Ok(())
    }
}
