//! Firestore Item Collection
//!
//! `ItemStore` over one Firestore collection.

use async_trait::async_trait;
use todo_core::{ChangeBatch, ChangeCallback, DomainError, DomainResult, ItemFields, ItemId, ItemStore, Subscription};
use wasm_bindgen::prelude::*;

use super::{add_document, delete_document, js_error_message, subscribe_collection, update_document};
use crate::errors;

pub struct FirestoreItems {
    collection: String,
}

impl FirestoreItems {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
        }
    }
}

fn remote_error(err: JsValue) -> DomainError {
    DomainError::Remote(js_error_message(&err))
}

fn to_js(fields: &ItemFields) -> DomainResult<JsValue> {
    serde_wasm_bindgen::to_value(fields).map_err(|e| DomainError::InvalidInput(e.to_string()))
}

#[async_trait(?Send)]
impl ItemStore for FirestoreItems {
    async fn insert(&self, fields: &ItemFields) -> DomainResult<ItemId> {
        let js_fields = to_js(fields)?;
        let id = add_document(&self.collection, js_fields).await.map_err(remote_error)?;
        id.as_string()
            .map(ItemId::from)
            .ok_or_else(|| DomainError::Remote("store returned no document id".to_string()))
    }

    async fn set_fields(&self, id: &ItemId, fields: &ItemFields) -> DomainResult<()> {
        let js_fields = to_js(fields)?;
        update_document(&self.collection, id.as_str(), js_fields)
            .await
            .map_err(remote_error)?;
        Ok(())
    }

    async fn delete(&self, id: &ItemId) -> DomainResult<()> {
        delete_document(&self.collection, id.as_str())
            .await
            .map_err(remote_error)?;
        Ok(())
    }

    fn subscribe(&self, on_change: ChangeCallback) -> Subscription {
        let on_batch = Closure::<dyn Fn(JsValue)>::new(move |raw: JsValue| {
            match serde_wasm_bindgen::from_value::<ChangeBatch>(raw) {
                Ok(batch) => on_change(batch),
                Err(e) => tracing::error!(error = %e, "undecodable change batch"),
            }
        });
        let on_error = Closure::<dyn Fn(JsValue)>::new(move |message: JsValue| {
            let message = message.as_string().unwrap_or_else(|| "listening for changes failed".to_string());
            tracing::error!(%message, "collection listener failed");
            errors::report(message);
        });

        let unsubscribe = subscribe_collection(&self.collection, &on_batch, &on_error);
        tracing::debug!(collection = %self.collection, "listening for item changes");

        Subscription::new(move || {
            let _ = unsubscribe.call0(&JsValue::NULL);
            drop(on_batch);
            drop(on_error);
        })
    }
}
