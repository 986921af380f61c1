//! Item Entity
//!
//! A single todo entry. The remote store owns it; the local copy is a cache.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity::{Document, DomainError, DomainResult, Entity};

/// Opaque identifier assigned by the remote store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Remote document ID
    pub id: ItemId,
    /// Item text content
    pub text: String,
    /// Completion status (absent remotely = false)
    pub done: bool,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            done: false,
        }
    }

    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }
}

/// Shape of an item document as stored remotely
#[derive(Deserialize)]
struct ItemDocument {
    #[serde(default)]
    text: String,
    #[serde(default)]
    done: Option<bool>,
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn from_document(id: ItemId, doc: &Document) -> DomainResult<Self> {
        let parsed: ItemDocument = serde_json::from_value(serde_json::Value::Object(doc.clone()))
            .map_err(|e| DomainError::InvalidInput(format!("item {}: {}", id, e)))?;
        Ok(Self {
            id,
            text: parsed.text,
            done: parsed.done.unwrap_or(false),
        })
    }
}

/// Partial field set sent to the remote store. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

impl ItemFields {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            done: None,
        }
    }

    pub fn done(done: bool) -> Self {
        Self {
            text: None,
            done: Some(done),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.done.is_none()
    }

    /// Merge these fields over an existing document
    pub fn apply_to(&self, doc: &mut Document) {
        if let Some(text) = &self.text {
            doc.insert("text".to_string(), text.clone().into());
        }
        if let Some(done) = self.done {
            doc.insert("done".to_string(), done.into());
        }
    }

    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        self.apply_to(&mut doc);
        doc
    }
}
