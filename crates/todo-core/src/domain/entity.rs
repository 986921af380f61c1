//! Domain Layer - Core Entity Trait
//!
//! Every record mirrored from the remote store has an opaque ID and can be
//! narrowed from an untyped remote document.

use serde_json::{Map, Value};
use thiserror::Error;

/// Untyped field bag as delivered by the remote document store
pub type Document = Map<String, Value>;

/// Core trait for all mirrored entities
pub trait Entity: Sized + Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + std::hash::Hash + std::fmt::Display;

    /// Returns the entity's unique identifier
    fn id(&self) -> &Self::Id;

    /// Narrow a remote document into a typed entity
    fn from_document(id: Self::Id, doc: &Document) -> DomainResult<Self>;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Network or permission failure reported by the document store
    #[error("{0}")]
    Remote(String),
    /// Failure reported by the authentication provider
    #[error("{0}")]
    Auth(String),
}

impl DomainError {
    /// Message suitable for the global error banner
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
