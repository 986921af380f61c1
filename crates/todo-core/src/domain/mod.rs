//! Domain Layer
//!
//! Typed records narrowed from the remote store and auth provider.

mod entity;
mod item;
mod session;

pub use entity::{Document, DomainError, DomainResult, Entity};
pub use item::{Item, ItemFields, ItemId};
pub use session::{Session, UserInfo};
