//! Fire-Todo Core
//!
//! Platform-free half of the todo client:
//! - domain: typed items and sessions narrowed from remote payloads
//! - sync: applies remote change batches to the local collection
//! - form / session / banner: the state slices behind the screen
//! - render: pure state-to-view function
//! - remote: seams for the document store, auth provider and timers
//! - controller: wires the above together
//! - memory: in-process backend with the hosted service's semantics

pub mod banner;
pub mod config;
pub mod controller;
pub mod domain;
pub mod form;
pub mod memory;
pub mod remote;
pub mod render;
pub mod session;
pub mod sync;

pub use banner::{DismissToken, ErrorBanner, PendingErrors};
pub use config::{BackendConfig, ConfigError};
pub use controller::{AppState, Services, SubmitOutcome, TodoController};
pub use domain::{Document, DomainError, DomainResult, Entity, Item, ItemFields, ItemId, Session, UserInfo};
pub use form::{FormMode, FormState, SaveIntent};
pub use remote::{AuthCallback, AuthProvider, ChangeCallback, ItemStore, Subscription, Timer};
pub use render::{AuthView, BannerView, FormView, ListView, RowView, View};
pub use session::SessionTracker;
pub use sync::{ChangeBatch, ChangeEvent, ChangeKind, ItemCollection};
