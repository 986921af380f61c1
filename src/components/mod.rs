//! UI Components
//!
//! Leptos components that draw the controller's view.

mod auth_bar;
mod error_banner;
mod todo_form;
mod todo_list;
mod todo_row;

pub use auth_bar::AuthBar;
pub use error_banner::{ErrorBanner, StartupError};
pub use todo_form::TodoForm;
pub use todo_list::TodoList;
pub use todo_row::TodoRow;
