//! View Renderer
//!
//! Pure function from application state to a declarative description of the
//! screen. The platform layer applies a [`View`] to the real surface.

use crate::banner::ErrorBanner;
use crate::domain::{Item, ItemId, Session};
use crate::form::FormState;
use crate::sync::ItemCollection;

/// Everything the screen shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    pub list: ListView,
    pub auth: AuthView,
    pub form: FormView,
    pub banner: BannerView,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    pub rows: Vec<RowView>,
    /// Bumped when the surface may show row state the items do not hold,
    /// so the rows get redrawn even if their content is unchanged
    pub revision: u64,
}

/// One item row: text (edit trigger), done checkbox and delete trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: ItemId,
    pub text: String,
    pub done: bool,
    pub checkbox_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthView {
    pub show_sign_in: bool,
    pub show_sign_out: bool,
    pub username: String,
}

impl Default for AuthView {
    fn default() -> Self {
        render_auth(&Session::signed_out())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub text: String,
    pub submit_label: &'static str,
    pub target: Option<ItemId>,
}

impl Default for FormView {
    fn default() -> Self {
        render_form(&FormState::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerView {
    pub visible: bool,
    pub message: String,
}

/// Borrowed view of the state slices the renderer reads
pub struct RenderInput<'a> {
    pub items: &'a ItemCollection,
    pub list_revision: u64,
    pub session: &'a Session,
    pub form: &'a FormState,
    pub banner: &'a ErrorBanner,
}

pub fn render(input: RenderInput<'_>) -> View {
    View {
        list: render_list(input.items, input.list_revision),
        auth: render_auth(input.session),
        form: render_form(input.form),
        banner: render_banner(input.banner),
    }
}

pub fn render_list(items: &ItemCollection, revision: u64) -> ListView {
    ListView {
        rows: items.items().iter().map(render_row).collect(),
        revision,
    }
}

fn render_row(item: &Item) -> RowView {
    RowView {
        id: item.id.clone(),
        text: item.text.clone(),
        done: item.done,
        checkbox_id: format!("cb-{}", item.id),
    }
}

pub fn render_auth(session: &Session) -> AuthView {
    AuthView {
        show_sign_in: !session.authenticated,
        show_sign_out: session.authenticated,
        username: if session.authenticated {
            session.display_name.clone().unwrap_or_default()
        } else {
            String::new()
        },
    }
}

pub fn render_form(form: &FormState) -> FormView {
    FormView {
        text: form.text().to_string(),
        submit_label: if form.is_editing() { "Update" } else { "Add" },
        target: form.target().cloned(),
    }
}

pub fn render_banner(banner: &ErrorBanner) -> BannerView {
    BannerView {
        visible: banner.is_visible(),
        message: banner.message().unwrap_or_default().to_string(),
    }
}
