//! Form Controller
//!
//! Single-item edit form with two modes: creating a new item, or editing an
//! existing one. Submission produces a [`SaveIntent`]; the controller sends it
//! and resets the form afterwards.

use crate::domain::{ItemFields, ItemId};
use crate::sync::ItemCollection;

/// Which item (if any) the form is bound to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit { target: ItemId },
}

/// A validated remote write produced by submitting the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveIntent {
    Insert { fields: ItemFields },
    Update { id: ItemId, fields: ItemFields },
}

/// Current form contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    mode: FormMode,
    text: String,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn target(&self) -> Option<&ItemId> {
        match &self.mode {
            FormMode::Create => None,
            FormMode::Edit { target } => Some(target),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Load an item's current text and bind the form to it.
    /// Returns false when the item is not in the local collection.
    pub fn begin_edit(&mut self, items: &ItemCollection, id: &ItemId) -> bool {
        match items.get(id) {
            Some(item) => {
                self.text = item.text.clone();
                self.mode = FormMode::Edit {
                    target: item.id.clone(),
                };
                true
            }
            None => {
                tracing::warn!(id = %id, "edit requested for unknown item");
                false
            }
        }
    }

    /// Clear text and return to create mode
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate the form and build the remote write it stands for.
    /// Empty or whitespace-only text yields `None` and leaves the form as is.
    pub fn submission(&self) -> Option<SaveIntent> {
        if self.text.trim().is_empty() {
            return None;
        }
        let fields = ItemFields::text(self.text.clone());
        Some(match &self.mode {
            FormMode::Create => SaveIntent::Insert { fields },
            FormMode::Edit { target } => SaveIntent::Update {
                id: target.clone(),
                fields,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::ChangeEvent;
    use serde_json::json;

    fn collection_with(id: &str, text: &str) -> ItemCollection {
        let mut items = ItemCollection::new();
        let fields = json!({ "text": text }).as_object().cloned().unwrap();
        items.apply(&ChangeEvent::added(id, fields));
        items
    }

    #[test]
    fn test_blank_text_is_rejected() {
        let mut form = FormState::new();
        assert_eq!(form.submission(), None);
        form.set_text("   ");
        assert_eq!(form.submission(), None);
        form.set_text("\t\n");
        assert_eq!(form.submission(), None);
        assert_eq!(form.text(), "\t\n");
        assert_eq!(form.mode(), &FormMode::Create);
    }

    #[test]
    fn test_create_submission() {
        let mut form = FormState::new();
        form.set_text("Buy milk");
        assert_eq!(
            form.submission(),
            Some(SaveIntent::Insert {
                fields: ItemFields::text("Buy milk")
            })
        );
    }

    #[test]
    fn test_edit_loads_text_and_target() {
        let items = collection_with("5", "Old");
        let mut form = FormState::new();
        assert!(form.begin_edit(&items, &"5".into()));
        assert_eq!(form.text(), "Old");
        assert_eq!(form.target(), Some(&ItemId::new("5")));

        form.set_text("New");
        assert_eq!(
            form.submission(),
            Some(SaveIntent::Update {
                id: "5".into(),
                fields: ItemFields::text("New")
            })
        );
    }

    #[test]
    fn test_edit_unknown_item_leaves_form() {
        let items = ItemCollection::new();
        let mut form = FormState::new();
        form.set_text("draft");
        assert!(!form.begin_edit(&items, &"missing".into()));
        assert_eq!(form.text(), "draft");
        assert!(!form.is_editing());
    }

    #[test]
    fn test_reset_returns_to_create() {
        let items = collection_with("5", "Old");
        let mut form = FormState::new();
        form.begin_edit(&items, &"5".into());
        form.reset();
        assert_eq!(form, FormState::new());
    }
}
