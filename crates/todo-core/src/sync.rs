//! List Synchronizer
//!
//! Applies batches of remote change events to the local item collection.
//! Order of the collection is the arrival order of `added` events.

use serde::{Deserialize, Serialize};

use crate::domain::{Document, Entity, Item, ItemId};

/// Kind of a single remote change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChangeKind {
    Added,
    Modified,
    Removed,
    /// Kinds this client does not understand yet
    Unknown(String),
}

impl From<String> for ChangeKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "added" => ChangeKind::Added,
            "modified" => ChangeKind::Modified,
            "removed" => ChangeKind::Removed,
            _ => ChangeKind::Unknown(kind),
        }
    }
}

impl From<ChangeKind> for String {
    fn from(kind: ChangeKind) -> Self {
        match kind {
            ChangeKind::Added => "added".to_string(),
            ChangeKind::Modified => "modified".to_string(),
            ChangeKind::Removed => "removed".to_string(),
            ChangeKind::Unknown(other) => other,
        }
    }
}

/// One remote change: kind, document ID and (for added/modified) its fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub id: ItemId,
    #[serde(default)]
    pub fields: Option<Document>,
}

impl ChangeEvent {
    pub fn added(id: impl Into<ItemId>, fields: Document) -> Self {
        Self {
            kind: ChangeKind::Added,
            id: id.into(),
            fields: Some(fields),
        }
    }

    pub fn modified(id: impl Into<ItemId>, fields: Document) -> Self {
        Self {
            kind: ChangeKind::Modified,
            id: id.into(),
            fields: Some(fields),
        }
    }

    pub fn removed(id: impl Into<ItemId>) -> Self {
        Self {
            kind: ChangeKind::Removed,
            id: id.into(),
            fields: None,
        }
    }
}

/// Changes delivered together in one notification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeBatch(pub Vec<ChangeEvent>);

impl ChangeBatch {
    pub fn new(events: Vec<ChangeEvent>) -> Self {
        Self(events)
    }

    pub fn events(&self) -> &[ChangeEvent] {
        &self.0
    }
}

impl From<Vec<ChangeEvent>> for ChangeBatch {
    fn from(events: Vec<ChangeEvent>) -> Self {
        Self(events)
    }
}

/// Result of applying one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Appended,
    Replaced,
    Removed,
    Skipped(SkipReason),
}

/// Why an event left the collection untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    UnknownKind,
    UnknownId,
    MissingFields,
    Malformed,
}

/// Counts for one applied batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub applied: usize,
    pub skipped: usize,
}

/// Local mirror of the remote item collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemCollection {
    items: Vec<Item>,
}

impl ItemCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Apply every event of a batch in delivery order
    pub fn apply_batch(&mut self, batch: &ChangeBatch) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for event in batch.events() {
            match self.apply(event) {
                Applied::Skipped(_) => summary.skipped += 1,
                _ => summary.applied += 1,
            }
        }
        tracing::debug!(
            applied = summary.applied,
            skipped = summary.skipped,
            total = self.items.len(),
            "applied change batch"
        );
        summary
    }

    /// Apply a single change event
    pub fn apply(&mut self, event: &ChangeEvent) -> Applied {
        match &event.kind {
            ChangeKind::Added => {
                let item = match narrow(event) {
                    Ok(item) => item,
                    Err(reason) => return Applied::Skipped(reason),
                };
                match self.position(&item.id) {
                    Some(index) => {
                        tracing::warn!(id = %item.id, "added event for an id already present, replacing");
                        self.items[index] = item;
                        Applied::Replaced
                    }
                    None => {
                        self.items.push(item);
                        Applied::Appended
                    }
                }
            }
            ChangeKind::Modified => {
                let Some(index) = self.position(&event.id) else {
                    tracing::warn!(id = %event.id, "modified event for unknown id, skipping");
                    return Applied::Skipped(SkipReason::UnknownId);
                };
                match narrow(event) {
                    Ok(item) => {
                        self.items[index] = item;
                        Applied::Replaced
                    }
                    Err(reason) => Applied::Skipped(reason),
                }
            }
            ChangeKind::Removed => match self.position(&event.id) {
                Some(index) => {
                    self.items.remove(index);
                    Applied::Removed
                }
                None => {
                    tracing::warn!(id = %event.id, "removed event for unknown id, skipping");
                    Applied::Skipped(SkipReason::UnknownId)
                }
            },
            ChangeKind::Unknown(kind) => {
                tracing::debug!(kind = %kind, id = %event.id, "ignoring unknown change kind");
                Applied::Skipped(SkipReason::UnknownKind)
            }
        }
    }
}

fn narrow(event: &ChangeEvent) -> Result<Item, SkipReason> {
    let Some(fields) = &event.fields else {
        tracing::warn!(id = %event.id, "change event without fields, skipping");
        return Err(SkipReason::MissingFields);
    };
    Item::from_document(event.id.clone(), fields).map_err(|e| {
        tracing::warn!(error = %e, "malformed item document, skipping");
        SkipReason::Malformed
    })
}
