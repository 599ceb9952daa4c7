//! Notes store: the closed set of actions and the reducer applying them.
//!
//! [`reduce`] is the only way state changes. It never mutates its input and
//! never fails: actions aimed at ids that do not exist leave the state as it
//! was.

pub mod import;

use std::collections::HashSet;

use serde_json::Value;

use crate::models::{FilterPatch, Note, NoteDraft, NotePatch, SortSpec};
use crate::state::{AppState, StatePatch};
use crate::util::now_ms;

pub use import::{merge_notes, normalize_imported};

/// Every state transition the store supports
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Merge persisted or initial state into the current state
    Hydrate(StatePatch),
    /// Add a note at the front of the list and select it
    Create(NoteDraft),
    Update {
        id: String,
        patch: NotePatch,
    },
    Delete {
        id: String,
    },
    BulkDelete {
        ids: Vec<String>,
    },
    TogglePin {
        id: String,
    },
    ToggleArchive {
        id: String,
    },
    /// Set the selection without checking that the note exists
    Select {
        id: Option<String>,
    },
    SetQuery(String),
    /// Replace sort settings wholesale
    SetSort(SortSpec),
    /// Merge into the current filter
    SetFilter(FilterPatch),
    SetPreference {
        key: String,
        value: Value,
    },
    /// Merge loosely shaped note records, imported records winning by id
    ImportNotes(Vec<Value>),
}

impl Action {
    /// Short name used in logs
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Hydrate(_) => "hydrate",
            Self::Create(_) => "create",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
            Self::BulkDelete { .. } => "bulk_delete",
            Self::TogglePin { .. } => "toggle_pin",
            Self::ToggleArchive { .. } => "toggle_archive",
            Self::Select { .. } => "select",
            Self::SetQuery(_) => "set_query",
            Self::SetSort(_) => "set_sort",
            Self::SetFilter(_) => "set_filter",
            Self::SetPreference { .. } => "set_preference",
            Self::ImportNotes(_) => "import_notes",
        }
    }
}

/// Apply an action using the current time.
#[must_use]
pub fn reduce(state: &AppState, action: Action) -> AppState {
    reduce_at(state, action, now_ms())
}

/// Apply an action at an explicit instant (Unix ms).
#[must_use]
pub fn reduce_at(state: &AppState, action: Action, now: i64) -> AppState {
    let mut next = state.clone();

    match action {
        Action::Hydrate(patch) => next.merge(patch),
        Action::Create(draft) => {
            let note = Note::from_draft(draft, now);
            next.selected_id = Some(note.id.clone());
            next.notes.insert(0, note);
        }
        Action::Update { id, patch } => {
            update_note(&mut next, &id, now, |note| note.apply(patch));
        }
        Action::Delete { id } => {
            next.notes.retain(|note| note.id != id);
            if next.selected_id.as_deref() == Some(id.as_str()) {
                next.selected_id = None;
            }
        }
        Action::BulkDelete { ids } => {
            let ids = ids.iter().map(String::as_str).collect::<HashSet<_>>();
            next.notes.retain(|note| !ids.contains(note.id.as_str()));
            if next
                .selected_id
                .as_deref()
                .is_some_and(|selected| ids.contains(selected))
            {
                next.selected_id = None;
            }
        }
        Action::TogglePin { id } => {
            update_note(&mut next, &id, now, |note| note.pinned = !note.pinned);
        }
        Action::ToggleArchive { id } => {
            update_note(&mut next, &id, now, |note| note.archived = !note.archived);
        }
        Action::Select { id } => next.selected_id = id,
        Action::SetQuery(query) => next.query = query,
        Action::SetSort(sort) => next.sort = sort,
        Action::SetFilter(filter) => next.filter.merge(filter),
        Action::SetPreference { key, value } => next.preferences.set(key, value),
        Action::ImportNotes(records) => {
            let imported = normalize_imported(records, now);
            next.notes = merge_notes(&next.notes, imported);
        }
    }

    next
}

fn update_note(state: &mut AppState, id: &str, now: i64, change: impl FnOnce(&mut Note)) {
    if let Some(note) = state.notes.iter_mut().find(|note| note.id == id) {
        change(note);
        note.touch(now);
    }
}
