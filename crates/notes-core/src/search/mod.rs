//! Filtered and sorted projections of the note collection.
//!
//! The stored order of notes carries no meaning; anything displayed or
//! exported goes through [`visible_notes`].

use std::cmp::Ordering;

use serde::Serialize;

use crate::models::{FilterSpec, Note, SortKey, SortOrder, SortSpec};
use crate::state::AppState;

/// Keep notes matching the filter flags and the case-insensitive query.
#[must_use]
pub fn filter_notes<'a>(notes: &'a [Note], query: &str, filter: FilterSpec) -> Vec<&'a Note> {
    let normalized_query = query.to_lowercase();

    notes
        .iter()
        .filter(|note| !filter.show_archived || note.archived)
        .filter(|note| !filter.show_pinned_only || note.pinned)
        .filter(|note| note_matches_query(note, &normalized_query))
        .collect()
}

fn note_matches_query(note: &Note, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    note.title.to_lowercase().contains(query) || note.content.to_lowercase().contains(query)
}

/// Sort notes in place. Ties keep their relative order.
pub fn sort_notes(notes: &mut [&Note], sort: SortSpec) {
    notes.sort_by(|left, right| {
        let ordering = compare_by(left, right, sort.by);
        match sort.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare_by(left: &Note, right: &Note, key: SortKey) -> Ordering {
    match key {
        SortKey::CreatedAt => left.created_at.cmp(&right.created_at),
        SortKey::UpdatedAt => left.updated_at.cmp(&right.updated_at),
        SortKey::Title => left
            .title
            .to_lowercase()
            .cmp(&right.title.to_lowercase())
            .then_with(|| left.title.cmp(&right.title)),
    }
}

/// Notes as the list shows them: filtered by query and flags, then sorted.
#[must_use]
pub fn visible_notes(state: &AppState) -> Vec<&Note> {
    let mut notes = filter_notes(&state.notes, &state.query, state.filter);
    sort_notes(&mut notes, state.sort);
    notes
}

/// Sidebar counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LibraryStats {
    pub all: usize,
    /// Pinned notes that are not archived
    pub pinned: usize,
    pub archived: usize,
}

#[must_use]
pub fn library_stats(notes: &[Note]) -> LibraryStats {
    LibraryStats {
        all: notes.len(),
        pinned: notes
            .iter()
            .filter(|note| note.pinned && !note.archived)
            .count(),
        archived: notes.iter().filter(|note| note.archived).count(),
    }
}
