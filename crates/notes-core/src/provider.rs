//! Store owner: hydration at startup and persistence after every change.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::models::{FilterPatch, Note, NoteDraft, NotePatch, SortSpec};
use crate::search::{library_stats, visible_notes, LibraryStats};
use crate::state::{AppState, StatePatch};
use crate::storage::{KeyValueStore, PersistenceAdapter};
use crate::store::{reduce, Action};

/// Store handle shared between the host and background tasks.
pub type SharedNotes<S> = Arc<Mutex<NotesProvider<S>>>;

/// Lifecycle phase of a provider
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Holding defaults, nothing loaded or persisted yet
    Uninitialized,
    /// Hydrated; every dispatch is persisted
    Ready,
}

/// Where the startup state came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HydrationSource {
    Persisted,
    Fallback,
    Defaults,
}

/// Owns the application state and mirrors it to storage.
pub struct NotesProvider<S> {
    state: AppState,
    phase: Phase,
    adapter: PersistenceAdapter<S>,
}

impl<S: KeyValueStore> NotesProvider<S> {
    pub fn new(adapter: PersistenceAdapter<S>) -> Self {
        Self {
            state: AppState::default(),
            phase: Phase::Uninitialized,
            adapter,
        }
    }

    /// Provider on `store` with the default storage key
    pub fn with_store(store: S) -> Self {
        Self::new(PersistenceAdapter::new(store))
    }

    /// Hydrate once and become ready.
    ///
    /// Persisted state wins over `fallback`; with neither the defaults stay.
    /// Returns `None` when the provider was already started.
    pub fn start(&mut self, fallback: Option<StatePatch>) -> Option<HydrationSource> {
        if self.phase == Phase::Ready {
            tracing::debug!("Notes provider already started");
            return None;
        }

        let source = if let Some(persisted) = self.adapter.load() {
            self.apply(Action::Hydrate(persisted));
            HydrationSource::Persisted
        } else if let Some(fallback) = fallback {
            self.apply(Action::Hydrate(fallback));
            HydrationSource::Fallback
        } else {
            HydrationSource::Defaults
        };

        self.phase = Phase::Ready;
        tracing::debug!(
            "Notes provider ready ({:?}, {} notes)",
            source,
            self.state.notes.len()
        );
        self.persist();
        Some(source)
    }

    /// Apply an action. Once ready the resulting state is always saved,
    /// even when the action changed nothing.
    ///
    /// Returns whether the state was persisted.
    pub fn dispatch(&mut self, action: Action) -> bool {
        tracing::trace!("Dispatching {}", action.kind());
        self.apply(action);
        if self.phase == Phase::Ready {
            self.persist()
        } else {
            false
        }
    }

    fn apply(&mut self, action: Action) {
        self.state = reduce(&self.state, action);
    }

    fn persist(&mut self) -> bool {
        let saved = self.adapter.save(&self.state);
        if !saved {
            tracing::warn!("State change was not persisted");
        }
        saved
    }

    pub const fn state(&self) -> &AppState {
        &self.state
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    pub const fn adapter(&self) -> &PersistenceAdapter<S> {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut PersistenceAdapter<S> {
        &mut self.adapter
    }

    /// Notes after applying the current query, filter and sort
    pub fn visible_notes(&self) -> Vec<&Note> {
        visible_notes(&self.state)
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.state.selected_note()
    }

    pub fn stats(&self) -> LibraryStats {
        library_stats(&self.state.notes)
    }

    pub fn into_shared(self) -> SharedNotes<S> {
        Arc::new(Mutex::new(self))
    }

    /// Create a note and return its id
    pub fn create_note(&mut self, draft: NoteDraft) -> String {
        self.dispatch(Action::Create(draft));
        self.state.selected_id.clone().unwrap_or_default()
    }

    pub fn update_note(&mut self, id: impl Into<String>, patch: NotePatch) {
        self.dispatch(Action::Update {
            id: id.into(),
            patch,
        });
    }

    pub fn delete_note(&mut self, id: impl Into<String>) {
        self.dispatch(Action::Delete { id: id.into() });
    }

    pub fn bulk_delete(&mut self, ids: Vec<String>) {
        self.dispatch(Action::BulkDelete { ids });
    }

    pub fn toggle_pin(&mut self, id: impl Into<String>) {
        self.dispatch(Action::TogglePin { id: id.into() });
    }

    pub fn toggle_archive(&mut self, id: impl Into<String>) {
        self.dispatch(Action::ToggleArchive { id: id.into() });
    }

    pub fn select_note(&mut self, id: Option<String>) {
        self.dispatch(Action::Select { id });
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.dispatch(Action::SetQuery(query.into()));
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.dispatch(Action::SetSort(sort));
    }

    pub fn set_filter(&mut self, filter: FilterPatch) {
        self.dispatch(Action::SetFilter(filter));
    }

    pub fn set_preference(&mut self, key: impl Into<String>, value: Value) {
        self.dispatch(Action::SetPreference {
            key: key.into(),
            value,
        });
    }

    pub fn import_notes(&mut self, records: Vec<Value>) {
        self.dispatch(Action::ImportNotes(records));
    }

    /// Snapshot of the whole collection; not a transition
    pub fn export_notes(&self) -> Vec<Note> {
        self.state.notes.clone()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn new_provider_is_uninitialized_with_defaults() {
        let provider = NotesProvider::with_store(MemoryStore::new());
        assert_eq!(provider.phase(), Phase::Uninitialized);
        assert_eq!(provider.state(), &AppState::default());
    }

    #[test]
    fn dispatch_before_start_is_not_persisted() {
        let mut provider = NotesProvider::with_store(MemoryStore::new());
        assert!(!provider.dispatch(Action::SetQuery("early".to_string())));
        assert_eq!(provider.state().query, "early");
        assert!(provider.adapter().store().is_empty());
    }

    #[test]
    fn start_twice_is_ignored() {
        let mut provider = NotesProvider::with_store(MemoryStore::new());
        assert_eq!(provider.start(None), Some(HydrationSource::Defaults));
        provider.set_query("kept");
        assert_eq!(provider.start(Some(StatePatch::default())), None);
        assert_eq!(provider.state().query, "kept");
    }

    #[test]
    fn create_note_returns_selected_id() {
        let mut provider = NotesProvider::with_store(MemoryStore::new());
        provider.start(None);
        let id = provider.create_note(NoteDraft::new("t", "c"));
        assert_eq!(provider.selected_note().map(|note| note.id.clone()), Some(id));
    }
}
