//! Versioned snapshot persistence on top of a [`KeyValueStore`].
//!
//! The whole state is written under a single key of the form
//! `{prefix}:notes:v{version}`. Bumping [`STORAGE_VERSION`] moves to a new
//! key, so data in an older shape is ignored instead of misread.
//!
//! None of the operations return errors. Read failures look like "nothing
//! stored" and write failures are reported as `false`; both are logged.
//! A stored object is always used, with undecodable fields dropped.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::KeyValueStore;
use crate::state::{AppState, StatePatch};
use crate::store::{merge_notes, normalize_imported};
use crate::util::now_ms;

/// Version of the persisted shape
pub const STORAGE_VERSION: u32 = 1;

/// Application prefix for the persisted key
pub const DEFAULT_STORAGE_PREFIX: &str = "simple-notes";

pub struct PersistenceAdapter<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    /// Adapter using the default prefix and current version
    pub fn new(store: S) -> Self {
        Self::with_prefix(store, DEFAULT_STORAGE_PREFIX)
    }

    pub fn with_prefix(store: S, prefix: &str) -> Self {
        Self {
            store,
            key: storage_key(prefix, STORAGE_VERSION),
        }
    }

    /// The versioned key this adapter reads and writes
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Read the persisted snapshot, if there is a usable one.
    pub fn load(&self) -> Option<StatePatch> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("No persisted state under {}", self.key);
                return None;
            }
            Err(error) => {
                tracing::warn!("Failed to read persisted state {}: {}", self.key, error);
                return None;
            }
        };

        let value = match serde_json::from_str::<Value>(&raw) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!("Ignoring unparsable state under {}: {}", self.key, error);
                return None;
            }
        };

        let Value::Object(fields) = value else {
            tracing::warn!("Ignoring non-object state under {}", self.key);
            return None;
        };

        Some(decode_snapshot(fields, &self.key, now_ms()))
    }

    /// Write the full snapshot. Returns `false` when it could not be stored.
    pub fn save(&mut self, state: &AppState) -> bool {
        let raw = match serde_json::to_string(state) {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!("Failed to serialize state: {}", error);
                return false;
            }
        };

        match self.store.set(&self.key, &raw) {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!("Failed to persist state under {}: {}", self.key, error);
                false
            }
        }
    }

    /// Remove the persisted snapshot.
    pub fn clear(&mut self) -> bool {
        match self.store.remove(&self.key) {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!("Failed to clear {}: {}", self.key, error);
                false
            }
        }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

/// Decode a stored object field by field.
///
/// Notes go through the import normalization, so an entry missing fields is
/// repaired instead of discarding the collection. Any other field that does
/// not decode is dropped and left at its default.
fn decode_snapshot(mut fields: Map<String, Value>, key: &str, now: i64) -> StatePatch {
    let notes = match fields.remove("notes") {
        Some(Value::Array(records)) => Some(merge_notes(&[], normalize_imported(records, now))),
        Some(other) => {
            tracing::warn!("Ignoring stored notes under {key}: expected an array, got {other}");
            None
        }
        None => None,
    };

    let selected_id = match fields.remove("selectedId") {
        Some(Value::Null) => Some(None),
        Some(Value::String(id)) => Some(Some(id)),
        Some(other) => {
            tracing::warn!("Ignoring stored selectedId under {key}: {other}");
            None
        }
        None => None,
    };

    StatePatch {
        notes,
        selected_id,
        query: decode_field(&mut fields, "query", key),
        sort: decode_field(&mut fields, "sort", key),
        filter: decode_field(&mut fields, "filter", key),
        preferences: decode_field(&mut fields, "preferences", key),
    }
}

fn decode_field<T: DeserializeOwned>(
    fields: &mut Map<String, Value>,
    field: &str,
    key: &str,
) -> Option<T> {
    let value = fields.remove(field)?;
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(error) => {
            tracing::warn!("Ignoring stored {field} under {key}: {error}");
            None
        }
    }
}

/// Build `{prefix}:notes:v{version}`
#[must_use]
pub fn storage_key(prefix: &str, version: u32) -> String {
    format!("{prefix}:notes:v{version}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{Note, NoteDraft, SortKey, SortOrder, SortSpec};
    use crate::storage::MemoryStore;

    fn sample_state() -> AppState {
        let mut state = AppState::default();
        let mut note = Note::from_draft(
            NoteDraft::new("Title", "Body").tags(vec!["work".to_string()]),
            1_700_000_000_000,
        );
        note.touch(1_700_000_005_000);
        note.pinned = true;
        state.selected_id = Some(note.id.clone());
        state.notes.push(note);
        state.notes.push(Note::from_draft(NoteDraft::default(), 5));
        state.query = "tit".to_string();
        state.sort = SortSpec::new(SortKey::Title, SortOrder::Asc);
        state.filter.show_archived = true;
        state.preferences.set("theme", serde_json::json!("dark"));
        state
    }

    #[test]
    fn default_key_embeds_prefix_and_version() {
        let adapter = PersistenceAdapter::new(MemoryStore::new());
        assert_eq!(adapter.storage_key(), "simple-notes:notes:v1");
        assert_eq!(storage_key("app", 7), "app:notes:v7");
    }

    #[test]
    fn load_returns_none_when_absent() {
        let adapter = PersistenceAdapter::new(MemoryStore::new());
        assert_eq!(adapter.load(), None);
    }

    #[test]
    fn save_then_load_round_trips_every_field() {
        let state = sample_state();
        let mut adapter = PersistenceAdapter::new(MemoryStore::new());
        assert!(adapter.save(&state));

        let patch = adapter.load().expect("persisted state");
        let mut restored = AppState::default();
        restored.merge(patch);
        assert_eq!(restored, state);
    }

    #[test]
    fn load_ignores_invalid_json_and_non_objects() {
        for raw in ["not json", "[1,2,3]", "42", "null", "\"text\""] {
            let mut store = MemoryStore::new();
            store.set("simple-notes:notes:v1", raw).unwrap();
            let adapter = PersistenceAdapter::new(store);
            assert_eq!(adapter.load(), None, "raw value {raw}");
        }
    }

    #[test]
    fn load_repairs_notes_missing_fields() {
        let mut store = MemoryStore::new();
        store
            .set(
                "simple-notes:notes:v1",
                r#"{"notes":[{"id":"a","title":"kept","createdAt":1,"updatedAt":2},{"title":"no id"},null]}"#,
            )
            .unwrap();

        let notes = PersistenceAdapter::new(store).load().unwrap().notes.unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].id, "a");
        assert_eq!(notes[0].title, "kept");
        assert_eq!(notes[1].title, "no id");
        assert!(!notes[1].id.is_empty());
    }

    #[test]
    fn load_drops_only_fields_that_do_not_decode() {
        let mut store = MemoryStore::new();
        store
            .set(
                "simple-notes:notes:v1",
                r#"{"notes":"oops","selectedId":7,"query":"kept","sort":{"by":"color"},"filter":{"showArchived":true}}"#,
            )
            .unwrap();

        let patch = PersistenceAdapter::new(store).load().unwrap();
        assert_eq!(patch.notes, None);
        assert_eq!(patch.selected_id, None);
        assert_eq!(patch.query.as_deref(), Some("kept"));
        assert_eq!(patch.sort, None);
        assert_eq!(patch.filter.and_then(|filter| filter.show_archived), Some(true));
    }

    #[test]
    fn load_ignores_other_versions() {
        let mut store = MemoryStore::new();
        store
            .set("simple-notes:notes:v0", r#"{"query":"old"}"#)
            .unwrap();
        assert_eq!(PersistenceAdapter::new(store).load(), None);
    }

    #[test]
    fn save_reports_quota_failure() {
        let mut adapter = PersistenceAdapter::new(MemoryStore::with_quota(16));
        assert!(!adapter.save(&sample_state()));
        assert_eq!(adapter.load(), None);
    }

    #[test]
    fn clear_removes_snapshot() {
        let mut adapter = PersistenceAdapter::with_prefix(MemoryStore::new(), "test");
        assert!(adapter.save(&AppState::default()));
        assert!(adapter.clear());
        assert_eq!(adapter.load(), None);
        assert!(adapter.store().is_empty());
    }
}
