//! Application state aggregate and its partial form used for hydration.

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{FilterPatch, FilterSpec, Note, Preferences, SortPatch, SortSpec};

/// Everything the store owns: the notes plus session and UI fields.
///
/// Serialized as a whole into the persisted key after every transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Notes, newest first at creation time. Display order comes from the
    /// sort settings, never from this order.
    pub notes: Vec<Note>,
    /// May reference a note hidden by the current filter
    pub selected_id: Option<String>,
    pub query: String,
    pub sort: SortSpec,
    pub filter: FilterSpec,
    pub preferences: Preferences,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            notes: Vec::new(),
            selected_id: None,
            query: String::new(),
            sort: SortSpec::default(),
            filter: FilterSpec::default(),
            preferences: Preferences::default(),
        }
    }
}

impl AppState {
    #[must_use]
    pub fn note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    #[must_use]
    pub fn selected_note(&self) -> Option<&Note> {
        self.selected_id.as_deref().and_then(|id| self.note(id))
    }

    /// Merge a patch: top-level fields are replaced, `sort`, `filter` and
    /// `preferences` are merged field by field.
    pub fn merge(&mut self, patch: StatePatch) {
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(selected_id) = patch.selected_id {
            self.selected_id = selected_id;
        }
        if let Some(query) = patch.query {
            self.query = query;
        }
        if let Some(sort) = patch.sort {
            self.sort.merge(sort);
        }
        if let Some(filter) = patch.filter {
            self.filter.merge(filter);
        }
        if let Some(preferences) = patch.preferences {
            self.preferences.merge(preferences);
        }
    }
}

/// Partial state: every field is optional.
///
/// This is what persisted data and caller-supplied initial values are read
/// into. Unknown top-level fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<Note>>,
    /// `Some(None)` clears the selection, `None` leaves it untouched
    #[serde(
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
}

impl From<AppState> for StatePatch {
    fn from(state: AppState) -> Self {
        Self {
            notes: Some(state.notes),
            selected_id: Some(state.selected_id),
            query: Some(state.query),
            sort: Some(SortPatch {
                by: Some(state.sort.by),
                order: Some(state.sort.order),
            }),
            filter: Some(FilterPatch {
                show_archived: Some(state.filter.show_archived),
                show_pinned_only: Some(state.filter.show_pinned_only),
            }),
            preferences: Some(state.preferences),
        }
    }
}

/// A present field (even `null`) becomes `Some(..)`; an absent one stays
/// at the `#[serde(default)]` value of `None`.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::models::{SortKey, SortOrder, Theme};

    #[test]
    fn test_default_aggregate() {
        let state = AppState::default();
        assert!(state.notes.is_empty());
        assert_eq!(state.selected_id, None);
        assert_eq!(state.query, "");
        assert_eq!(state.sort, SortSpec::new(SortKey::UpdatedAt, SortOrder::Desc));
        assert_eq!(state.filter, FilterSpec::default());
        assert_eq!(state.preferences.theme(), Theme::Light);
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(AppState::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "notes": [],
                "selectedId": null,
                "query": "",
                "sort": { "by": "updatedAt", "order": "desc" },
                "filter": { "showArchived": false, "showPinnedOnly": false },
                "preferences": { "theme": "light" }
            })
        );
    }

    #[test]
    fn test_patch_distinguishes_null_from_missing_selection() {
        let cleared: StatePatch = serde_json::from_value(json!({ "selectedId": null })).unwrap();
        assert_eq!(cleared.selected_id, Some(None));

        let untouched: StatePatch = serde_json::from_value(json!({ "query": "x" })).unwrap();
        assert_eq!(untouched.selected_id, None);
    }

    #[test]
    fn test_merge_deep_merges_nested_settings() {
        let mut state = AppState::default();
        state.query = "keep".to_string();

        let patch: StatePatch = serde_json::from_value(json!({
            "sort": { "order": "asc" },
            "filter": { "showArchived": true },
            "preferences": { "density": "compact" },
            "somethingElse": 1
        }))
        .unwrap();
        state.merge(patch);

        assert_eq!(state.query, "keep");
        assert_eq!(state.sort, SortSpec::new(SortKey::UpdatedAt, SortOrder::Asc));
        assert!(state.filter.show_archived);
        assert!(!state.filter.show_pinned_only);
        assert_eq!(state.preferences.theme(), Theme::Light);
        assert_eq!(state.preferences.get("density"), Some(&json!("compact")));
    }

    #[test]
    fn test_full_patch_rebuilds_state() {
        let mut source = AppState::default();
        source.notes.push(Note::new("a", "b"));
        source.selected_id = Some(source.notes[0].id.clone());
        source.query = "q".to_string();
        source.sort = SortSpec::new(SortKey::Title, SortOrder::Asc);

        let mut rebuilt = AppState::default();
        rebuilt.merge(StatePatch::from(source.clone()));
        assert_eq!(rebuilt, source);
    }
}
