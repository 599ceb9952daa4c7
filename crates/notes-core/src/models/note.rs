//! Note model

use serde::{Deserialize, Serialize};

use crate::id::generate_id_at;
use crate::util::now_ms;

/// A note in the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier, immutable after creation
    pub id: String,
    /// Title, may be empty
    #[serde(default)]
    pub title: String,
    /// Plain text content, may be empty
    #[serde(default)]
    pub content: String,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
    /// Last update timestamp (Unix ms)
    pub updated_at: i64,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Note {
    /// Create a new note with a fresh id and both timestamps set to now
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = now_ms();
        Self::from_draft(NoteDraft::new(title, content), now)
    }

    /// Build a note from a draft, allocating an id for the given instant
    #[must_use]
    pub fn from_draft(draft: NoteDraft, now: i64) -> Self {
        Self {
            id: generate_id_at(None, now),
            title: draft.title.unwrap_or_default(),
            content: draft.content.unwrap_or_default(),
            created_at: now,
            updated_at: now,
            pinned: draft.pinned.unwrap_or(false),
            archived: draft.archived.unwrap_or(false),
            tags: draft.tags.unwrap_or_default(),
        }
    }

    /// Apply a partial update. Does not touch `updated_at`.
    pub fn apply(&mut self, patch: NotePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(pinned) = patch.pinned {
            self.pinned = pinned;
        }
        if let Some(archived) = patch.archived {
            self.archived = archived;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
    }

    /// Advance `updated_at` for a mutation happening at `now`.
    ///
    /// The new value is strictly greater than the previous one and never
    /// below `created_at`, even when the clock is behind stored timestamps.
    pub fn touch(&mut self, now: i64) {
        self.updated_at = now
            .max(self.updated_at.saturating_add(1))
            .max(self.created_at);
    }

    /// Title for display, falling back to `Untitled`
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }

    /// Check if both title and content are blank
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty()
    }
}

/// Fields accepted when creating a note. Missing values take note defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteDraft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub pinned: Option<bool>,
    pub archived: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl NoteDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = Some(pinned);
        self
    }

    #[must_use]
    pub const fn archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    #[must_use]
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }
}

/// Partial update for an existing note. `id` and `created_at` are not editable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub pinned: Option<bool>,
    pub archived: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl NotePatch {
    /// Patch that replaces title and content, as the editor autosave does
    #[must_use]
    pub fn text(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.pinned.is_none()
            && self.archived.is_none()
            && self.tags.is_none()
    }
}
