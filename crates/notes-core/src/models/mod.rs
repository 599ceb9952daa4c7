//! Data models for Simple Notes

mod note;
mod preferences;
mod view;

pub use note::{Note, NoteDraft, NotePatch};
pub use preferences::{Preferences, Theme, THEME_KEY};
pub use view::{FilterPatch, FilterSpec, FilterView, SortKey, SortOrder, SortPatch, SortSpec};
