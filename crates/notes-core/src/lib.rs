//! notes-core - Core library for Simple Notes
//!
//! This crate contains the note models, the reducer-based store, the
//! versioned persistence layer and the import/export helpers used by the
//! Simple Notes interfaces.

pub mod editor;
pub mod error;
pub mod export;
pub mod id;
pub mod models;
pub mod provider;
pub mod search;
pub mod state;
pub mod storage;
pub mod store;
pub mod util;

pub use error::{Error, Result};
pub use models::{Note, NoteDraft, NotePatch};
pub use provider::{HydrationSource, NotesProvider, Phase, SharedNotes};
pub use state::{AppState, StatePatch};
pub use store::{reduce, Action};
