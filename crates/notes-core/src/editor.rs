//! Debounced autosave for an open note.
//!
//! An [`EditorSession`] buffers title and content edits locally and writes
//! them to the store only after input has been quiet for
//! [`AUTOSAVE_DEBOUNCE`]. Every edit reschedules the pending save. Closing
//! or dropping the session cancels it, so a save never fires after the
//! editor is gone.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::models::NotePatch;
use crate::provider::SharedNotes;
use crate::storage::KeyValueStore;

/// Quiet period before buffered edits are written
pub const AUTOSAVE_DEBOUNCE: Duration = Duration::from_millis(400);

/// Holds at most one delayed task; scheduling a new one aborts the old.
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Run `task` after `delay`, replacing any task still waiting.
    pub fn schedule<F>(&mut self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    /// Abort the waiting task. Returns whether one was still pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Editing surface bound to one note.
pub struct EditorSession<S> {
    notes: SharedNotes<S>,
    note_id: String,
    title: String,
    content: String,
    delay: Duration,
    debouncer: Debouncer,
}

impl<S> EditorSession<S>
where
    S: KeyValueStore + Send + 'static,
{
    /// Open a session seeded from the stored note; `None` if it does not exist.
    pub async fn open(notes: SharedNotes<S>, note_id: impl Into<String>) -> Option<Self> {
        let note_id = note_id.into();
        let (title, content) = {
            let provider = notes.lock().await;
            let note = provider.state().note(&note_id)?;
            (note.title.clone(), note.content.clone())
        };

        Some(Self {
            notes,
            note_id,
            title,
            content,
            delay: AUTOSAVE_DEBOUNCE,
            debouncer: Debouncer::new(),
        })
    }

    /// Override the quiet period
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn note_id(&self) -> &str {
        &self.note_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.schedule_save();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.schedule_save();
    }

    pub fn has_pending_save(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Save buffered edits now. Returns whether an update was dispatched.
    pub async fn flush(&mut self) -> bool {
        self.debouncer.cancel();
        save_if_changed(
            &self.notes,
            &self.note_id,
            self.title.clone(),
            self.content.clone(),
        )
        .await
    }

    /// Tear down without saving pending edits.
    pub fn close(mut self) {
        if self.debouncer.cancel() {
            tracing::debug!("Discarded pending autosave for note {}", self.note_id);
        }
    }

    fn schedule_save(&mut self) {
        let notes = Arc::clone(&self.notes);
        let note_id = self.note_id.clone();
        let title = self.title.clone();
        let content = self.content.clone();

        self.debouncer.schedule(self.delay, async move {
            save_if_changed(&notes, &note_id, title, content).await;
        });
    }
}

async fn save_if_changed<S: KeyValueStore>(
    notes: &SharedNotes<S>,
    note_id: &str,
    title: String,
    content: String,
) -> bool {
    let mut provider = notes.lock().await;
    let Some(note) = provider.state().note(note_id) else {
        tracing::debug!("Skipping autosave, note {} no longer exists", note_id);
        return false;
    };
    if note.title == title && note.content == content {
        return false;
    }

    provider.update_note(note_id, NotePatch::text(title, content));
    tracing::debug!("Auto-saved note: {}", note_id);
    true
}
