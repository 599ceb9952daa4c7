use std::env;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Utc;
use notes_core::storage::{FileStore, PersistenceAdapter};
use notes_core::util::truncate_chars;
use notes_core::{Note, NotesProvider};
use serde::Serialize;

use crate::error::CliError;

/// Where the CLI keeps its notes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreContext {
    pub data_dir: PathBuf,
    pub storage_prefix: String,
}

impl StoreContext {
    pub fn new(data_dir: impl Into<PathBuf>, storage_prefix: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            storage_prefix: storage_prefix.into(),
        }
    }
}

pub type CliProvider = NotesProvider<FileStore>;

/// Open the file store and hydrate a ready provider from it.
pub fn open_provider(ctx: &StoreContext) -> Result<CliProvider, CliError> {
    let store = FileStore::open(&ctx.data_dir)?;
    let adapter = PersistenceAdapter::with_prefix(store, &ctx.storage_prefix);
    let mut provider = NotesProvider::new(adapter);
    if let Some(source) = provider.start(None) {
        tracing::debug!("Loaded notes from {} ({source:?})", ctx.data_dir.display());
    }
    Ok(provider)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteListItem {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub relative_time: String,
    pub pinned: bool,
    pub archived: bool,
    pub tags: Vec<String>,
}

/// Resolve a full note id from an exact id or a unique prefix.
pub fn resolve_note_id(note_query: &str, notes: &[Note]) -> Result<String, CliError> {
    let note_query = normalize_note_identifier(note_query)?;

    if notes.iter().any(|note| note.id == note_query) {
        return Ok(note_query);
    }

    let matching_ids = notes
        .iter()
        .filter(|note| note.id.starts_with(&note_query))
        .map(|note| note.id.as_str())
        .collect::<Vec<_>>();

    match matching_ids.as_slice() {
        [] => Err(CliError::NoteNotFound(note_query)),
        [only] => Ok((*only).to_string()),
        many => {
            let options = many
                .iter()
                .take(3)
                .copied()
                .collect::<Vec<_>>()
                .join(", ");

            Err(CliError::AmbiguousNoteId(format!(
                "ID prefix '{note_query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn format_note_lines(notes: &[&Note]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    notes
        .iter()
        .map(|note| {
            let title = truncate_chars(note.display_title(), 30);
            let preview = note_preview(note, 40);
            let relative_time = format_relative_time(note.updated_at, now_ms);
            let flags = render_flags(note);
            let tags = render_tags(note);

            let line = format!(
                "{:<22}  {flags:<2}  {title:<30}  {preview:<40}  {relative_time}",
                note.id
            );
            if tags.is_empty() {
                line
            } else {
                format!("{line}  {tags}")
            }
        })
        .collect()
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    let now_ms = Utc::now().timestamp_millis();

    NoteListItem {
        id: note.id.clone(),
        title: note.title.clone(),
        preview: note_preview(note, 80),
        content: note.content.clone(),
        created_at: note.created_at,
        updated_at: note.updated_at,
        relative_time: format_relative_time(note.updated_at, now_ms),
        pinned: note.pinned,
        archived: note.archived,
        tags: note.tags.clone(),
    }
}

pub fn note_preview(note: &Note, max_chars: usize) -> String {
    let first_line = note.content.lines().next().unwrap_or("").trim();
    let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return "No content yet.".to_string();
    }
    truncate_chars(&collapsed, max_chars)
}

fn render_flags(note: &Note) -> String {
    let mut flags = String::new();
    if note.pinned {
        flags.push('P');
    }
    if note.archived {
        flags.push('A');
    }
    flags
}

pub fn render_tags(note: &Note) -> String {
    note.tags
        .iter()
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn format_timestamp(timestamp_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp_ms).map_or_else(
        || timestamp_ms.to_string(),
        |date_time| date_time.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

/// Content from arguments, then piped stdin, then `$EDITOR` when allowed.
pub fn resolve_note_content(
    content_parts: &[String],
    allow_editor: bool,
) -> Result<Option<String>, CliError> {
    if let Some(content) = normalize_content(&content_parts.join(" ")) {
        return Ok(Some(content));
    }

    if let Some(content) = read_piped_stdin()? {
        return Ok(Some(content));
    }

    if allow_editor {
        return capture_editor_input_with_initial("");
    }

    Ok(None)
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn normalize_note_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyNoteId)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}

pub fn capture_editor_input_with_initial(
    initial_content: &str,
) -> Result<Option<String>, CliError> {
    let editor = preferred_editor();
    let temp_file = create_temp_note_file_path();
    std::fs::write(&temp_file, initial_content)?;

    let launch_result = launch_editor(&editor, &temp_file);
    let note_content = std::fs::read_to_string(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);

    launch_result?;
    Ok(normalize_content(&note_content))
}

pub fn launch_editor(editor: &str, file_path: &Path) -> Result<(), CliError> {
    match Command::new(editor).arg(file_path).status() {
        Ok(status) => {
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let mut parts = editor.split_whitespace();
            let Some(program) = parts.next() else {
                return Err(CliError::EditorFailed("empty EDITOR command".into()));
            };

            let mut command = Command::new(program);
            command.args(parts).arg(file_path);

            let status = command.status()?;
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) => Err(CliError::Io(err)),
    }
}

pub fn preferred_editor() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string())
}

pub const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

fn create_temp_note_file_path() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    env::temp_dir().join(format!("simple-notes-{}-{nanos}.md", std::process::id()))
}
