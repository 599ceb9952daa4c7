//! Note export rendering and import payload parsing.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Note;

/// Export output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// Render notes as a pretty-printed JSON array.
///
/// Each entry carries `id, title, content, createdAt, updatedAt, pinned,
/// archived, tags`, the same shape the import accepts.
pub fn render_json_export(notes: &[Note]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(notes)
}

/// Render notes in Markdown with frontmatter blocks.
#[must_use]
pub fn render_markdown_export(notes: &[Note]) -> String {
    let mut output = String::new();

    for (index, note) in notes.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }

        let _ = writeln!(output, "---");
        let _ = writeln!(output, "id: {}", note.id);
        let _ = writeln!(output, "created_at: {}", note.created_at);
        let _ = writeln!(output, "updated_at: {}", note.updated_at);
        let _ = writeln!(output, "pinned: {}", note.pinned);
        let _ = writeln!(output, "archived: {}", note.archived);
        let _ = writeln!(output, "tags:");
        for tag in &note.tags {
            let _ = writeln!(output, "  - {tag}");
        }
        let _ = writeln!(output, "---");
        let _ = writeln!(output);
        let _ = writeln!(output, "# {}", note.display_title());
        let _ = writeln!(output);
        output.push_str(&note.content);
        output.push('\n');
    }

    output
}

/// Render notes based on selected export format.
pub fn render_notes_export(notes: &[Note], format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => render_json_export(notes),
        ExportFormat::Markdown => Ok(render_markdown_export(notes)),
    }
}

/// Build a deterministic default file name for export flows.
#[must_use]
pub fn suggested_export_file_name(format: ExportFormat, timestamp_ms: i64) -> String {
    format!("notes-export-{timestamp_ms}.{}", format.extension())
}

/// Extract note records from an import file.
///
/// Accepts a bare JSON array or an object with a `notes` array. Returns
/// `None` for invalid JSON and any other shape.
#[must_use]
pub fn parse_import_payload(text: &str) -> Option<Vec<Value>> {
    match serde_json::from_str::<Value>(text).ok()? {
        Value::Array(records) => Some(records),
        Value::Object(mut fields) => match fields.remove("notes") {
            Some(Value::Array(records)) => Some(records),
            _ => None,
        },
        _ => None,
    }
}
