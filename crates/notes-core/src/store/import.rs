//! Normalization and merging of imported notes.
//!
//! Imported records come from user files and can be missing any field.
//! Every record is coerced into a complete [`Note`] and then merged into
//! the existing collection by id, with imported records winning.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::id::generate_id_at;
use crate::models::Note;

/// Coerce loosely shaped records into notes.
///
/// Falsy entries (`null`, `false`, `0`, `""`) and entries that are not
/// objects are skipped.
#[must_use]
pub fn normalize_imported(records: Vec<Value>, now: i64) -> Vec<Note> {
    records
        .into_iter()
        .filter_map(|record| match record {
            Value::Object(fields) => Some(normalize_record(&fields, now)),
            other => {
                if is_truthy(&other) {
                    tracing::debug!("Skipping non-object import entry: {other}");
                }
                None
            }
        })
        .collect()
}

fn normalize_record(fields: &Map<String, Value>, now: i64) -> Note {
    let id = match fields.get("id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(id @ Value::Number(number)) if is_truthy(id) => number.to_string(),
        _ => generate_id_at(None, now),
    };
    let created_at = timestamp_field(fields, "createdAt").unwrap_or(now);
    let updated_at = timestamp_field(fields, "updatedAt")
        .unwrap_or(now)
        .max(created_at);

    Note {
        id,
        title: string_field(fields, "title"),
        content: string_field(fields, "content"),
        created_at,
        updated_at,
        pinned: fields.get("pinned").is_some_and(is_truthy),
        archived: fields.get("archived").is_some_and(is_truthy),
        tags: match fields.get("tags") {
            Some(Value::Array(tags)) => tags
                .iter()
                .filter_map(|tag| tag.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        },
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[allow(clippy::cast_possible_truncation)]
fn timestamp_field(fields: &Map<String, Value>, key: &str) -> Option<i64> {
    let Value::Number(number) = fields.get(key)? else {
        return None;
    };
    number
        .as_i64()
        .or_else(|| number.as_f64().filter(|value| value.is_finite()).map(|value| value as i64))
}

/// JavaScript-style truthiness for loosely typed flags
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|value| value != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Merge imported notes into existing ones by id.
///
/// Later records replace earlier ones with the same id and imported notes
/// replace existing ones. The result keeps first-seen order: existing notes
/// in their current order, then new ids in import order.
#[must_use]
pub fn merge_notes(existing: &[Note], imported: Vec<Note>) -> Vec<Note> {
    let mut merged = existing.to_vec();
    let mut positions = merged
        .iter()
        .enumerate()
        .map(|(index, note)| (note.id.clone(), index))
        .collect::<HashMap<_, _>>();

    for note in imported {
        if let Some(&index) = positions.get(&note.id) {
            merged[index] = note;
        } else {
            positions.insert(note.id.clone(), merged.len());
            merged.push(note);
        }
    }

    merged
}
