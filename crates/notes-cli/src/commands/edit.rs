use notes_core::util::normalize_text_option;
use notes_core::NotePatch;

use crate::commands::common::{
    capture_editor_input_with_initial, open_provider, resolve_note_id, StoreContext,
};
use crate::error::CliError;

pub fn run_edit(
    id: &str,
    title: Option<String>,
    tags: Option<Vec<String>>,
    ctx: &StoreContext,
) -> Result<(), CliError> {
    run_edit_with(id, title, tags, ctx, capture_editor_input_with_initial)
}

/// Edit a note, reading new content through `capture` when neither a title
/// nor tags were given. An empty capture clears the content.
pub fn run_edit_with<F>(
    id: &str,
    title: Option<String>,
    tags: Option<Vec<String>>,
    ctx: &StoreContext,
    capture: F,
) -> Result<(), CliError>
where
    F: FnOnce(&str) -> Result<Option<String>, CliError>,
{
    let mut provider = open_provider(ctx)?;
    let note_id = resolve_note_id(id, &provider.state().notes)?;

    let patch = if title.is_some() || tags.is_some() {
        NotePatch {
            title: title.map(|title| title.trim().to_string()),
            tags: tags.map(|tags| {
                tags.into_iter()
                    .filter_map(|tag| normalize_text_option(Some(tag)))
                    .collect()
            }),
            ..NotePatch::default()
        }
    } else {
        let Some(note) = provider.state().note(&note_id) else {
            return Err(CliError::NoteNotFound(note_id));
        };
        let edited_content = capture(&note.content)?.unwrap_or_default();
        if edited_content == note.content {
            println!("{note_id}");
            return Ok(());
        }
        NotePatch {
            content: Some(edited_content),
            ..NotePatch::default()
        }
    };

    provider.update_note(note_id.clone(), patch);
    println!("{note_id}");
    Ok(())
}
