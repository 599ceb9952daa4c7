use notes_core::Note;

use crate::commands::common::{
    format_note_lines, note_to_list_item, open_provider, NoteListItem, StoreContext,
};
use crate::error::CliError;

pub fn run_list(limit: usize, as_json: bool, ctx: &StoreContext) -> Result<(), CliError> {
    let provider = open_provider(ctx)?;
    let notes = provider
        .visible_notes()
        .into_iter()
        .take(limit)
        .collect::<Vec<_>>();

    print_notes(&notes, as_json)
}

pub fn print_notes(notes: &[&Note], as_json: bool) -> Result<(), CliError> {
    if as_json {
        let json_items = notes
            .iter()
            .map(|note| note_to_list_item(note))
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if notes.is_empty() {
        println!("No notes found.");
    } else {
        for line in format_note_lines(notes) {
            println!("{line}");
        }
    }

    Ok(())
}
