use crate::commands::common::{open_provider, resolve_note_id, StoreContext};
use crate::error::CliError;

/// Select a note, clear the selection, or print the current one.
pub fn run_select(id: Option<&str>, clear: bool, ctx: &StoreContext) -> Result<(), CliError> {
    let mut provider = open_provider(ctx)?;

    if clear {
        provider.select_note(None);
        println!("Selection cleared");
        return Ok(());
    }

    if let Some(id) = id {
        let note_id = resolve_note_id(id, &provider.state().notes)?;
        provider.select_note(Some(note_id.clone()));
        println!("{note_id}");
        return Ok(());
    }

    match provider.selected_note() {
        Some(note) => println!("{} {}", note.id, note.display_title()),
        None => println!("No note selected"),
    }
    Ok(())
}
