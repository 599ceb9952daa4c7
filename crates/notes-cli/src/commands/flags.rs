use crate::commands::common::{open_provider, resolve_note_id, StoreContext};
use crate::error::CliError;

pub fn run_pin(id: &str, ctx: &StoreContext) -> Result<(), CliError> {
    let mut provider = open_provider(ctx)?;
    let note_id = resolve_note_id(id, &provider.state().notes)?;
    provider.toggle_pin(note_id.clone());

    let pinned = provider
        .state()
        .note(&note_id)
        .is_some_and(|note| note.pinned);
    println!("{note_id} {}", if pinned { "pinned" } else { "unpinned" });
    Ok(())
}

pub fn run_archive(id: &str, ctx: &StoreContext) -> Result<(), CliError> {
    let mut provider = open_provider(ctx)?;
    let note_id = resolve_note_id(id, &provider.state().notes)?;
    provider.toggle_archive(note_id.clone());

    let archived = provider
        .state()
        .note(&note_id)
        .is_some_and(|note| note.archived);
    println!(
        "{note_id} {}",
        if archived { "archived" } else { "unarchived" }
    );
    Ok(())
}
