use crate::commands::common::{
    format_timestamp, note_to_list_item, open_provider, render_tags, resolve_note_id,
    StoreContext,
};
use crate::error::CliError;

pub fn run_show(id: &str, as_json: bool, ctx: &StoreContext) -> Result<(), CliError> {
    let mut provider = open_provider(ctx)?;
    let note_id = resolve_note_id(id, &provider.state().notes)?;
    provider.select_note(Some(note_id));

    let Some(note) = provider.selected_note() else {
        return Err(CliError::NoteNotFound(id.to_string()));
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&note_to_list_item(note))?);
        return Ok(());
    }

    println!("{}", note.display_title());
    println!("id:       {}", note.id);
    println!("created:  {}", format_timestamp(note.created_at));
    println!("updated:  {}", format_timestamp(note.updated_at));
    println!("pinned:   {}", note.pinned);
    println!("archived: {}", note.archived);
    let tags = render_tags(note);
    if !tags.is_empty() {
        println!("tags:     {tags}");
    }
    if !note.content.is_empty() {
        println!();
        println!("{}", note.content);
    }
    Ok(())
}
