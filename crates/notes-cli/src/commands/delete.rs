use crate::commands::common::{open_provider, resolve_note_id, StoreContext};
use crate::error::CliError;

pub fn run_delete(ids: &[String], ctx: &StoreContext) -> Result<(), CliError> {
    let mut provider = open_provider(ctx)?;
    let mut resolved = Vec::with_capacity(ids.len());
    for id in ids {
        let note_id = resolve_note_id(id, &provider.state().notes)?;
        if !resolved.contains(&note_id) {
            resolved.push(note_id);
        }
    }

    if let [only] = resolved.as_slice() {
        provider.delete_note(only.clone());
    } else {
        provider.bulk_delete(resolved.clone());
    }

    for id in resolved {
        println!("{id}");
    }
    Ok(())
}
