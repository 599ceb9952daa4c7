use std::path::Path;

use notes_core::export::parse_import_payload;

use crate::commands::common::{open_provider, StoreContext};
use crate::error::CliError;

pub fn run_import(path: &Path, ctx: &StoreContext) -> Result<(), CliError> {
    let raw = std::fs::read_to_string(path)?;

    let Some(records) = parse_import_payload(&raw) else {
        tracing::warn!(
            "Ignoring {}: expected a JSON array or an object with a notes array",
            path.display()
        );
        println!("Nothing imported from {}", path.display());
        return Ok(());
    };

    let mut provider = open_provider(ctx)?;
    let before = provider.state().notes.len();
    let offered = records.len();
    provider.import_notes(records);
    let after = provider.state().notes.len();

    println!(
        "Processed {offered} records: {} new, {after} notes total",
        after.saturating_sub(before)
    );
    Ok(())
}
