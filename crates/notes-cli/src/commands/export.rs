use std::path::Path;

use notes_core::export::{self, render_notes_export};

use crate::cli::ExportFormat;
use crate::commands::common::{open_provider, StoreContext};
use crate::error::CliError;

impl From<ExportFormat> for export::ExportFormat {
    fn from(value: ExportFormat) -> Self {
        match value {
            ExportFormat::Json => Self::Json,
            ExportFormat::Markdown => Self::Markdown,
        }
    }
}

/// Export the notes the list currently shows.
pub fn run_export(
    format: ExportFormat,
    output_path: Option<&Path>,
    ctx: &StoreContext,
) -> Result<(), CliError> {
    let provider = open_provider(ctx)?;
    let notes = provider
        .visible_notes()
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();
    let rendered = render_notes_export(&notes, format.into())?;

    if let Some(path) = output_path {
        std::fs::write(path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}
