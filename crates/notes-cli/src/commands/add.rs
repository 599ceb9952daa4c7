use crate::cli::AddArgs;
use crate::commands::common::{open_provider, resolve_note_content, StoreContext};
use crate::error::CliError;
use notes_core::util::normalize_text_option;
use notes_core::NoteDraft;

pub fn run_add(args: AddArgs, ctx: &StoreContext) -> Result<(), CliError> {
    let title = normalize_text_option(args.title);
    let content = resolve_note_content(&args.content, title.is_none())?;
    if title.is_none() && content.is_none() {
        return Err(CliError::EmptyContent);
    }

    let tags = args
        .tags
        .into_iter()
        .filter_map(|tag| normalize_text_option(Some(tag)))
        .collect::<Vec<_>>();
    let draft = NoteDraft::new(title.unwrap_or_default(), content.unwrap_or_default())
        .pinned(args.pin)
        .archived(args.archive)
        .tags(tags);

    let mut provider = open_provider(ctx)?;
    let id = provider.create_note(draft);
    tracing::debug!("Created note {id}");

    println!("{id}");
    Ok(())
}
