use crate::commands::common::{open_provider, StoreContext};
use crate::commands::list::print_notes;
use crate::error::CliError;

/// Store the query so later `list` calls keep using it, then print matches.
pub fn run_search(
    query_parts: &[String],
    clear: bool,
    as_json: bool,
    ctx: &StoreContext,
) -> Result<(), CliError> {
    let query = if clear {
        String::new()
    } else {
        query_parts.join(" ")
    };

    let mut provider = open_provider(ctx)?;
    provider.set_query(query);

    let notes = provider.visible_notes();
    print_notes(&notes, as_json)
}
