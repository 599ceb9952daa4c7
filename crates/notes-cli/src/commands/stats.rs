use crate::commands::common::{open_provider, StoreContext};
use crate::error::CliError;

pub fn run_stats(as_json: bool, ctx: &StoreContext) -> Result<(), CliError> {
    let provider = open_provider(ctx)?;
    let stats = provider.stats();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("all:      {}", stats.all);
        println!("pinned:   {}", stats.pinned);
        println!("archived: {}", stats.archived);
    }
    Ok(())
}
