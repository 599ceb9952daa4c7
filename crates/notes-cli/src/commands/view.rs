use notes_core::models::{FilterView, SortSpec};

use crate::cli::FilterArg;
use crate::commands::common::{open_provider, StoreContext};
use crate::error::CliError;

impl From<FilterArg> for FilterView {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::All => Self::All,
            FilterArg::Pinned => Self::Pinned,
            FilterArg::Archived => Self::Archived,
        }
    }
}

pub fn run_filter(view: FilterArg, ctx: &StoreContext) -> Result<(), CliError> {
    let mut provider = open_provider(ctx)?;
    provider.set_filter(FilterView::from(view).to_patch());

    let filter = provider.state().filter;
    println!(
        "showArchived={} showPinnedOnly={}",
        filter.show_archived, filter.show_pinned_only
    );
    Ok(())
}

pub fn run_sort(spec: &str, ctx: &StoreContext) -> Result<(), CliError> {
    let sort = spec
        .parse::<SortSpec>()
        .map_err(CliError::InvalidArgument)?;

    let mut provider = open_provider(ctx)?;
    provider.set_sort(sort);
    println!("{}", provider.state().sort);
    Ok(())
}
