use crate::commands::common::{open_provider, StoreContext};
use crate::error::CliError;

pub fn run_clear(confirmed: bool, ctx: &StoreContext) -> Result<(), CliError> {
    if !confirmed {
        return Err(CliError::ClearNotConfirmed);
    }

    let mut provider = open_provider(ctx)?;
    let removed = provider.state().notes.len();
    if !provider.adapter_mut().clear() {
        return Err(CliError::Core(notes_core::Error::Storage(format!(
            "failed to remove {}",
            provider.adapter().storage_key()
        ))));
    }

    println!("Removed {removed} notes");
    Ok(())
}
