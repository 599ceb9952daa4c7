use notes_core::models::{Theme, THEME_KEY};
use serde_json::Value;

use crate::cli::ThemeArg;
use crate::commands::common::{open_provider, StoreContext};
use crate::error::CliError;

pub fn run_theme(mode: Option<ThemeArg>, ctx: &StoreContext) -> Result<(), CliError> {
    let mut provider = open_provider(ctx)?;
    let current = provider.state().preferences.theme();

    let next = match mode {
        None => {
            println!("{current}");
            return Ok(());
        }
        Some(ThemeArg::Light) => Theme::Light,
        Some(ThemeArg::Dark) => Theme::Dark,
        Some(ThemeArg::Toggle) => current.toggled(),
    };

    provider.set_preference(THEME_KEY, Value::String(next.as_str().to_string()));
    println!("{next}");
    Ok(())
}
