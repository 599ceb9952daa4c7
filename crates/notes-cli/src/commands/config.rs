use std::path::PathBuf;

use crate::cli::ConfigCommands;
use crate::commands::common::StoreContext;
use crate::config::{default_config_path, CliConfig, DATA_DIR_ENV};
use crate::error::CliError;
use notes_core::storage::{storage_key, STORAGE_VERSION};
use notes_core::util::normalize_text_option;

pub fn run_config(command: ConfigCommands, resolved: &StoreContext) -> Result<(), CliError> {
    match command {
        ConfigCommands::Show => run_config_show(resolved),
        ConfigCommands::SetDataDir { path } => run_config_set_data_dir(path),
        ConfigCommands::SetPrefix { prefix } => run_config_set_prefix(prefix),
    }
}

fn run_config_show(resolved: &StoreContext) -> Result<(), CliError> {
    let config_path = default_config_path().map_err(CliError::Config)?;
    println!("config:      {}", config_path.display());
    println!("data dir:    {}", resolved.data_dir.display());
    println!(
        "storage key: {}",
        storage_key(&resolved.storage_prefix, STORAGE_VERSION)
    );
    if let Ok(value) = std::env::var(DATA_DIR_ENV) {
        println!("{DATA_DIR_ENV}={value}");
    }
    Ok(())
}

fn run_config_set_data_dir(path: PathBuf) -> Result<(), CliError> {
    if path.as_os_str().is_empty() {
        return Err(CliError::InvalidArgument("data dir cannot be empty".into()));
    }

    let mut config = CliConfig::load().map_err(CliError::Config)?;
    config.data_dir = Some(path.clone());
    let saved_to = config.save().map_err(CliError::Config)?;
    println!("data dir set to {} ({})", path.display(), saved_to.display());
    Ok(())
}

fn run_config_set_prefix(prefix: String) -> Result<(), CliError> {
    let Some(prefix) = normalize_text_option(Some(prefix)) else {
        return Err(CliError::InvalidArgument("prefix cannot be empty".into()));
    };

    let mut config = CliConfig::load().map_err(CliError::Config)?;
    config.storage_prefix = Some(prefix.clone());
    let saved_to = config.save().map_err(CliError::Config)?;
    println!(
        "storage key is now {} ({})",
        storage_key(&prefix, STORAGE_VERSION),
        saved_to.display()
    );
    Ok(())
}
