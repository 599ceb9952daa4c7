//! Simple Notes CLI - take, pin, archive and search notes from the terminal
//!
//! Every command loads the persisted library, applies one action and saves.

mod cli;
mod commands;
mod config;
mod error;
#[cfg(test)]
mod tests;

use clap::{CommandFactory, Parser};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::cli::{AddArgs, Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::clear::run_clear;
use crate::commands::common::StoreContext;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::export::run_export;
use crate::commands::flags::{run_archive, run_pin};
use crate::commands::import::run_import;
use crate::commands::list::run_list;
use crate::commands::search::run_search;
use crate::commands::select::run_select;
use crate::commands::show::run_show;
use crate::commands::stats::run_stats;
use crate::commands::theme::run_theme;
use crate::commands::view::{run_filter, run_sort};
use crate::config::{CliConfig, DATA_DIR_ENV};
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    let filter = match "notes=info".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = CliConfig::load().map_err(CliError::Config)?;
    let data_dir = config.resolve_data_dir(cli.data_dir, std::env::var(DATA_DIR_ENV).ok());
    let ctx = StoreContext::new(data_dir, config.storage_prefix());
    tracing::debug!("Using data dir {}", ctx.data_dir.display());

    match cli.command {
        Some(Commands::Add(args)) => run_add(args, &ctx)?,
        Some(Commands::List { limit, json }) => run_list(limit, json, &ctx)?,
        Some(Commands::Search { query, clear, json }) => {
            run_search(&query, clear, json, &ctx)?;
        }
        Some(Commands::Filter { view }) => run_filter(view, &ctx)?,
        Some(Commands::Sort { spec }) => run_sort(&spec, &ctx)?,
        Some(Commands::Show { id, json }) => run_show(&id, json, &ctx)?,
        Some(Commands::Edit { id, title, tags }) => run_edit(&id, title, tags, &ctx)?,
        Some(Commands::Delete { ids }) => run_delete(&ids, &ctx)?,
        Some(Commands::Pin { id }) => run_pin(&id, &ctx)?,
        Some(Commands::Archive { id }) => run_archive(&id, &ctx)?,
        Some(Commands::Select { id, none }) => run_select(id.as_deref(), none, &ctx)?,
        Some(Commands::Import { path }) => run_import(&path, &ctx)?,
        Some(Commands::Export { format, output }) => {
            run_export(format, output.as_deref(), &ctx)?;
        }
        Some(Commands::Stats { json }) => run_stats(json, &ctx)?,
        Some(Commands::Theme { mode }) => run_theme(mode, &ctx)?,
        Some(Commands::Clear { yes }) => run_clear(yes, &ctx)?,
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        Some(Commands::Config { command }) => run_config(command, &ctx)?,
        None => {
            // Quick capture mode: notes "my thought"
            if cli.note.is_empty() {
                Cli::command().print_help().map_err(CliError::Io)?;
                println!();
            } else {
                let args = AddArgs {
                    content: cli.note,
                    ..AddArgs::default()
                };
                run_add(args, &ctx)?;
            }
        }
    }

    Ok(())
}
