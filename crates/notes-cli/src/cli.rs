use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "notes")]
#[command(about = "Take, pin, archive and search notes from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the notes data file
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Quick capture: notes "my thought here"
    #[arg(trailing_var_arg = true)]
    pub note: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note
    #[command(alias = "new")]
    Add(AddArgs),
    /// List notes using the current search, filter and sort
    #[command(alias = "ls")]
    List {
        /// Number of notes to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the search query and list matching notes
    Search {
        /// Search query (matches title and content)
        query: Vec<String>,
        /// Clear the current query instead
        #[arg(long, conflicts_with = "query")]
        clear: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Choose which notes the list shows
    Filter {
        #[arg(value_enum)]
        view: FilterArg,
    },
    /// Set list ordering, e.g. `updatedAt:desc` or `title:asc`
    Sort {
        #[arg(value_name = "FIELD[:ORDER]")]
        spec: String,
    },
    /// Show a note and select it
    Show {
        /// Note ID or unique ID prefix
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit an existing note
    Edit {
        /// Note ID or unique ID prefix
        id: String,
        /// Replace the title without opening an editor
        #[arg(long)]
        title: Option<String>,
        /// Replace the tags (comma separated) without opening an editor
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
    },
    /// Delete one or more notes
    #[command(alias = "rm")]
    Delete {
        /// Note IDs or unique ID prefixes
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Toggle the pinned flag of a note
    Pin {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Toggle the archived flag of a note
    Archive {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Select a note, or clear the selection
    Select {
        /// Note ID or unique ID prefix
        id: Option<String>,
        /// Clear the selection
        #[arg(long, conflicts_with = "id")]
        none: bool,
    },
    /// Import notes from a JSON file (array or `{ "notes": [...] }`)
    Import {
        /// File to import
        path: PathBuf,
    },
    /// Export the currently listed notes
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Show note counts
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or change the theme preference
    Theme {
        #[arg(value_enum)]
        mode: Option<ThemeArg>,
    },
    /// Remove all stored notes and settings
    Clear {
        /// Confirm removal
        #[arg(long)]
        yes: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Note title
    #[arg(short, long)]
    pub title: Option<String>,
    /// Pin the note
    #[arg(long)]
    pub pin: bool,
    /// Create the note archived
    #[arg(long)]
    pub archive: bool,
    /// Tag to attach (repeatable)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
    /// Note content
    pub content: Vec<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum FilterArg {
    All,
    Pinned,
    Archived,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
    Toggle,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the resolved configuration
    Show,
    /// Set the default data directory
    SetDataDir {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
    /// Set the storage key prefix
    SetPrefix {
        #[arg(value_name = "PREFIX")]
        prefix: String,
    },
}
