use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use commands::{movies, transfer, views};
use reel_core::FacetField;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reeltracker")]
#[command(about = "Reeltracker - track what you want to watch, what you've watched, and how it happened")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a movie to the to-watch list
    Add {
        /// Movie name (required, must be non-empty)
        #[arg(long)]
        name: String,

        /// Language
        #[arg(long)]
        language: Option<String>,

        /// Streaming platform
        #[arg(long)]
        platform: Option<String>,

        /// Comma-separated cast members
        #[arg(long, value_name = "NAMES")]
        cast: Option<String>,
    },

    /// Edit a to-watch entry, replacing its editable fields
    #[command(long_about = "Edit a to-watch entry. All editable fields are replaced: a flag left out clears that field. Identity and the added-on date never change, and edits leave no trace in the log.")]
    Edit {
        /// Id of the entry to edit
        id: String,

        /// New movie name (required, must be non-empty)
        #[arg(long)]
        name: String,

        /// New language
        #[arg(long)]
        language: Option<String>,

        /// New streaming platform
        #[arg(long)]
        platform: Option<String>,

        /// New comma-separated cast members
        #[arg(long, value_name = "NAMES")]
        cast: Option<String>,
    },

    /// Move a to-watch entry into the watched list
    Watch {
        /// Id of the entry to mark watched
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },

    /// Move a watched entry back to the to-watch list
    Unwatch {
        /// Id of the entry to move back
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },

    /// Permanently delete a watched entry (it survives only in the log)
    Delete {
        /// Id of the watched entry to delete
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },

    /// Show the to-watch list, optionally filtered
    List {
        /// Case-insensitive free-text search over name, language, platform, and cast
        #[arg(short, long)]
        search: Option<String>,

        /// Only entries in this language
        #[arg(long, conflicts_with_all = ["platform", "cast"])]
        language: Option<String>,

        /// Only entries on this platform
        #[arg(long, conflicts_with_all = ["language", "cast"])]
        platform: Option<String>,

        /// Only entries featuring this cast member
        #[arg(long, conflicts_with_all = ["language", "platform"])]
        cast: Option<String>,
    },

    /// Show the watched list
    Watched,

    /// Show the activity log, grouped by day
    Log,

    /// List the distinct values of a facet across the to-watch list
    Facets {
        /// One of: language, platform, cast
        field: FacetField,
    },

    /// Export the full dataset to a JSON file
    Export {
        /// Output path (defaults to life-tracker-export.json)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Replace the full dataset from a JSON export file
    Import {
        /// Path of the file to import
        path: PathBuf,
    },

    /// Save or load the to-watch list against a folder of your choosing
    Folder {
        #[command(subcommand)]
        cmd: FolderCommands,
    },

    /// Discard everything and restore the fresh-install dataset
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum FolderCommands {
    /// Write movie-tracker.json with the to-watch list into a folder
    Save {
        /// Target folder
        #[arg(long)]
        dir: PathBuf,
    },
    /// Replace the to-watch list from movie-tracker.json in a folder
    Load {
        /// Source folder
        #[arg(long)]
        dir: PathBuf,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Add {
            name,
            language,
            platform,
            cast,
        } => movies::run_add(name, language, platform, cast, &output),
        Commands::Edit {
            id,
            name,
            language,
            platform,
            cast,
        } => movies::run_edit(&id, name, language, platform, cast, &output),
        Commands::Watch { id, yes } => movies::run_watch(&id, yes, &output),
        Commands::Unwatch { id, yes } => movies::run_unwatch(&id, yes, &output),
        Commands::Delete { id, yes } => movies::run_delete(&id, yes, &output),
        Commands::List {
            search,
            language,
            platform,
            cast,
        } => views::run_list(search, language, platform, cast, &output),
        Commands::Watched => views::run_watched(&output),
        Commands::Log => views::run_log(&output),
        Commands::Facets { field } => views::run_facets(field, &output),
        Commands::Export { out } => transfer::run_export(out, &output),
        Commands::Import { path } => transfer::run_import(&path, &output),
        Commands::Folder { cmd } => match cmd {
            FolderCommands::Save { dir } => transfer::run_folder_save(&dir, &output),
            FolderCommands::Load { dir } => transfer::run_folder_load(&dir, &output),
        },
        Commands::Reset { yes } => movies::run_reset(yes, &output),
    }
}
