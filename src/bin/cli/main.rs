mod app;
mod commands;
mod render;
#[cfg(feature = "tui")]
mod tui;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wordbook-cli", about = "Wordbook CLI and flashcard reviewer", version)]
struct Cli {
    /// Config file (default: <config dir>/wordbook/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List study groups
    Groups,

    /// Create a study group
    GroupNew {
        name: String,
    },

    /// Rename a study group
    GroupRename {
        /// Group name (case-insensitive prefix match)
        group: String,
        /// New name
        name: String,
    },

    /// Delete a study group (its words stay in the word list)
    GroupDelete {
        /// Group name (case-insensitive prefix match)
        group: String,
    },

    /// List the words in a group
    Words {
        /// Group name (case-insensitive prefix match)
        group: String,
    },

    /// Look up a word, fetching it from the dictionary if needed
    Search {
        word: String,
        /// Also add the word to this group
        #[arg(long)]
        group: Option<String>,
    },

    /// Add a word to a group
    Add {
        word: String,
        /// Group name (case-insensitive prefix match)
        group: String,
    },

    /// Remove a word from a group
    Remove {
        word: String,
        /// Group name (case-insensitive prefix match)
        group: String,
    },

    /// Show recent review sessions
    Sessions {
        /// Maximum sessions
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Review a group with flashcards
    #[cfg(feature = "tui")]
    Review {
        /// Group name (case-insensitive prefix match)
        group: String,
        /// Shuffle the cards before starting
        #[arg(long)]
        shuffle: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let app = app::App::new(cli.config.as_deref(), cli.data_dir)?;

    match cli.command {
        Command::Groups => commands::groups::run_list(&app, &cli.format, use_color)?,
        Command::GroupNew { name } => commands::groups::run_new(&app, &name, &cli.format)?,
        Command::GroupRename { group, name } => {
            commands::groups::run_rename(&app, &group, &name, &cli.format)?
        }
        Command::GroupDelete { group } => commands::groups::run_delete(&app, &group)?,
        Command::Words { group } => {
            commands::words::run_list(&app, &group, &cli.format, use_color)?
        }
        Command::Search { word, group } => {
            commands::search::run(&app, &word, group.as_deref(), &cli.format, use_color)?
        }
        Command::Add { word, group } => commands::words::run_add(&app, &word, &group)?,
        Command::Remove { word, group } => commands::words::run_remove(&app, &word, &group)?,
        Command::Sessions { limit } => commands::sessions::run(&app, limit, &cli.format)?,
        #[cfg(feature = "tui")]
        Command::Review { group, shuffle } => tui::run(&app, &group, shuffle)?,
    }

    Ok(())
}
