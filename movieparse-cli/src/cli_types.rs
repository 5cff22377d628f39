//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use movieparse_core::NamingPattern;

#[derive(Parser)]
#[command(name = "movieparse")]
#[command(
    about = "Resolve movie names to TMDB IDs and cache their metadata as CSV tables",
    long_about = None
)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the movie names come from. Exactly one is required.
#[derive(Args, Clone)]
#[group(required = true, multiple = false)]
pub(crate) struct InputArgs {
    /// Directory whose subdirectories are named after movies
    #[arg(long, value_name = "DIR")]
    pub root_movie_dir: Option<PathBuf>,

    /// Movie names, e.g. "1999 The Matrix"
    #[arg(long, value_name = "TITLE", num_args = 1..)]
    pub movie_list: Option<Vec<String>>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Resolve movie names and cache their metadata
    Parse {
        #[command(flatten)]
        input: InputArgs,

        /// TMDB API key or read access token (overrides env and config file)
        #[arg(long, value_name = "KEY")]
        tmdb_api_key: Option<String>,

        /// Naming pattern: 0 = "1999 The Matrix", 1 = "1999 - The Matrix",
        /// 2 = "The Matrix 1999". Estimated from the names when omitted.
        #[arg(long, value_name = "INDEX")]
        parsing_style: Option<NamingPattern>,

        /// Directory for mapping.csv and the metadata tables
        #[arg(long, value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,

        /// Retry with the title alone when title + year finds nothing
        #[arg(long)]
        lax: bool,

        /// Re-resolve every name and re-fetch every movie
        #[arg(long)]
        eager: bool,

        /// Metadata language (e.g., en-US, fr-FR)
        #[arg(long, value_name = "CODE")]
        language: Option<String>,
    },

    /// Inspect the TMDB configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings and their sources
    Show,

    /// Print the config file path
    Path,
}
