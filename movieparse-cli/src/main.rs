//! movieparse CLI
//!
//! Resolve movie folder names or titles to TMDB IDs and cache each movie's
//! metadata as CSV tables.

mod cli_types;
mod commands;
mod error;
mod logging;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use commands::parse::ParseArgs;
use error::CliError;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.quiet, cli.verbose);

    if let Err(e) = dispatch(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Parse {
            input,
            tmdb_api_key,
            parsing_style,
            output_dir,
            lax,
            eager,
            language,
        } => commands::parse::run_parse(
            ParseArgs {
                input,
                tmdb_api_key,
                parsing_style,
                output_dir,
                lax,
                eager,
                language,
            },
            cli.quiet,
        ),
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show();
                Ok(())
            }
            ConfigAction::Path => commands::config::run_config_path(),
        },
    }
}
