//! Logger setup. Normal output goes through `log::info!`, so the logger
//! doubles as the console printer.

use std::io::Write;

use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

/// Install the global logger.
///
/// `--verbose` shows debug messages with timestamps, `--quiet` only warnings
/// and errors. `RUST_LOG` overrides both when set.
pub(crate) fn init(quiet: bool, verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    // Keep dependency chatter out of normal output
    if !verbose {
        builder.filter_module("reqwest", LevelFilter::Warn);
    }
    builder.parse_env("RUST_LOG");
    builder.target(env_logger::Target::Stdout);

    builder.format(move |buf, record| {
        if verbose {
            let ts = chrono::Local::now().format("%H:%M:%S%.3f");
            return writeln!(
                buf,
                "{ts} {:<5} {}: {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
        match record.level() {
            Level::Error => writeln!(
                buf,
                "{} {}",
                "error:".if_supports_color(Stdout, |t| t.red()),
                record.args()
            ),
            Level::Warn => writeln!(
                buf,
                "{} {}",
                "warning:".if_supports_color(Stdout, |t| t.yellow()),
                record.args()
            ),
            _ => writeln!(buf, "{}", record.args()),
        }
    });

    builder.init();
}
