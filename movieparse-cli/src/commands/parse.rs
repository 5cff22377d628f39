use std::cell::RefCell;
use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use movieparse_core::NamingPattern;
use movieparse_lib::{MovieSource, OutputStore, PipelineProgress, RunOptions, RunSummary};
use movieparse_tmdb::{SettingOverrides, TmdbClient, TmdbSettings};

use crate::cli_types::InputArgs;
use crate::error::CliError;

/// Arguments of `movieparse parse`, after clap.
pub(crate) struct ParseArgs {
    pub input: InputArgs,
    pub tmdb_api_key: Option<String>,
    pub parsing_style: Option<NamingPattern>,
    pub output_dir: PathBuf,
    pub lax: bool,
    pub eager: bool,
    pub language: Option<String>,
}

/// Resolve the batch and cache metadata for every new ID.
pub(crate) fn run_parse(args: ParseArgs, quiet: bool) -> Result<(), CliError> {
    let store = OutputStore::open(&args.output_dir)?;
    let settings = TmdbSettings::load(SettingOverrides {
        api_key: args.tmdb_api_key,
        language: args.language,
    })?;

    let source = match (args.input.root_movie_dir, args.input.movie_list) {
        (Some(dir), _) => MovieSource::RootDir(dir),
        (None, Some(titles)) => MovieSource::List(titles),
        (None, None) => return Err(CliError::other("Pass --root-movie-dir or --movie-list")),
    };

    let options = RunOptions {
        pattern: args.parsing_style,
        strict: !args.lax,
        eager: args.eager,
        language: settings.language.clone(),
    };

    let client = TmdbClient::new(&settings)?;
    let reporter = ProgressReporter::new(quiet);
    let progress = |event: PipelineProgress| reporter.handle(event);
    let result = movieparse_lib::run(&client, &store, &source, &options, &progress);
    reporter.finish();

    print_summary(&result?, &store);
    Ok(())
}

/// Turns pipeline progress events into one progress bar per pass.
struct ProgressReporter {
    quiet: bool,
    bar: RefCell<Option<ProgressBar>>,
}

impl ProgressReporter {
    fn new(quiet: bool) -> Self {
        Self {
            quiet,
            bar: RefCell::new(None),
        }
    }

    fn handle(&self, event: PipelineProgress) {
        match event {
            PipelineProgress::PatternDetected(_) => {}
            PipelineProgress::ResolveStarted { total } => self.start("Resolving", total),
            PipelineProgress::Resolved {
                canonical_input, ..
            } => self.advance(canonical_input),
            PipelineProgress::FetchStarted { total } => self.start("Fetching", total),
            PipelineProgress::Fetched { catalog_id, .. } => self.advance(catalog_id.to_string()),
            PipelineProgress::FetchFailed { catalog_id, .. } => {
                self.advance(format!("{catalog_id} (failed)"))
            }
            PipelineProgress::ResolveFinished | PipelineProgress::FetchFinished => self.finish(),
        }
    }

    fn start(&self, prefix: &'static str, total: usize) {
        self.finish();
        if total == 0 {
            return;
        }
        let pb = if self.quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total as u64)
        };
        pb.set_style(
            ProgressStyle::with_template(
                "  {spinner:.cyan} {prefix:<9} [{bar:30.cyan/blue}] {pos}/{len} {msg}",
            )
            .expect("static pattern")
            .progress_chars("=> "),
        );
        pb.set_prefix(prefix);
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        *self.bar.borrow_mut() = Some(pb);
    }

    fn advance(&self, msg: String) {
        if let Some(pb) = self.bar.borrow().as_ref() {
            pb.set_message(msg);
            pb.inc(1);
        }
    }

    fn finish(&self) {
        if let Some(pb) = self.bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

fn print_summary(summary: &RunSummary, store: &OutputStore) {
    let counts = &summary.counts;

    log::info!("");
    log::info!(
        "{} {} names in {}",
        "Mapping:".if_supports_color(Stdout, |t| t.bold()),
        summary.mapping_rows,
        store.mapping_path().display(),
    );
    log::info!(
        "  {} {} resolved",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        counts.found,
    );
    if counts.manual > 0 {
        log::info!("  {} with a manual ID", counts.manual);
    }
    if summary.fallbacks > 0 {
        log::info!("  {} found by title only", summary.fallbacks);
    }

    let problems = [
        (counts.no_match, "no match"),
        (counts.not_extracted, "unparsable"),
        (counts.malformed, "bad response"),
        (counts.unresolved, "unresolved"),
    ];
    for (count, label) in problems {
        if count > 0 {
            log::info!(
                "  {} {} {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.yellow()),
                count,
                label,
            );
        }
    }

    log::info!(
        "{} {} movies fetched",
        "Metadata:".if_supports_color(Stdout, |t| t.bold()),
        summary.fetched,
    );
    if summary.fetch_failed > 0 {
        log::warn!(
            "{} movies could not be fetched and will be retried next run",
            summary.fetch_failed
        );
    }
    for (kind, rows) in &summary.tables_written {
        log::info!(
            "  {} {} rows",
            format!("{}:", kind.file_name()).if_supports_color(Stdout, |t| t.cyan()),
            rows,
        );
    }
}
