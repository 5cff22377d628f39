//! One full run: build the batch, resolve names, persist the mapping, then
//! fetch and persist metadata for every uncached ID.

use movieparse_core::{Detection, NamingPattern, ResolutionCounts, detect_pattern};
use movieparse_tmdb::CatalogService;
use movieparse_tmdb::settings::DEFAULT_LANGUAGE;

use crate::error::PipelineError;
use crate::fetch::fetch_metadata;
use crate::inputs::MovieSource;
use crate::progress::PipelineProgress;
use crate::reconcile::{ids_to_fetch, orphaned_ids, refresh};
use crate::resolve::{ResolveOptions, resolve_mapping};
use crate::schema::TableKind;
use crate::store::OutputStore;

/// Options for a run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Naming pattern; estimated from the batch when `None`.
    pub pattern: Option<NamingPattern>,
    pub strict: bool,
    pub eager: bool,
    /// Language of fetched metadata.
    pub language: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            pattern: None,
            strict: true,
            eager: false,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// What a run did.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub pattern: NamingPattern,
    /// Set when the pattern was estimated rather than given.
    pub detection: Option<Detection>,
    /// Resolution states across the whole persisted mapping.
    pub counts: ResolutionCounts,
    pub mapping_rows: usize,
    pub looked_up: usize,
    pub fallbacks: usize,
    pub fetched: usize,
    pub fetch_failed: usize,
    /// Rows written per metadata table.
    pub tables_written: Vec<(TableKind, usize)>,
}

/// Run the whole pipeline against `store`.
///
/// Configuration problems surface before the first request. The mapping is
/// written after the lookup pass, so a failure while fetching metadata keeps
/// the resolved IDs.
pub fn run(
    service: &dyn CatalogService,
    store: &OutputStore,
    source: &MovieSource,
    options: &RunOptions,
    progress: &dyn Fn(PipelineProgress),
) -> Result<RunSummary, PipelineError> {
    let fresh = source.fresh_mapping()?;

    let (pattern, detection) = match options.pattern {
        Some(pattern) => (pattern, None),
        None => {
            let detection = detect_pattern(fresh.canonical_inputs())?;
            log::info!(
                "Estimated naming pattern {} ({:.1}% of fields matched)",
                detection.pattern,
                detection.accuracy()
            );
            progress(PipelineProgress::PatternDetected(detection));
            (detection.pattern, Some(detection))
        }
    };

    let snapshot = store.load()?;
    let cached_ids = snapshot.cached_metadata_ids();
    log::debug!(
        "Loaded {} mapping rows ({} catalog IDs) and {} cached movies",
        snapshot.mapping.len(),
        snapshot.cached_mapping_ids().len(),
        cached_ids.len()
    );
    let mapping = snapshot.mapping.merge(fresh);

    let resolve_options = ResolveOptions {
        pattern,
        strict: options.strict,
        eager: options.eager,
    };
    let pass = resolve_mapping(service, mapping, &resolve_options, progress)?;
    store.write_mapping(&pass.mapping)?;

    let ids = ids_to_fetch(&pass.mapping, &cached_ids, options.eager);
    let outcome = fetch_metadata(service, &ids, &options.language, progress)?;

    let tables = refresh(snapshot.metadata, &outcome.fetched, outcome.tables);
    let orphans = orphaned_ids(&tables, &pass.mapping);
    let tables_written = if outcome.fetched.is_empty() && orphans.is_empty() {
        log::info!("No new metadata, tables left as they are");
        Vec::new()
    } else {
        if !orphans.is_empty() {
            log::info!(
                "Dropping metadata of {} movies no longer in the mapping",
                orphans.len()
            );
        }
        store.write_metadata(&tables.without_ids(&orphans))?
    };

    Ok(RunSummary {
        pattern,
        detection,
        counts: pass.mapping.counts(),
        mapping_rows: pass.mapping.len(),
        looked_up: pass.looked_up,
        fallbacks: pass.fallbacks,
        fetched: outcome.fetched.len(),
        fetch_failed: outcome.failed.len(),
        tables_written,
    })
}
