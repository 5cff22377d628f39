use movieparse_core::{MappingTable, NamingPattern, Resolution, parse_name};
use movieparse_tmdb::{CatalogService, LookupMethod, TmdbError, lookup_movie};

use crate::progress::PipelineProgress;
use crate::reconcile::needs_resolution;

/// Options for a lookup pass.
#[derive(Debug, Clone, Copy)]
pub struct ResolveOptions {
    pub pattern: NamingPattern,
    /// Don't fall back to a title-only search when title + year finds nothing.
    pub strict: bool,
    /// Re-resolve rows that already hold an ID or sentinel.
    pub eager: bool,
}

/// Result of a lookup pass.
#[derive(Debug, Clone)]
pub struct ResolvePass {
    pub mapping: MappingTable,
    /// Rows that went to the catalog.
    pub looked_up: usize,
    /// Rows answered by the title-only fallback.
    pub fallbacks: usize,
}

/// Resolve every pending row of `mapping` and return the updated table.
///
/// Names that don't fit `pattern` become [`Resolution::NotExtracted`]
/// without a request. Only a fatal catalog error (a rejected API key) stops
/// the pass.
pub fn resolve_mapping(
    service: &dyn CatalogService,
    mapping: MappingTable,
    options: &ResolveOptions,
    progress: &dyn Fn(PipelineProgress),
) -> Result<ResolvePass, TmdbError> {
    let mut rows = mapping.into_rows();
    let pending = rows
        .iter()
        .filter(|r| needs_resolution(r, options.eager))
        .count();
    progress(PipelineProgress::ResolveStarted { total: pending });

    let mut looked_up = 0;
    let mut fallbacks = 0;

    for row in rows.iter_mut().filter(|r| needs_resolution(r, options.eager)) {
        let resolution = match parse_name(&row.canonical_input, options.pattern) {
            Some(parsed) => {
                looked_up += 1;
                let result = lookup_movie(service, &parsed.title, Some(parsed.year), options.strict)?;
                if result.method == LookupMethod::TitleOnly {
                    fallbacks += 1;
                }
                log::debug!(
                    "'{}' -> {} ({})",
                    row.canonical_input,
                    result.resolution,
                    result.method
                );
                result.resolution
            }
            None => {
                log::warn!(
                    "'{}' doesn't follow naming pattern {}",
                    row.canonical_input,
                    options.pattern
                );
                Resolution::NotExtracted
            }
        };
        row.catalog_id = resolution;
        progress(PipelineProgress::resolved(row.canonical_input.clone(), resolution));
    }

    progress(PipelineProgress::ResolveFinished);
    log::info!("Looked up {looked_up} of {pending} pending names ({fallbacks} by title only)");

    Ok(ResolvePass {
        mapping: MappingTable::new(rows),
        looked_up,
        fallbacks,
    })
}
