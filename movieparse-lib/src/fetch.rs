use std::collections::BTreeSet;

use movieparse_core::CatalogId;
use movieparse_tmdb::{CatalogService, TmdbError};

use crate::normalize::normalize;
use crate::progress::PipelineProgress;
use crate::table::MetadataTables;

/// Rows gathered by a metadata pass.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    pub tables: MetadataTables,
    /// IDs whose document was fetched and normalized.
    pub fetched: BTreeSet<CatalogId>,
    /// IDs whose request failed. They stay uncached.
    pub failed: BTreeSet<CatalogId>,
}

/// Fetch and normalize the document of every ID in `ids`, in order.
///
/// A failed request skips that ID; only a fatal catalog error stops the pass.
pub fn fetch_metadata(
    service: &dyn CatalogService,
    ids: &BTreeSet<CatalogId>,
    language: &str,
    progress: &dyn Fn(PipelineProgress),
) -> Result<FetchOutcome, TmdbError> {
    progress(PipelineProgress::FetchStarted { total: ids.len() });

    let mut outcome = FetchOutcome::default();
    for &id in ids {
        match service.movie_details(id, language) {
            Ok(doc) => {
                let tables = normalize(id, &doc);
                let rows = tables.total_rows();
                log::debug!("Movie {id}: {rows} rows");
                outcome.tables.append(tables);
                outcome.fetched.insert(id);
                progress(PipelineProgress::Fetched {
                    catalog_id: id,
                    rows,
                });
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                log::warn!("Failed to fetch metadata for {id}: {e}");
                outcome.failed.insert(id);
                progress(PipelineProgress::fetch_failed(id, e.to_string()));
            }
        }
    }

    progress(PipelineProgress::FetchFinished);
    log::info!(
        "Fetched metadata for {} of {} movies",
        outcome.fetched.len(),
        ids.len()
    );
    Ok(outcome)
}
