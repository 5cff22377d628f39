use movieparse_core::{CatalogId, Detection, Resolution};

/// Progress events emitted while a pipeline runs.
///
/// The CLI turns these into progress bars; tests collect them.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineProgress {
    /// The naming pattern was estimated from the batch.
    PatternDetected(Detection),

    /// A lookup pass is starting.
    ResolveStarted {
        /// Rows that will be looked up
        total: usize,
    },

    /// One row was resolved (or found unparsable).
    Resolved {
        canonical_input: String,
        resolution: Resolution,
    },

    ResolveFinished,

    /// A metadata pass is starting.
    FetchStarted {
        /// IDs that will be fetched
        total: usize,
    },

    /// One document was fetched and normalized.
    Fetched {
        catalog_id: CatalogId,
        /// Rows produced across all tables
        rows: usize,
    },

    /// One fetch failed; the ID stays uncached.
    FetchFailed {
        catalog_id: CatalogId,
        message: String,
    },

    FetchFinished,
}

impl PipelineProgress {
    pub fn resolved(canonical_input: impl Into<String>, resolution: Resolution) -> Self {
        Self::Resolved {
            canonical_input: canonical_input.into(),
            resolution,
        }
    }

    pub fn fetch_failed(catalog_id: CatalogId, message: impl Into<String>) -> Self {
        Self::FetchFailed {
            catalog_id,
            message: message.into(),
        }
    }
}
