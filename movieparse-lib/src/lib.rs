//! The movieparse pipeline: resolve movie names to TMDB IDs, then cache each
//! movie's metadata as a set of flat CSV tables.

pub mod error;
pub mod fetch;
pub mod inputs;
pub mod normalize;
pub mod pipeline;
pub mod progress;
pub mod reconcile;
pub mod resolve;
pub mod schema;
pub mod store;
pub mod table;

pub use error::PipelineError;
pub use fetch::{FetchOutcome, fetch_metadata};
pub use inputs::MovieSource;
pub use normalize::normalize;
pub use pipeline::{RunOptions, RunSummary, run};
pub use progress::PipelineProgress;
pub use reconcile::{ids_to_fetch, needs_resolution, orphaned_ids, refresh};
pub use resolve::{ResolveOptions, ResolvePass, resolve_mapping};
pub use schema::{Cell, Column, FieldType, TableKind};
pub use store::{CacheSnapshot, OutputStore};
pub use table::{MetadataRow, MetadataTables};
