use std::path::PathBuf;

use thiserror::Error;

use movieparse_core::ConfigError;
use movieparse_tmdb::TmdbError;

/// Errors that abort a pipeline run.
///
/// Per-row and per-ID failures never show up here; they are logged and
/// recorded as sentinels (lookups) or skipped (metadata fetches).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("TMDB error: {0}")]
    Tmdb(#[from] TmdbError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A persisted table exists but can't be used.
    #[error("Invalid table {file}: {message}")]
    InvalidTable { file: String, message: String },
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_table(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTable {
            file: file.into(),
            message: message.into(),
        }
    }
}
