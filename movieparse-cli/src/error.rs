use thiserror::Error;

use movieparse_core::ConfigError;
use movieparse_lib::PipelineError;
use movieparse_tmdb::TmdbError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Bad settings or arguments
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The run itself failed
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Couldn't set up the TMDB client
    #[error(transparent)]
    Tmdb(#[from] TmdbError),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
