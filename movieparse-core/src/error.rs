use std::path::PathBuf;

/// Fatal configuration problems. Any of these stops a run before the first
/// network request is made.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing TMDB API key. Pass --tmdb-api-key, set TMDB_API_KEY, or add it to {0}")]
    MissingApiKey(String),

    #[error("Output directory is not a directory: {}", .0.display())]
    InvalidOutputDir(PathBuf),

    #[error("Root movie directory is not a directory: {}", .0.display())]
    InvalidRootDir(PathBuf),

    #[error("Invalid parsing style '{0}' (expected one of 0, 1, 2)")]
    InvalidPattern(String),

    #[error("No movies to parse: the input batch is empty")]
    EmptyInput,

    #[error("Couldn't estimate a parsing style for {0} names, please supply one explicitly")]
    UndetectablePattern(usize),

    #[error("Config file error: {0}")]
    File(String),
}

impl ConfigError {
    pub fn invalid_pattern(value: impl Into<String>) -> Self {
        Self::InvalidPattern(value.into())
    }

    pub fn file(msg: impl Into<String>) -> Self {
        Self::File(msg.into())
    }
}
