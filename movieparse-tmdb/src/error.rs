/// Errors that can occur while talking to TMDB.
#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid API key: {0}")]
    InvalidCredentials(String),

    #[error("Server error (HTTP {status}): {message}")]
    Status { status: u16, message: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TmdbError {
    /// Errors that make every further request pointless.
    ///
    /// Everything else is scoped to a single lookup or fetch and degrades to
    /// a sentinel for that row.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TmdbError::InvalidCredentials(_))
    }
}
