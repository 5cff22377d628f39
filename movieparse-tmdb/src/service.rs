use movieparse_core::CatalogId;

use crate::error::TmdbError;
use crate::types::SearchResponse;

/// Parameters of a `/search/movie` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchQuery<'a> {
    pub title: &'a str,
    /// `None` makes this a title-only search.
    pub year: Option<i32>,
}

impl<'a> SearchQuery<'a> {
    pub fn title_year(title: &'a str, year: i32) -> Self {
        Self {
            title,
            year: Some(year),
        }
    }

    pub fn title_only(title: &'a str) -> Self {
        Self { title, year: None }
    }
}

/// The two catalog requests the pipeline makes.
///
/// [`crate::TmdbClient`] implements this over HTTP; tests use in-memory fakes.
pub trait CatalogService {
    /// Search for movies by title (and optionally year).
    fn search_movie(&self, query: SearchQuery<'_>) -> Result<SearchResponse, TmdbError>;

    /// Fetch the full document for one movie, credits included.
    fn movie_details(
        &self,
        id: CatalogId,
        language: &str,
    ) -> Result<serde_json::Value, TmdbError>;
}
