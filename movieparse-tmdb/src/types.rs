use serde::Deserialize;

use movieparse_core::CatalogId;

/// Response body of `/search/movie`.
///
/// Every field is optional so a contract violation shows up as a missing
/// value instead of a decode failure.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub results: Option<Vec<SearchResult>>,
    #[serde(default)]
    pub total_results: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SearchResult {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
}

/// How a search response reads under the lookup contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// First result's ID.
    Hit(CatalogId),
    /// `results` present but empty.
    Empty,
    /// `results` missing, or the first result has no usable `id`.
    Malformed,
}

impl SearchResponse {
    /// First result wins; TMDB's own ordering is the only ranking.
    pub fn outcome(&self) -> SearchOutcome {
        let Some(results) = &self.results else {
            return SearchOutcome::Malformed;
        };
        match results.first() {
            None => SearchOutcome::Empty,
            Some(first) => match first.id.and_then(CatalogId::new) {
                Some(id) => SearchOutcome::Hit(id),
                None => SearchOutcome::Malformed,
            },
        }
    }
}

/// Error body TMDB sends with 4xx/5xx responses.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ErrorResponse {
    #[serde(default)]
    pub status_code: Option<i64>,
    #[serde(default)]
    pub status_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> SearchResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn first_result_wins() {
        let r = parse(r#"{"page":1,"results":[{"id":603,"title":"The Matrix"},{"id":604}]}"#);
        assert_eq!(r.outcome(), SearchOutcome::Hit(CatalogId::new(603).unwrap()));
    }

    #[test]
    fn empty_results_is_no_match() {
        assert_eq!(parse(r#"{"results":[]}"#).outcome(), SearchOutcome::Empty);
    }

    #[test]
    fn missing_results_is_malformed() {
        assert_eq!(
            parse(r#"{"status_message":"oops"}"#).outcome(),
            SearchOutcome::Malformed
        );
    }

    #[test]
    fn missing_id_is_malformed() {
        assert_eq!(
            parse(r#"{"results":[{"title":"The Matrix"}]}"#).outcome(),
            SearchOutcome::Malformed
        );
    }
}
