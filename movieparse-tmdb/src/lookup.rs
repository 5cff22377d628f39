use movieparse_core::Resolution;

use crate::error::TmdbError;
use crate::service::{CatalogService, SearchQuery};
use crate::types::SearchOutcome;

/// Which query produced a lookup's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMethod {
    /// Title and release year
    TitleYear,
    /// Title only, either because no year was known or as the lax fallback
    TitleOnly,
}

impl std::fmt::Display for LookupMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupMethod::TitleYear => write!(f, "title+year"),
            LookupMethod::TitleOnly => write!(f, "title only"),
        }
    }
}

/// Result of a single name lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupResult {
    pub resolution: Resolution,
    /// The last query issued.
    pub method: LookupMethod,
}

/// Resolve a title (and optional year) to a catalog ID.
///
/// 1. Title + year search, when a year is known. A hit or a malformed
///    response is final. An empty result ends with `NoMatch` in strict mode
///    and falls through to step 2 otherwise.
/// 2. Title-only search.
///
/// Only fatal errors (a rejected API key) are returned as `Err`; any other
/// request failure is logged and recorded as a malformed response.
pub fn lookup_movie(
    service: &dyn CatalogService,
    title: &str,
    year: Option<i32>,
    strict: bool,
) -> Result<LookupResult, TmdbError> {
    if let Some(year) = year {
        let method = LookupMethod::TitleYear;
        match search(service, SearchQuery::title_year(title, year))? {
            SearchOutcome::Hit(id) => return Ok(lookup_result(Resolution::Found(id), method)),
            SearchOutcome::Malformed => {
                return Ok(lookup_result(Resolution::MalformedResponse, method));
            }
            SearchOutcome::Empty if strict => return Ok(lookup_result(Resolution::NoMatch, method)),
            SearchOutcome::Empty => {
                log::debug!("No result for '{title}' ({year}), retrying with title only");
            }
        }
    }

    let method = LookupMethod::TitleOnly;
    let resolution = match search(service, SearchQuery::title_only(title))? {
        SearchOutcome::Hit(id) => Resolution::Found(id),
        SearchOutcome::Empty => Resolution::NoMatch,
        SearchOutcome::Malformed => Resolution::MalformedResponse,
    };
    Ok(lookup_result(resolution, method))
}

/// [`lookup_movie`] without the method detail.
pub fn resolve(
    service: &dyn CatalogService,
    title: &str,
    year: Option<i32>,
    strict: bool,
) -> Result<Resolution, TmdbError> {
    lookup_movie(service, title, year, strict).map(|r| r.resolution)
}

fn lookup_result(resolution: Resolution, method: LookupMethod) -> LookupResult {
    LookupResult { resolution, method }
}

fn search(service: &dyn CatalogService, query: SearchQuery<'_>) -> Result<SearchOutcome, TmdbError> {
    match service.search_movie(query) {
        Ok(resp) => Ok(resp.outcome()),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            log::warn!("Search for '{}' failed: {e}", query.title);
            Ok(SearchOutcome::Malformed)
        }
    }
}

#[cfg(test)]
#[path = "tests/lookup_tests.rs"]
mod tests;
