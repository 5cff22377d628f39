#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use movieparse_core::CatalogId;
use movieparse_lib::PipelineProgress;
use movieparse_tmdb::{CatalogService, SearchQuery, SearchResponse, SearchResult, TmdbError};
use serde_json::{Value, json};

type Key = (String, Option<i32>);

/// In-memory catalog. Unknown searches return an empty result list.
#[derive(Default)]
pub struct FakeCatalog {
    searches: HashMap<Key, i64>,
    malformed: HashSet<Key>,
    documents: HashMap<i64, Value>,
    failing: RefCell<HashSet<i64>>,
    reject_key: bool,
    pub search_log: RefCell<Vec<Key>>,
    pub detail_log: RefCell<Vec<i64>>,
}

impl FakeCatalog {
    /// A movie found by title + year.
    pub fn movie(mut self, title: &str, year: i32, id: i64) -> Self {
        self.searches.insert((title.to_string(), Some(year)), id);
        self.documents.insert(id, document(id, title));
        self
    }

    /// A movie only found by title.
    pub fn title_only(mut self, title: &str, id: i64) -> Self {
        self.searches.insert((title.to_string(), None), id);
        self.documents.insert(id, document(id, title));
        self
    }

    /// A details document with no search entry (reachable via manual IDs).
    pub fn document(mut self, id: i64, title: &str) -> Self {
        self.documents.insert(id, document(id, title));
        self
    }

    /// Put an existing document into a collection.
    pub fn in_collection(mut self, id: i64, collection_id: i64, name: &str) -> Self {
        if let Some(doc) = self.documents.get_mut(&id) {
            doc["belongs_to_collection"] = json!({
                "id": collection_id,
                "name": name,
                "poster_path": null,
                "backdrop_path": null
            });
        }
        self
    }

    pub fn malformed(mut self, title: &str, year: i32) -> Self {
        self.malformed.insert((title.to_string(), Some(year)));
        self
    }

    pub fn failing_details(self, id: i64) -> Self {
        self.failing.borrow_mut().insert(id);
        self
    }

    pub fn rejecting_key(mut self) -> Self {
        self.reject_key = true;
        self
    }

    /// Let fetches for `id` succeed from now on.
    pub fn recover(&self, id: i64) {
        self.failing.borrow_mut().remove(&id);
    }

    pub fn searches(&self) -> usize {
        self.search_log.borrow().len()
    }

    pub fn fetches(&self) -> Vec<i64> {
        self.detail_log.borrow().clone()
    }
}

impl CatalogService for FakeCatalog {
    fn search_movie(&self, query: SearchQuery<'_>) -> Result<SearchResponse, TmdbError> {
        if self.reject_key {
            return Err(TmdbError::InvalidCredentials("Invalid API key".to_string()));
        }
        let key = (query.title.to_string(), query.year);
        self.search_log.borrow_mut().push(key.clone());

        if self.malformed.contains(&key) {
            return Ok(SearchResponse::default());
        }
        let results = self
            .searches
            .get(&key)
            .map(|&id| {
                vec![SearchResult {
                    id: Some(id),
                    title: Some(query.title.to_string()),
                    ..Default::default()
                }]
            })
            .unwrap_or_default();
        Ok(SearchResponse {
            page: Some(1),
            total_results: Some(results.len() as u64),
            results: Some(results),
        })
    }

    fn movie_details(&self, id: CatalogId, _language: &str) -> Result<Value, TmdbError> {
        let raw = id.as_i64();
        self.detail_log.borrow_mut().push(raw);
        if self.failing.borrow().contains(&raw) {
            return Err(TmdbError::Status {
                status: 500,
                message: "Internal error".to_string(),
            });
        }
        self.documents.get(&raw).cloned().ok_or(TmdbError::Status {
            status: 404,
            message: "The resource you requested could not be found.".to_string(),
        })
    }
}

/// A small but complete movie document.
pub fn document(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "original_title": title,
        "adult": false,
        "budget": 1000000,
        "popularity": 12.5,
        "release_date": "1999-03-30",
        "video": false,
        "belongs_to_collection": null,
        "genres": [{"id": 28, "name": "Action"}, {"id": 18, "name": "Drama"}],
        "production_companies": [],
        "production_countries": [{"iso_3166_1": "US", "name": "United States of America"}],
        "spoken_languages": [{"english_name": "English", "iso_639_1": "en", "name": "English"}],
        "credits": {
            "cast": [{"id": 1, "name": "Lead", "character": "Hero", "order": 0}],
            "crew": [{"id": 2, "name": "Boss", "job": "Director", "department": "Directing"}]
        }
    })
}

/// Collects progress events for inspection.
#[derive(Default)]
pub struct Events(pub RefCell<Vec<PipelineProgress>>);

impl Events {
    pub fn push(&self, event: PipelineProgress) {
        self.0.borrow_mut().push(event);
    }

    pub fn all(&self) -> Vec<PipelineProgress> {
        self.0.borrow().clone()
    }
}

pub fn titles(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
