use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};

use movieparse_core::CatalogId;

use crate::error::TmdbError;
use crate::service::{CatalogService, SearchQuery};
use crate::settings::TmdbSettings;
use crate::types::{ErrorResponse, SearchResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTP client for the TMDB v3 API.
///
/// One request at a time; every call is a full round trip.
pub struct TmdbClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    pub fn new(settings: &TmdbSettings) -> Result<Self, TmdbError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("movieparse/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.clone(),
        })
    }

    /// v4 read access tokens are JWTs and go in the Authorization header;
    /// v3 keys go in the query string.
    fn is_access_token(&self) -> bool {
        self.api_key.starts_with("eyJ")
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        if self.is_access_token() {
            request.bearer_auth(&self.api_key)
        } else {
            request.query(&[("api_key", self.api_key.as_str())])
        }
    }

    /// Issue a GET and return the body of a successful response.
    fn get(&self, path: &str, params: &[(&str, String)]) -> Result<String, TmdbError> {
        let request = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(params);
        let resp = self.authorize(request).send()?;

        let status = resp.status();
        let text = resp.text()?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(TmdbError::InvalidCredentials(status_message(&text)));
        }
        if !status.is_success() {
            return Err(TmdbError::Status {
                status: status.as_u16(),
                message: status_message(&text),
            });
        }

        Ok(text)
    }
}

impl CatalogService for TmdbClient {
    fn search_movie(&self, query: SearchQuery<'_>) -> Result<SearchResponse, TmdbError> {
        let mut params = vec![
            ("query", query.title.to_string()),
            ("include_adult", "true".to_string()),
        ];
        if let Some(year) = query.year {
            params.push(("year", year.to_string()));
        }

        log::debug!("GET /search/movie {:?} year={:?}", query.title, query.year);
        let text = self.get("/search/movie", &params)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn movie_details(
        &self,
        id: CatalogId,
        language: &str,
    ) -> Result<serde_json::Value, TmdbError> {
        let params = [
            ("language", language.to_string()),
            ("append_to_response", "credits".to_string()),
        ];

        log::debug!("GET /movie/{id} language={language}");
        let text = self.get(&format!("/movie/{id}"), &params)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Pull `status_message` out of an error body, falling back to a prefix of
/// the raw text.
fn status_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.status_message)
        .unwrap_or_else(|| body.chars().take(200).collect())
}
