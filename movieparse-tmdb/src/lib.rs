//! TMDB access for movieparse: the blocking HTTP client, response types, the
//! [`CatalogService`] seam and the title/year resolver.

pub mod client;
pub mod error;
pub mod lookup;
pub mod service;
pub mod settings;
pub mod types;

pub use client::TmdbClient;
pub use error::TmdbError;
pub use lookup::{LookupMethod, LookupResult, lookup_movie, resolve};
pub use service::{CatalogService, SearchQuery};
pub use settings::{
    SettingOverrides, SettingSource, SettingSources, TmdbConfig, TmdbSettings, config_path,
    load_config_file, mask_key, setting_sources,
};
pub use types::{SearchOutcome, SearchResponse, SearchResult};
