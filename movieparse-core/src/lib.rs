//! Core types for movieparse: catalog IDs, resolution states, the mapping
//! table and the naming-convention parser.

pub mod error;
pub mod mapping;
pub mod naming;
pub mod resolution;

pub use error::ConfigError;
pub use mapping::{MappingRecord, MappingRow, MappingTable, ResolutionCounts};
pub use naming::{Detection, NamingPattern, ParsedName, detect_pattern, parse_name};
pub use resolution::{CatalogId, Resolution, codes};
