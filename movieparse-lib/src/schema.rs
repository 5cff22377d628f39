//! Static schemas for the metadata tables.
//!
//! Every table has a fixed, ordered column list with a semantic type per
//! column. JSON values are checked against these types once, when a metadata
//! document is normalized; CSV text is checked when a table is read back.

use std::fmt;

use chrono::NaiveDate;
use serde_json::Value;

/// Name of the foreign-key column that leads every metadata table.
pub const CATALOG_ID_COLUMN: &str = "catalog_id";

/// Older files named the key column after the provider.
pub const LEGACY_CATALOG_ID_COLUMN: &str = "tmdb_id";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Bool,
    Int,
    Float,
    Text,
    /// `YYYY-MM-DD`
    Date,
}

/// One typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
}

impl Cell {
    /// Convert a JSON value to a cell of type `kind`.
    ///
    /// `Ok(None)` means the value is absent (null, or an empty date).
    /// `Err(TypeMismatch)` means the value is present but doesn't fit the type.
    pub fn from_json(value: &Value, kind: FieldType) -> Result<Option<Cell>, TypeMismatch> {
        if value.is_null() {
            return Ok(None);
        }
        let cell = match kind {
            FieldType::Bool => value.as_bool().map(Cell::Bool),
            FieldType::Int => value
                .as_i64()
                .or_else(|| value.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
                .map(Cell::Int),
            FieldType::Float => value.as_f64().map(Cell::Float),
            FieldType::Text => value.as_str().map(|s| Cell::Text(s.to_string())),
            FieldType::Date => match value.as_str() {
                Some("") => return Ok(None),
                Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT).ok().map(Cell::Date),
                None => None,
            },
        };
        cell.map(Some).ok_or(TypeMismatch)
    }

    /// Parse a CSV field. Empty fields are absent.
    pub fn parse(raw: &str, kind: FieldType) -> Result<Option<Cell>, TypeMismatch> {
        if raw.is_empty() {
            return Ok(None);
        }
        let cell = match kind {
            FieldType::Bool => match raw {
                "true" | "True" | "TRUE" | "1" => Some(Cell::Bool(true)),
                "false" | "False" | "FALSE" | "0" => Some(Cell::Bool(false)),
                _ => None,
            },
            FieldType::Int => raw
                .parse::<i64>()
                .ok()
                .or_else(|| {
                    raw.parse::<f64>()
                        .ok()
                        .filter(|f| f.fract() == 0.0)
                        .map(|f| f as i64)
                })
                .map(Cell::Int),
            FieldType::Float => raw.parse::<f64>().ok().map(Cell::Float),
            FieldType::Text => Some(Cell::Text(raw.to_string())),
            FieldType::Date => {
                // some tools write a time part
                let date = raw.get(..10).unwrap_or(raw);
                NaiveDate::parse_from_str(date, DATE_FORMAT)
                    .ok()
                    .map(Cell::Date)
            }
        };
        cell.map(Some).ok_or(TypeMismatch)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Int(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v:.3}"),
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
        }
    }
}

/// A value that is present but doesn't fit its column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMismatch;

/// A named, typed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: FieldType,
}

const fn col(name: &'static str, kind: FieldType) -> Column {
    Column { name, kind }
}

use FieldType::{Bool, Date, Float, Int, Text};

const CAST: &[Column] = &[
    col("adult", Bool),
    col("gender", Int),
    col("id", Int),
    col("known_for_department", Text),
    col("name", Text),
    col("original_name", Text),
    col("popularity", Float),
    col("profile_path", Text),
    col("cast_id", Int),
    col("character", Text),
    col("credit_id", Text),
    col("order", Int),
];

const CREW: &[Column] = &[
    col("adult", Bool),
    col("gender", Int),
    col("id", Int),
    col("known_for_department", Text),
    col("name", Text),
    col("original_name", Text),
    col("popularity", Float),
    col("profile_path", Text),
    col("credit_id", Text),
    col("department", Text),
    col("job", Text),
];

const COLLECTION: &[Column] = &[
    col("id", Int),
    col("name", Text),
    col("poster_path", Text),
    col("backdrop_path", Text),
];

const GENRES: &[Column] = &[col("id", Int), col("name", Text)];

const PRODUCTION_COMPANIES: &[Column] = &[
    col("id", Int),
    col("logo_path", Text),
    col("name", Text),
    col("origin_country", Text),
];

const PRODUCTION_COUNTRIES: &[Column] = &[col("iso_3166_1", Text), col("name", Text)];

const SPOKEN_LANGUAGES: &[Column] = &[
    col("english_name", Text),
    col("iso_639_1", Text),
    col("name", Text),
];

const DETAILS: &[Column] = &[
    col("adult", Bool),
    col("backdrop_path", Text),
    col("budget", Int),
    col("homepage", Text),
    col("imdb_id", Text),
    col("original_language", Text),
    col("original_title", Text),
    col("overview", Text),
    col("popularity", Float),
    col("poster_path", Text),
    col("release_date", Date),
    col("revenue", Int),
    col("runtime", Int),
    col("status", Text),
    col("tagline", Text),
    col("title", Text),
    col("video", Bool),
    col("vote_average", Float),
    col("vote_count", Int),
];

/// The metadata tables, one CSV file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TableKind {
    Cast,
    Collection,
    Crew,
    Genres,
    ProductionCompanies,
    ProductionCountries,
    SpokenLanguages,
    Details,
}

impl TableKind {
    pub const ALL: [TableKind; 8] = [
        TableKind::Cast,
        TableKind::Collection,
        TableKind::Crew,
        TableKind::Genres,
        TableKind::ProductionCompanies,
        TableKind::ProductionCountries,
        TableKind::SpokenLanguages,
        TableKind::Details,
    ];

    /// Table name; also the file stem and the column prefix.
    pub fn name(self) -> &'static str {
        match self {
            TableKind::Cast => "cast",
            TableKind::Collection => "collection",
            TableKind::Crew => "crew",
            TableKind::Genres => "genres",
            TableKind::ProductionCompanies => "production_companies",
            TableKind::ProductionCountries => "production_countries",
            TableKind::SpokenLanguages => "spoken_languages",
            TableKind::Details => "details",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.csv", self.name())
    }

    pub fn columns(self) -> &'static [Column] {
        match self {
            TableKind::Cast => CAST,
            TableKind::Collection => COLLECTION,
            TableKind::Crew => CREW,
            TableKind::Genres => GENRES,
            TableKind::ProductionCompanies => PRODUCTION_COMPANIES,
            TableKind::ProductionCountries => PRODUCTION_COUNTRIES,
            TableKind::SpokenLanguages => SPOKEN_LANGUAGES,
            TableKind::Details => DETAILS,
        }
    }

    /// Position of a schema column by its bare name.
    pub fn column_index(self, name: &str) -> Option<usize> {
        self.columns().iter().position(|c| c.name == name)
    }

    /// Header as written to disk. Details columns are bare; every other
    /// table prefixes its columns with the table name (`cast.name`).
    pub fn header(self) -> Vec<String> {
        std::iter::once(CATALOG_ID_COLUMN.to_string())
            .chain(self.columns().iter().map(|c| self.qualified(c.name)))
            .collect()
    }

    pub fn qualified(self, column: &str) -> String {
        match self {
            TableKind::Details => column.to_string(),
            _ => format!("{}.{}", self.name(), column),
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
