//! The mapping table: which input resolved to which catalog ID.
//!
//! Rows are keyed by `canonical_input`. Merging keeps the first occurrence,
//! so rows loaded from disk always win over freshly discovered duplicates.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Deserializer, Serialize};

use crate::resolution::{CatalogId, Resolution};

/// One input name and its catalog IDs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRow {
    /// The raw input: a list entry or the full path of a movie directory.
    pub input: String,
    /// Normalized name used as the dedup key and for parsing.
    pub canonical_input: String,
    /// Filled in by the resolver.
    pub catalog_id: Resolution,
    /// User-supplied override. Never written by the resolver.
    pub catalog_id_manual: Option<CatalogId>,
}

impl MappingRow {
    pub fn new(input: impl Into<String>, canonical_input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            canonical_input: canonical_input.into(),
            catalog_id: Resolution::Unresolved,
            catalog_id_manual: None,
        }
    }

    /// Both the resolved and the manual ID, when present.
    pub fn catalog_ids(&self) -> impl Iterator<Item = CatalogId> {
        self.catalog_id
            .catalog_id()
            .into_iter()
            .chain(self.catalog_id_manual)
    }
}

/// CSV shape of a [`MappingRow`]. Sentinels are plain integers here.
///
/// Older files used `tmdb_id` / `tmdb_id_man`; both spellings are read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingRecord {
    pub input: String,
    pub canonical_input: String,
    #[serde(alias = "tmdb_id", deserialize_with = "deserialize_code", default)]
    pub catalog_id: i64,
    #[serde(alias = "tmdb_id_man", deserialize_with = "deserialize_code", default)]
    pub catalog_id_manual: i64,
}

impl From<&MappingRow> for MappingRecord {
    fn from(row: &MappingRow) -> Self {
        Self {
            input: row.input.clone(),
            canonical_input: row.canonical_input.clone(),
            catalog_id: row.catalog_id.code(),
            catalog_id_manual: row.catalog_id_manual.map_or(0, CatalogId::as_i64),
        }
    }
}

impl From<MappingRecord> for MappingRow {
    fn from(record: MappingRecord) -> Self {
        Self {
            input: record.input,
            canonical_input: record.canonical_input,
            catalog_id: Resolution::from_code(record.catalog_id),
            catalog_id_manual: CatalogId::new(record.catalog_id_manual),
        }
    }
}

/// Accepts `603`, `603.0` (spreadsheet round trips) and empty cells (as 0).
fn deserialize_code<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    if let Ok(v) = raw.parse::<i64>() {
        return Ok(v);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 => Ok(v as i64),
        _ => Err(serde::de::Error::custom(format!(
            "invalid catalog id '{raw}'"
        ))),
    }
}

/// Tally of resolution states across a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionCounts {
    pub found: usize,
    pub unresolved: usize,
    pub no_match: usize,
    pub not_extracted: usize,
    pub malformed: usize,
    pub manual: usize,
}

/// Ordered collection of mapping rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    rows: Vec<MappingRow>,
}

impl MappingTable {
    pub fn new(rows: Vec<MappingRow>) -> Self {
        Self { rows }
    }

    /// Rows for a list of free-text titles; the entry is its own canonical form.
    pub fn from_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = titles
            .into_iter()
            .map(|t| {
                let t = t.into();
                MappingRow::new(t.clone(), t)
            })
            .collect();
        Self { rows }
    }

    /// Rows from `(input, canonical_input)` pairs.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let rows = entries
            .into_iter()
            .map(|(input, canonical)| MappingRow::new(input, canonical))
            .collect();
        Self { rows }
    }

    /// Concatenate `self` (persisted) before `fresh`, keeping the first row
    /// for every `canonical_input`.
    pub fn merge(self, fresh: MappingTable) -> MappingTable {
        let mut seen = HashSet::new();
        let rows = self
            .rows
            .into_iter()
            .chain(fresh.rows)
            .filter(|row| seen.insert(row.canonical_input.clone()))
            .collect();
        MappingTable { rows }
    }

    pub fn rows(&self) -> &[MappingRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [MappingRow] {
        &mut self.rows
    }

    pub fn into_rows(self) -> Vec<MappingRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn canonical_inputs(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.canonical_input.as_str())
    }

    /// Every real catalog ID in either ID column.
    pub fn catalog_ids(&self) -> BTreeSet<CatalogId> {
        self.rows.iter().flat_map(MappingRow::catalog_ids).collect()
    }

    pub fn counts(&self) -> ResolutionCounts {
        let mut counts = ResolutionCounts::default();
        for row in &self.rows {
            match row.catalog_id {
                Resolution::Found(_) => counts.found += 1,
                Resolution::Unresolved => counts.unresolved += 1,
                Resolution::NoMatch => counts.no_match += 1,
                Resolution::NotExtracted => counts.not_extracted += 1,
                Resolution::MalformedResponse => counts.malformed += 1,
            }
            if row.catalog_id_manual.is_some() {
                counts.manual += 1;
            }
        }
        counts
    }

    pub fn to_records(&self) -> Vec<MappingRecord> {
        self.rows.iter().map(MappingRecord::from).collect()
    }

    pub fn from_records(records: Vec<MappingRecord>) -> Self {
        Self {
            rows: records.into_iter().map(MappingRow::from).collect(),
        }
    }
}
