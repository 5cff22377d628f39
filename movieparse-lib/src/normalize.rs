//! Flatten a TMDB movie document into rows of the metadata tables.
//!
//! Sections are extracted independently. A section that is missing or has
//! the wrong shape contributes no rows, and the remaining sections of the
//! same document are still extracted.

use serde_json::{Map, Value};

use movieparse_core::CatalogId;

use crate::schema::{Cell, TableKind};
use crate::table::{MetadataRow, MetadataTables};

/// Nested lists at the top level of the document.
const LIST_SECTIONS: [TableKind; 4] = [
    TableKind::Genres,
    TableKind::ProductionCompanies,
    TableKind::ProductionCountries,
    TableKind::SpokenLanguages,
];

/// Decompose one movie document into table rows tagged with `catalog_id`.
pub fn normalize(catalog_id: CatalogId, doc: &Value) -> MetadataTables {
    let mut tables = MetadataTables::default();

    let Some(doc) = doc.as_object() else {
        log::warn!("Metadata for {catalog_id} is not a JSON object, skipping");
        return tables;
    };

    let credits = doc.get("credits");
    match credits {
        Some(Value::Object(credits)) => {
            for kind in [TableKind::Cast, TableKind::Crew] {
                tables.extend(kind, list_rows(catalog_id, kind, credits.get(kind.name())));
            }
        }
        None | Some(Value::Null) => log::debug!("No credits for {catalog_id}"),
        Some(_) => log::warn!("Malformed credits section for {catalog_id}"),
    }

    match doc.get("belongs_to_collection") {
        None | Some(Value::Null) => {}
        Some(Value::Object(collection)) => {
            tables.push(
                TableKind::Collection,
                object_row(catalog_id, TableKind::Collection, collection),
            );
        }
        Some(_) => log::warn!("Malformed belongs_to_collection for {catalog_id}"),
    }

    for kind in LIST_SECTIONS {
        tables.extend(kind, list_rows(catalog_id, kind, doc.get(kind.name())));
    }

    tables.push(
        TableKind::Details,
        object_row(catalog_id, TableKind::Details, doc),
    );

    tables
}

/// Rows for a list section. Elements that aren't objects are skipped.
fn list_rows(catalog_id: CatalogId, kind: TableKind, section: Option<&Value>) -> Vec<MetadataRow> {
    match section {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item.as_object() {
                Some(obj) => Some(object_row(catalog_id, kind, obj)),
                None => {
                    log::debug!("Skipping non-object {kind} entry for {catalog_id}");
                    None
                }
            })
            .collect(),
        Some(_) => {
            log::warn!("Malformed {kind} section for {catalog_id}");
            Vec::new()
        }
    }
}

/// Pick the schema columns out of a JSON object.
fn object_row(catalog_id: CatalogId, kind: TableKind, obj: &Map<String, Value>) -> MetadataRow {
    let cells = kind
        .columns()
        .iter()
        .map(|column| {
            let value = obj.get(column.name)?;
            match Cell::from_json(value, column.kind) {
                Ok(cell) => cell,
                Err(_) => {
                    log::debug!(
                        "Dropping {} for {catalog_id}: expected {:?}, got {value}",
                        kind.qualified(column.name),
                        column.kind,
                    );
                    None
                }
            }
        })
        .collect();

    MetadataRow { catalog_id, cells }
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
