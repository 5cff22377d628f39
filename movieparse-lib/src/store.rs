//! CSV persistence for the mapping table and the metadata tables.
//!
//! Every table lives in its own file in the output directory. Files are read
//! once at the start of a run and rewritten in full at the end of a pass.

use std::collections::BTreeSet;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use movieparse_core::{CatalogId, ConfigError, MappingRecord, MappingTable};

use crate::error::PipelineError;
use crate::schema::{CATALOG_ID_COLUMN, Cell, LEGACY_CATALOG_ID_COLUMN, TableKind};
use crate::table::{MetadataRow, MetadataTables};

pub const MAPPING_FILE: &str = "mapping.csv";

/// Mapping header as written.
pub const MAPPING_HEADER: [&str; 4] = ["input", "canonical_input", "catalog_id", "catalog_id_manual"];

/// Everything persisted by earlier runs.
#[derive(Debug, Clone, Default)]
pub struct CacheSnapshot {
    pub mapping: MappingTable,
    pub metadata: MetadataTables,
}

impl CacheSnapshot {
    /// Real IDs in either mapping ID column.
    pub fn cached_mapping_ids(&self) -> BTreeSet<CatalogId> {
        self.mapping.catalog_ids()
    }

    /// IDs with rows in any metadata table.
    pub fn cached_metadata_ids(&self) -> BTreeSet<CatalogId> {
        self.metadata.catalog_ids()
    }
}

/// The output directory and the table files inside it.
#[derive(Debug, Clone)]
pub struct OutputStore {
    dir: PathBuf,
}

impl OutputStore {
    /// Use `dir` as the output directory. It must already exist.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(ConfigError::InvalidOutputDir(dir));
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn mapping_path(&self) -> PathBuf {
        self.dir.join(MAPPING_FILE)
    }

    pub fn table_path(&self, kind: TableKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    /// Read the mapping and every metadata table.
    pub fn load(&self) -> Result<CacheSnapshot, PipelineError> {
        Ok(CacheSnapshot {
            mapping: self.read_mapping()?,
            metadata: self.read_metadata()?,
        })
    }

    /// Read `mapping.csv`. A missing file is an empty table.
    pub fn read_mapping(&self) -> Result<MappingTable, PipelineError> {
        let path = self.mapping_path();
        let Some(file) = open_existing(&path)? else {
            log::debug!("No mapping at {}, starting fresh", path.display());
            return Ok(MappingTable::default());
        };
        read_mapping_from(file)
    }

    pub fn write_mapping(&self, mapping: &MappingTable) -> Result<(), PipelineError> {
        let path = self.mapping_path();
        let file = std::fs::File::create(&path).map_err(|e| PipelineError::io(&path, e))?;
        write_mapping_to(file, mapping)?;
        log::info!("Wrote {} rows to {}", mapping.len(), path.display());
        Ok(())
    }

    /// Read every metadata table that exists on disk.
    pub fn read_metadata(&self) -> Result<MetadataTables, PipelineError> {
        let mut tables = MetadataTables::default();
        for kind in TableKind::ALL {
            let path = self.table_path(kind);
            if let Some(file) = open_existing(&path)? {
                tables.extend(kind, read_table(kind, file)?);
            }
        }
        Ok(tables)
    }

    /// Write every non-empty metadata table and remove the file of every
    /// empty one, so the directory holds exactly `tables`. Returns the rows
    /// written per table; empty tables are not listed.
    pub fn write_metadata(
        &self,
        tables: &MetadataTables,
    ) -> Result<Vec<(TableKind, usize)>, PipelineError> {
        let mut written = Vec::new();
        for (kind, count) in tables.row_counts() {
            let path = self.table_path(kind);
            if count == 0 {
                remove_stale(&path)?;
                continue;
            }
            let file = std::fs::File::create(&path).map_err(|e| PipelineError::io(&path, e))?;
            write_table(kind, tables.rows(kind), file)?;
            log::debug!("Wrote {count} rows to {}", path.display());
            written.push((kind, count));
        }
        Ok(written)
    }
}

fn open_existing(path: &Path) -> Result<Option<std::fs::File>, PipelineError> {
    match std::fs::File::open(path) {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(PipelineError::io(path, e)),
    }
}

fn remove_stale(path: &Path) -> Result<(), PipelineError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            log::debug!("Removed {}, no rows left", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(PipelineError::io(path, e)),
    }
}

/// Parse a mapping table. Any bad row fails the whole read, since the file
/// may hold hand-entered IDs that must not be dropped on the next write.
pub fn read_mapping_from<R: Read>(reader: R) -> Result<MappingTable, PipelineError> {
    let mut reader = csv::Reader::from_reader(reader);
    let records = reader
        .deserialize::<MappingRecord>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| PipelineError::invalid_table(MAPPING_FILE, e.to_string()))?;
    Ok(MappingTable::from_records(records))
}

pub fn write_mapping_to<W: Write>(writer: W, mapping: &MappingTable) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(MAPPING_HEADER)?;
    for record in mapping.to_records() {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Parse one metadata table, matching columns by header name.
///
/// Both `catalog_id` and the older `tmdb_id` key column are accepted, as are
/// bare and table-prefixed column names. Unknown columns are ignored, rows
/// without a usable key are skipped, and cells that don't fit their column
/// type are left empty.
pub fn read_table<R: Read>(kind: TableKind, reader: R) -> Result<Vec<MetadataRow>, PipelineError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();

    let key = headers
        .iter()
        .position(|h| h == CATALOG_ID_COLUMN || h == LEGACY_CATALOG_ID_COLUMN)
        .ok_or_else(|| {
            PipelineError::invalid_table(kind.file_name(), format!("no {CATALOG_ID_COLUMN} column"))
        })?;

    let prefix = format!("{}.", kind.name());
    let slots: Vec<Option<usize>> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == key {
                return None;
            }
            let slot = kind.column_index(h.strip_prefix(&prefix).unwrap_or(h));
            if slot.is_none() {
                log::debug!("Ignoring unknown column '{h}' in {}", kind.file_name());
            }
            slot
        })
        .collect();

    let columns = kind.columns();
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        let raw_id = record.get(key).unwrap_or("").trim();
        let Some(catalog_id) = parse_catalog_id(raw_id) else {
            log::warn!("Skipping {} row with catalog id '{raw_id}'", kind.file_name());
            continue;
        };

        let mut cells = vec![None; columns.len()];
        for (field, slot) in record.iter().zip(&slots) {
            let Some(index) = *slot else { continue };
            let column = columns[index];
            cells[index] = match Cell::parse(field, column.kind) {
                Ok(cell) => cell,
                Err(_) => {
                    log::debug!(
                        "Dropping {} = '{field}' for {catalog_id}: expected {:?}",
                        kind.qualified(column.name),
                        column.kind,
                    );
                    None
                }
            };
        }
        rows.push(MetadataRow { catalog_id, cells });
    }

    Ok(rows)
}

/// Write one metadata table with its schema header.
pub fn write_table<W: Write>(
    kind: TableKind,
    rows: &[MetadataRow],
    writer: W,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(kind.header())?;
    for row in rows {
        let fields = std::iter::once(row.catalog_id.to_string()).chain(
            row.cells
                .iter()
                .map(|cell| cell.as_ref().map(ToString::to_string).unwrap_or_default()),
        );
        writer.write_record(fields)?;
    }
    writer.flush()?;
    Ok(())
}

/// Key cells may have been written as floats by spreadsheet tools.
fn parse_catalog_id(raw: &str) -> Option<CatalogId> {
    let value = raw
        .parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().filter(|f| f.fract() == 0.0).map(|f| f as i64))?;
    CatalogId::new(value)
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
