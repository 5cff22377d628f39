use std::collections::{BTreeMap, BTreeSet};

use movieparse_core::CatalogId;

use crate::schema::{Cell, TableKind};

/// One row of a metadata table. `cells` follows the table's schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRow {
    pub catalog_id: CatalogId,
    pub cells: Vec<Option<Cell>>,
}

impl MetadataRow {
    /// Look up a cell by its bare column name.
    pub fn get(&self, kind: TableKind, column: &str) -> Option<&Cell> {
        let index = kind.column_index(column)?;
        self.cells.get(index)?.as_ref()
    }
}

/// Row accumulators for every metadata table.
///
/// Stages never mutate a shared instance: they build their own and hand it
/// on, and [`MetadataTables::append`] combines them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataTables {
    tables: BTreeMap<TableKind, Vec<MetadataRow>>,
}

impl MetadataTables {
    pub fn rows(&self, kind: TableKind) -> &[MetadataRow] {
        self.tables.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn push(&mut self, kind: TableKind, row: MetadataRow) {
        self.tables.entry(kind).or_default().push(row);
    }

    pub fn extend(&mut self, kind: TableKind, rows: impl IntoIterator<Item = MetadataRow>) {
        let mut rows = rows.into_iter().peekable();
        if rows.peek().is_some() {
            self.tables.entry(kind).or_default().extend(rows);
        }
    }

    /// Append every table of `other` after this one's rows.
    pub fn append(&mut self, other: MetadataTables) {
        for (kind, rows) in other.tables {
            self.extend(kind, rows);
        }
    }

    /// Drop every row belonging to one of `ids`.
    pub fn without_ids(mut self, ids: &BTreeSet<CatalogId>) -> Self {
        for rows in self.tables.values_mut() {
            rows.retain(|r| !ids.contains(&r.catalog_id));
        }
        self.tables.retain(|_, rows| !rows.is_empty());
        self
    }

    /// IDs that appear in any table.
    pub fn catalog_ids(&self) -> BTreeSet<CatalogId> {
        self.tables
            .values()
            .flatten()
            .map(|r| r.catalog_id)
            .collect()
    }

    /// Number of rows per table, in [`TableKind::ALL`] order.
    pub fn row_counts(&self) -> Vec<(TableKind, usize)> {
        TableKind::ALL
            .iter()
            .map(|&k| (k, self.rows(k).len()))
            .collect()
    }

    pub fn total_rows(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_rows() == 0
    }
}
