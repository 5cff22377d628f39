//! Decide which catalog IDs still need metadata, and fold fresh metadata
//! into the cached tables.

use std::collections::BTreeSet;

use movieparse_core::{CatalogId, MappingRow, MappingTable};

use crate::table::MetadataTables;

/// Whether a mapping row should be (re)looked up in this pass.
pub fn needs_resolution(row: &MappingRow, eager: bool) -> bool {
    eager || row.catalog_id.is_unresolved()
}

/// Real IDs from both mapping columns, minus the ones already cached unless
/// `eager` is set.
///
/// Sentinels never make it into the set because [`CatalogId`] can't hold
/// them. The set is ordered, so fetches happen in ascending ID order.
pub fn ids_to_fetch(
    mapping: &MappingTable,
    cached: &BTreeSet<CatalogId>,
    eager: bool,
) -> BTreeSet<CatalogId> {
    let ids = mapping.catalog_ids();
    if eager {
        return ids;
    }
    ids.difference(cached).copied().collect()
}

/// Replace the cached rows of every freshly fetched ID, then append the
/// fresh rows.
pub fn refresh(
    cached: MetadataTables,
    fetched: &BTreeSet<CatalogId>,
    fresh: MetadataTables,
) -> MetadataTables {
    let mut tables = cached.without_ids(fetched);
    tables.append(fresh);
    tables
}

/// IDs with cached rows that no mapping row points at any more, e.g. after
/// an eager pass resolved a name to a different movie.
pub fn orphaned_ids(tables: &MetadataTables, mapping: &MappingTable) -> BTreeSet<CatalogId> {
    let known = mapping.catalog_ids();
    tables
        .catalog_ids()
        .difference(&known)
        .copied()
        .collect()
}
