use movieparse_core::*;

fn found(id: i64) -> Resolution {
    Resolution::Found(CatalogId::new(id).unwrap())
}

#[test]
fn merge_keeps_persisted_resolution() {
    let mut persisted = MappingTable::from_titles(["1999 The Matrix"]);
    persisted.rows_mut()[0].catalog_id = found(603);
    let fresh = MappingTable::from_titles(["1999 The Matrix"]);

    let merged = persisted.merge(fresh);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged.rows()[0].catalog_id, found(603));
}

#[test]
fn merge_appends_new_names_after_persisted_rows() {
    let persisted = MappingTable::from_titles(["1999 The Matrix"]);
    let fresh = MappingTable::from_titles(["2010 Inception", "1999 The Matrix", "2010 Inception"]);

    let merged = persisted.merge(fresh);
    let names: Vec<&str> = merged.canonical_inputs().collect();
    assert_eq!(names, vec!["1999 The Matrix", "2010 Inception"]);
}

#[test]
fn merge_preserves_manual_ids() {
    let mut persisted = MappingTable::from_titles(["2003 The Matrix Reloaded"]);
    persisted.rows_mut()[0].catalog_id_manual = CatalogId::new(777);
    let merged = persisted.merge(MappingTable::from_titles(["2003 The Matrix Reloaded"]));
    assert_eq!(merged.rows()[0].catalog_id_manual, CatalogId::new(777));
}

#[test]
fn catalog_ids_union_both_columns_without_sentinels() {
    let mut table = MappingTable::from_titles(["a", "b", "c", "d"]);
    table.rows_mut()[0].catalog_id = found(603);
    table.rows_mut()[1].catalog_id = Resolution::NoMatch;
    table.rows_mut()[1].catalog_id_manual = CatalogId::new(888);
    table.rows_mut()[2].catalog_id = Resolution::NotExtracted;
    table.rows_mut()[3].catalog_id = Resolution::MalformedResponse;

    let ids: Vec<u64> = table.catalog_ids().into_iter().map(CatalogId::get).collect();
    assert_eq!(ids, vec![603, 888]);
}

#[test]
fn counts_by_state() {
    let mut table = MappingTable::from_titles(["a", "b", "c"]);
    table.rows_mut()[0].catalog_id = found(1);
    table.rows_mut()[1].catalog_id = Resolution::NoMatch;
    table.rows_mut()[2].catalog_id_manual = CatalogId::new(5);

    let c = table.counts();
    assert_eq!(c.found, 1);
    assert_eq!(c.no_match, 1);
    assert_eq!(c.unresolved, 1);
    assert_eq!(c.manual, 1);
}

#[test]
fn reads_legacy_headers() {
    let data = "\
input,canonical_input,tmdb_id,tmdb_id_man
/movies/1999 The Matrix,1999 The Matrix,603,0
/movies/Heat,Heat,-2,949
/movies/2010 Inception,2010 Inception,27205.0,
";
    let mut reader = csv::Reader::from_reader(data.as_bytes());
    let records: Vec<MappingRecord> = reader.deserialize().collect::<Result<_, _>>().unwrap();
    let table = MappingTable::from_records(records);

    assert_eq!(table.rows()[0].catalog_id, found(603));
    assert_eq!(table.rows()[1].catalog_id, Resolution::NotExtracted);
    assert_eq!(table.rows()[1].catalog_id_manual, CatalogId::new(949));
    assert_eq!(table.rows()[2].catalog_id, found(27205));
    assert_eq!(table.rows()[2].catalog_id_manual, None);
}

#[test]
fn records_carry_sentinel_codes() {
    let mut table = MappingTable::from_titles(["Heat"]);
    table.rows_mut()[0].catalog_id = Resolution::NotExtracted;
    let records = table.to_records();
    assert_eq!(records[0].catalog_id, codes::NO_EXTRACT);
    assert_eq!(records[0].catalog_id_manual, 0);
}
