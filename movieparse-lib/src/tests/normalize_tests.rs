use serde_json::json;

use super::*;

fn matrix() -> Value {
    json!({
        "adult": false,
        "backdrop_path": "/fNG7i7RqMErkcqhohV2a6cV1Ehy.jpg",
        "belongs_to_collection": {
            "id": 2344,
            "name": "The Matrix Collection",
            "poster_path": "/bV9qTVHTVf0gkW0j7p7M0ILD4pG.jpg",
            "backdrop_path": "/bRm2DEgUiYciDw3myHuYFInD7la.jpg"
        },
        "budget": 63000000,
        "genres": [
            {"id": 28, "name": "Action"},
            {"id": 878, "name": "Science Fiction"}
        ],
        "homepage": "http://www.warnerbros.com/matrix",
        "id": 603,
        "imdb_id": "tt0133093",
        "original_language": "en",
        "original_title": "The Matrix",
        "overview": "Set in the 22nd century...",
        "popularity": 83.2,
        "poster_path": "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
        "production_companies": [
            {"id": 79, "logo_path": "/at4uYdwAAgNRKhZuuFX8ShKSybw.png", "name": "Village Roadshow Pictures", "origin_country": "US"}
        ],
        "production_countries": [
            {"iso_3166_1": "US", "name": "United States of America"}
        ],
        "release_date": "1999-03-30",
        "revenue": 463517383,
        "runtime": 136,
        "spoken_languages": [
            {"english_name": "English", "iso_639_1": "en", "name": "English"}
        ],
        "status": "Released",
        "tagline": "Believe the unbelievable.",
        "title": "The Matrix",
        "video": false,
        "vote_average": 8.2,
        "vote_count": 24000,
        "credits": {
            "cast": [
                {"adult": false, "gender": 2, "id": 6384, "known_for_department": "Acting", "name": "Keanu Reeves",
                 "original_name": "Keanu Reeves", "popularity": 40.5, "profile_path": "/4D0PpNI0kmP58hgrwGC3wCjxhnm.jpg",
                 "cast_id": 34, "character": "Neo", "credit_id": "52fe425bc3a36847f80181c1", "order": 0},
                {"adult": false, "gender": 2, "id": 2975, "known_for_department": "Acting", "name": "Laurence Fishburne",
                 "original_name": "Laurence Fishburne", "popularity": 20.1, "profile_path": null,
                 "cast_id": 35, "character": "Morpheus", "credit_id": "52fe425bc3a36847f801818d", "order": 1}
            ],
            "crew": [
                {"adult": false, "gender": 1, "id": 9340, "known_for_department": "Directing", "name": "Lana Wachowski",
                 "original_name": "Lana Wachowski", "popularity": 5.0, "profile_path": null,
                 "credit_id": "52fe425bc3a36847f8018207", "department": "Directing", "job": "Director"}
            ]
        }
    })
}

fn id() -> CatalogId {
    CatalogId::new(603).unwrap()
}

#[test]
fn every_table_gets_rows() {
    let t = normalize(id(), &matrix());
    assert_eq!(t.rows(TableKind::Cast).len(), 2);
    assert_eq!(t.rows(TableKind::Crew).len(), 1);
    assert_eq!(t.rows(TableKind::Collection).len(), 1);
    assert_eq!(t.rows(TableKind::Genres).len(), 2);
    assert_eq!(t.rows(TableKind::ProductionCompanies).len(), 1);
    assert_eq!(t.rows(TableKind::ProductionCountries).len(), 1);
    assert_eq!(t.rows(TableKind::SpokenLanguages).len(), 1);
    assert_eq!(t.rows(TableKind::Details).len(), 1);
}

#[test]
fn rows_are_tagged_with_catalog_id() {
    let t = normalize(id(), &matrix());
    for kind in TableKind::ALL {
        assert!(t.rows(kind).iter().all(|r| r.catalog_id == id()), "{kind}");
    }
}

#[test]
fn cells_follow_schema_types() {
    let t = normalize(id(), &matrix());
    let neo = &t.rows(TableKind::Cast)[0];
    assert_eq!(neo.get(TableKind::Cast, "character"), Some(&Cell::Text("Neo".into())));
    assert_eq!(neo.get(TableKind::Cast, "order"), Some(&Cell::Int(0)));

    let morpheus = &t.rows(TableKind::Cast)[1];
    assert_eq!(morpheus.get(TableKind::Cast, "profile_path"), None);

    let details = &t.rows(TableKind::Details)[0];
    assert_eq!(details.get(TableKind::Details, "budget"), Some(&Cell::Int(63_000_000)));
    assert_eq!(
        details.get(TableKind::Details, "release_date").map(ToString::to_string),
        Some("1999-03-30".to_string())
    );
    assert_eq!(details.get(TableKind::Details, "video"), Some(&Cell::Bool(false)));
}

#[test]
fn null_collection_emits_no_collection_row() {
    let mut doc = matrix();
    doc["belongs_to_collection"] = Value::Null;
    let t = normalize(id(), &doc);
    assert!(t.rows(TableKind::Collection).is_empty());
    assert_eq!(t.rows(TableKind::Cast).len(), 2);
    assert_eq!(t.rows(TableKind::Genres).len(), 2);
    assert_eq!(t.rows(TableKind::Details).len(), 1);
}

#[test]
fn malformed_genres_do_not_affect_other_sections() {
    let mut doc = matrix();
    doc["genres"] = json!("Action, Science Fiction");
    let t = normalize(id(), &doc);
    assert!(t.rows(TableKind::Genres).is_empty());
    assert_eq!(t.rows(TableKind::Cast).len(), 2);
    assert_eq!(t.rows(TableKind::Crew).len(), 1);
    assert_eq!(t.rows(TableKind::Details).len(), 1);
    let director = &t.rows(TableKind::Crew)[0];
    assert_eq!(director.get(TableKind::Crew, "job"), Some(&Cell::Text("Director".into())));
}

#[test]
fn missing_credits_leave_cast_and_crew_empty() {
    let mut doc = matrix();
    doc.as_object_mut().unwrap().remove("credits");
    let t = normalize(id(), &doc);
    assert!(t.rows(TableKind::Cast).is_empty());
    assert!(t.rows(TableKind::Crew).is_empty());
    assert_eq!(t.rows(TableKind::Genres).len(), 2);
}

#[test]
fn mistyped_field_is_left_empty() {
    let mut doc = matrix();
    doc["runtime"] = json!("136 min");
    doc["release_date"] = json!("");
    let t = normalize(id(), &doc);
    let details = &t.rows(TableKind::Details)[0];
    assert_eq!(details.get(TableKind::Details, "runtime"), None);
    assert_eq!(details.get(TableKind::Details, "release_date"), None);
    assert_eq!(details.get(TableKind::Details, "title"), Some(&Cell::Text("The Matrix".into())));
}

#[test]
fn non_object_list_entries_are_skipped() {
    let mut doc = matrix();
    doc["genres"] = json!([{"id": 28, "name": "Action"}, "Drama", null]);
    let t = normalize(id(), &doc);
    assert_eq!(t.rows(TableKind::Genres).len(), 1);
}

#[test]
fn non_object_document_yields_nothing() {
    assert!(normalize(id(), &json!([1, 2, 3])).is_empty());
}
