mod common;

use common::{create_gpkg, square, AreaRow, Fixture, SignRow};
use rusqlite::params;
use vesiopas::{extract_bytes, extract_path, Error, ExtractOptions, DatasetKind, Geometry, GeometryKind};

#[test]
fn restrictions_are_decoded_with_attributes() {
    let fixture = Fixture::new();
    let lake = Geometry::multi_polygon(vec![
        vec![vec![(25.0, 60.0), (25.1, 60.0), (25.1, 60.1), (25.0, 60.0)]],
        vec![vec![(25.3, 60.2), (25.4, 60.2), (25.4, 60.3), (25.3, 60.2)]],
    ]);
    let path = fixture.restrictions("rajoitusalue_a", &[
        AreaRow::new(12, "Nopeusrajoitus", "10 km/h", square(25.0, 60.0, 0.01)).exception(""),
        AreaRow::new(13, "Aallokon aiheuttamisen kielto", "", lake),
    ]);

    let areas = extract_path(&path, DatasetKind::Restriction, &ExtractOptions::default())
        .unwrap()
        .into_restrictions()
        .unwrap();
    assert_eq!(areas.len(), 2);

    let speed = &areas[0];
    assert_eq!(speed.id, 12);
    assert_eq!(speed.speed_limit_kmh, Some(10));
    assert_eq!(speed.exception.as_deref(), Some(""));
    assert_eq!(speed.restriction_codes, "01");
    assert_eq!(speed.sequence, Some(12));
    assert_eq!(speed.geometry.kind(), GeometryKind::Polygon);

    let waves = &areas[1];
    assert_eq!(waves.speed_limit_kmh, None);
    assert_eq!(waves.geometry.kind(), GeometryKind::MultiPolygon);
    assert_eq!(waves.bbox, [25.0, 60.0, 25.4, 60.3]);
}

#[test]
fn bytes_and_path_agree() {
    let fixture = Fixture::new();
    let path = fixture.signs("vesiliikennemerkit", &[SignRow::new(1, 6, 25.0, 60.0)]);
    let from_path = extract_path(&path, DatasetKind::Sign, &ExtractOptions::default()).unwrap();
    let from_bytes = extract_bytes(&std::fs::read(&path).unwrap(), DatasetKind::Sign, &ExtractOptions::default()).unwrap();
    assert_eq!(from_path, from_bytes);
}

#[test]
fn signs_get_icon_keys_and_default_codes() {
    let fixture = Fixture::new();
    let mut limit = SignRow::new(1, 11, 25.0, 60.0);
    limit.value = Some(50.0);
    limit.name_fi = Some("Nopeusrajoitus".into());
    let mut bare = SignRow::new(2, 6, 25.1, 60.1);
    bare.type_class = None;
    bare.sign_type = None;

    let path = fixture.signs("vesiliikennemerkit", &[limit, bare]);
    let signs = extract_path(&path, DatasetKind::Sign, &ExtractOptions::default())
        .unwrap()
        .into_signs()
        .unwrap();

    assert_eq!(signs[0].icon_key, "11_50");
    assert_eq!(signs[0].restriction_value, Some(50.0));
    assert_eq!(signs[0].display_name(), "Nopeusrajoitus");
    assert_eq!((signs[1].type_class, signs[1].sign_type), (0, 0));
    assert_eq!(signs[1].icon_key, "0");
    assert_eq!(signs[1].display_name(), "Merkki 0");
}

#[test]
fn single_features_table_is_used_when_name_differs() {
    let fixture = Fixture::new();
    let path = fixture.restrictions("rajoitusalue_a_2024", &[
        AreaRow::new(1, "Nopeusrajoitus", "5 km/h", square(25.0, 60.0, 0.01)),
    ]);
    let dataset = extract_path(&path, DatasetKind::Restriction, &ExtractOptions::default()).unwrap();
    assert_eq!(dataset.len(), 1);
}

#[test]
fn wrong_container_and_missing_table() {
    let fixture = Fixture::new();
    let options = ExtractOptions::default();

    // The lone features table of a sign container holds points, not polygons.
    let path = fixture.signs("vesiliikennemerkit", &[SignRow::new(1, 6, 25.0, 60.0)]);
    let dataset = extract_path(&path, DatasetKind::Restriction, &options);
    assert!(matches!(dataset, Err(Error::UnexpectedGeometry { found: GeometryKind::Point, .. })));

    // Registered in gpkg_contents but never created.
    let conn = create_gpkg(&fixture.path("empty.gpkg"), "unused");
    drop(conn);
    let err = extract_path(fixture.path("empty.gpkg"), DatasetKind::Sign, &options).unwrap_err();
    assert!(matches!(err, Error::MissingTable { kind: DatasetKind::Sign, .. }), "{err}");
}

#[test]
fn null_geometry_aborts_the_dataset() {
    let fixture = Fixture::new();
    let mut broken = AreaRow::new(2, "Nopeusrajoitus", "10 km/h", square(25.0, 60.0, 0.01));
    broken.geometry = None;
    let path = fixture.restrictions("rajoitusalue_a", &[
        AreaRow::new(1, "Nopeusrajoitus", "10 km/h", square(25.0, 60.0, 0.01)),
        broken,
    ]);

    let err = extract_path(&path, DatasetKind::Restriction, &ExtractOptions::default()).unwrap_err();
    assert!(matches!(err, Error::MalformedGeometry { row: 1, .. }), "{err}");
}

#[test]
fn empty_polygon_aborts_the_dataset() {
    let fixture = Fixture::new();
    let path = fixture.restrictions("rajoitusalue_a", &[
        AreaRow::new(1, "Nopeusrajoitus", "10 km/h", Geometry::polygon(Vec::new())),
    ]);
    let err = extract_path(&path, DatasetKind::Restriction, &ExtractOptions::default()).unwrap_err();
    assert!(err.is_geometry_error(), "{err}");
}

#[test]
fn corrupt_blob_aborts_the_dataset() {
    let fixture = Fixture::new();
    let path = fixture.signs("vesiliikennemerkit", &[SignRow::new(1, 6, 25.0, 60.0)]);
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute("UPDATE vesiliikennemerkit SET geom = ?1", params![vec![b'G', b'P', 0u8, 0x0f]]).unwrap();
    drop(conn);

    let err = extract_path(&path, DatasetKind::Sign, &ExtractOptions::default()).unwrap_err();
    assert!(matches!(err, Error::MalformedGeometry { .. }), "{err}");
}

#[test]
fn ids_fall_back_to_id_column_then_row_index() {
    let fixture = Fixture::new();
    let path = fixture.path("plain.gpkg");
    let conn = create_gpkg(&path, "vesiliikennemerkit");
    conn.execute_batch("CREATE TABLE vesiliikennemerkit (ID TEXT, geom BLOB, VLMTYYPPI INTEGER);").unwrap();
    let blob = gpkg_wkb::encode_gpkg(&Geometry::point(25.0, 60.0), 4326, false);
    for id in [Some("77"), Some("abc"), None] {
        conn.execute("INSERT INTO vesiliikennemerkit VALUES (?1, ?2, 6)", params![id, blob]).unwrap();
    }
    drop(conn);

    let signs = extract_path(&path, DatasetKind::Sign, &ExtractOptions::default())
        .unwrap()
        .into_signs()
        .unwrap();
    let ids: Vec<i64> = signs.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![77, 1, 2]);
}

#[test]
fn non_geopackage_bytes_are_rejected() {
    let err = extract_bytes(b"<html>502 Bad Gateway</html>", DatasetKind::Sign, &ExtractOptions::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidContainer(_)));
}
