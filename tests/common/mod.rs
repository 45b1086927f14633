// Shared fixtures: small GeoPackages written with rusqlite into a temp dir.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use tempfile::TempDir;
use vesiopas::Geometry;

pub const SRS_WGS84: i32 = 4326;

/// Meters north of `lat` along a meridian, as a latitude delta.
pub fn north(meters: f64) -> f64 { (meters / vesiopas::proximity::EARTH_RADIUS_M).to_degrees() }

/// Axis-aligned square polygon around a center.
pub fn square(lng: f64, lat: f64, half: f64) -> Geometry {
    Geometry::polygon(vec![vec![
        (lng - half, lat - half),
        (lng + half, lat - half),
        (lng + half, lat + half),
        (lng - half, lat + half),
        (lng - half, lat - half),
    ]])
}

#[derive(Debug, Clone)]
pub struct AreaRow {
    pub fid: i64,
    pub restriction_type: String,
    pub magnitude: Option<String>,
    pub exception: Option<String>,
    pub valid_from: Option<String>,
    pub valid_until: Option<String>,
    pub geometry: Option<Geometry>,
}

impl AreaRow {
    pub fn new(fid: i64, restriction_type: &str, magnitude: &str, geometry: Geometry) -> Self {
        Self {
            fid,
            restriction_type: restriction_type.to_string(),
            magnitude: Some(magnitude.to_string()).filter(|m| !m.is_empty()),
            exception: None,
            valid_from: None,
            valid_until: None,
            geometry: Some(geometry),
        }
    }

    pub fn exception(mut self, text: &str) -> Self {
        self.exception = Some(text.to_string());
        self
    }
}

#[derive(Debug, Clone)]
pub struct SignRow {
    pub fid: i64,
    pub name_fi: Option<String>,
    pub type_class: Option<i64>,
    pub sign_type: Option<i64>,
    pub value: Option<f64>,
    pub geometry: Geometry,
}

impl SignRow {
    pub fn new(fid: i64, sign_type: i64, lng: f64, lat: f64) -> Self {
        Self {
            fid,
            name_fi: None,
            type_class: Some(11),
            sign_type: Some(sign_type),
            value: None,
            geometry: Geometry::point(lng, lat),
        }
    }
}

/// A temporary directory holding fixture GeoPackages.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self { Self { dir: tempfile::tempdir().unwrap() } }

    pub fn path(&self, name: &str) -> PathBuf { self.dir.path().join(name) }

    /// Write a restriction GeoPackage with the given table name.
    pub fn restrictions(&self, table: &str, rows: &[AreaRow]) -> PathBuf {
        let path = self.path(&format!("{table}.gpkg"));
        let conn = create_gpkg(&path, table);
        conn.execute_batch(&format!(
            "CREATE TABLE \"{table}\" (
                fid INTEGER PRIMARY KEY AUTOINCREMENT,
                geom BLOB,
                RAJOITUSTYYPPI TEXT,
                RAJOITUSTYYPIT TEXT,
                SUURUUS TEXT,
                POIKKEUS TEXT,
                \"LISÄTIETO\" TEXT,
                \"ALKUPÄIVÄMÄÄRÄ\" TEXT,
                \"LOPPUPÄIVÄMÄÄRÄ\" TEXT,
                JNRO INTEGER
            );"
        )).unwrap();
        for row in rows {
            conn.execute(
                &format!(
                    "INSERT INTO \"{table}\" (fid, geom, RAJOITUSTYYPPI, RAJOITUSTYYPIT, SUURUUS, POIKKEUS,
                        \"ALKUPÄIVÄMÄÄRÄ\", \"LOPPUPÄIVÄMÄÄRÄ\", JNRO)
                     VALUES (?1, ?2, ?3, '01', ?4, ?5, ?6, ?7, ?1)"
                ),
                params![
                    row.fid,
                    row.geometry.as_ref().map(|g| gpkg_wkb::encode_gpkg(g, SRS_WGS84, true)),
                    row.restriction_type,
                    row.magnitude,
                    row.exception,
                    row.valid_from,
                    row.valid_until,
                ],
            ).unwrap();
        }
        path
    }

    /// Write a sign GeoPackage with the given table name.
    pub fn signs(&self, table: &str, rows: &[SignRow]) -> PathBuf {
        let path = self.path(&format!("{table}.gpkg"));
        let conn = create_gpkg(&path, table);
        conn.execute_batch(&format!(
            "CREATE TABLE \"{table}\" (
                fid INTEGER PRIMARY KEY AUTOINCREMENT,
                geom BLOB,
                NIMIFI TEXT,
                NIMISV TEXT,
                VLMLAJITYYPPI INTEGER,
                VLMTYYPPI INTEGER,
                RAJOITUSARVO REAL
            );"
        )).unwrap();
        for row in rows {
            conn.execute(
                &format!(
                    "INSERT INTO \"{table}\" (fid, geom, NIMIFI, VLMLAJITYYPPI, VLMTYYPPI, RAJOITUSARVO)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
                ),
                params![
                    row.fid,
                    gpkg_wkb::encode_gpkg(&row.geometry, SRS_WGS84, false),
                    row.name_fi,
                    row.type_class,
                    row.sign_type,
                    row.value,
                ],
            ).unwrap();
        }
        path
    }
}

/// Create the GeoPackage metadata tables and register `table` as features.
pub fn create_gpkg(path: &Path, table: &str) -> Connection {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "PRAGMA application_id = 1196444487;
         CREATE TABLE gpkg_contents (
             table_name TEXT NOT NULL PRIMARY KEY,
             data_type TEXT NOT NULL,
             identifier TEXT,
             srs_id INTEGER
         );
         CREATE TABLE gpkg_geometry_columns (
             table_name TEXT NOT NULL,
             column_name TEXT NOT NULL,
             geometry_type_name TEXT NOT NULL,
             srs_id INTEGER NOT NULL,
             z TINYINT NOT NULL,
             m TINYINT NOT NULL
         );",
    ).unwrap();
    conn.execute(
        "INSERT INTO gpkg_contents VALUES (?1, 'features', ?1, ?2)",
        params![table, SRS_WGS84],
    ).unwrap();
    conn.execute(
        "INSERT INTO gpkg_geometry_columns VALUES (?1, 'geom', 'GEOMETRY', ?2, 0, 0)",
        params![table, SRS_WGS84],
    ).unwrap();
    conn
}
