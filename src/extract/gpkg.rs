//! GeoPackage container access: opening, table discovery and row scanning.

use std::io::Write;
use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, OptionalExtension};

use crate::error::{Error, Result};
use super::columns::Columns;

const SQLITE_MAGIC: &[u8; 16] = b"SQLite format 3\0";
const DEFAULT_GEOMETRY_COLUMN: &str = "geom";

/// A resolved features table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureTable {
    pub name: String,
    pub geometry_column: String,
    /// Declared INTEGER PRIMARY KEY, if any.
    pub primary_key: Option<String>,
}

/// Open an existing GeoPackage read-only.
pub fn open_read_only(path: &Path) -> Result<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    Ok(Connection::open_with_flags(path, flags)?)
}

/// Spill container bytes into a temporary file and run `f` on a read-only
/// connection to it. The file is removed when `f` returns.
pub(crate) fn with_bytes<T>(bytes: &[u8], f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
    if !bytes.starts_with(SQLITE_MAGIC) {
        return Err(Error::InvalidContainer(format!(
            "missing SQLite header ({} bytes supplied)", bytes.len()
        )));
    }
    let mut file = tempfile::Builder::new().prefix("vesiopas-").suffix(".gpkg").tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;

    let conn = open_read_only(file.path())?;
    let result = f(&conn);
    drop(conn);
    result
}

/// SQLite identifier quoting: wraps in double quotes and doubles embedded ones.
pub fn quote_ident(name: &str) -> String { format!("\"{}\"", name.replace('"', "\"\"")) }

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let found: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
            [name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Names of tables registered as features in `gpkg_contents`. A container
/// without `gpkg_contents` has none.
fn feature_tables(conn: &Connection) -> Result<Vec<String>> {
    if !table_exists(conn, "gpkg_contents")? {
        return Ok(Vec::new());
    }
    let mut stmt = conn.prepare("SELECT table_name FROM gpkg_contents WHERE data_type = 'features'")?;
    let names = stmt.query_map([], |row| row.get(0))?.collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(names)
}

fn geometry_column(conn: &Connection, table: &str) -> Result<String> {
    if !table_exists(conn, "gpkg_geometry_columns")? {
        return Ok(DEFAULT_GEOMETRY_COLUMN.to_string());
    }
    let column: Option<String> = conn
        .query_row(
            "SELECT column_name FROM gpkg_geometry_columns WHERE table_name = ?1",
            [table],
            |row| row.get(0),
        )
        .optional()?;
    Ok(column.unwrap_or_else(|| DEFAULT_GEOMETRY_COLUMN.to_string()))
}

fn primary_key(conn: &Connection, table: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", quote_ident(table)))?;
    let columns = stmt
        .query_map([], |row| Ok((row.get::<_, String>(1)?, row.get::<_, i64>(5)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(columns.into_iter().find(|(_, pk)| *pk == 1).map(|(name, _)| name))
}

/// Find the table for a dataset: the candidates in order, then the only
/// features table listed in `gpkg_contents`.
pub fn resolve_table(conn: &Connection, candidates: &[String]) -> Result<Option<FeatureTable>> {
    let mut name = None;
    for candidate in candidates {
        if table_exists(conn, candidate)? {
            name = Some(candidate.clone());
            break;
        }
    }
    if name.is_none() {
        let mut listed = feature_tables(conn)?;
        if listed.len() == 1 && table_exists(conn, &listed[0])? {
            name = listed.pop();
        }
    }
    let Some(name) = name else { return Ok(None) };

    Ok(Some(FeatureTable {
        geometry_column: geometry_column(conn, &name)?,
        primary_key: primary_key(conn, &name)?,
        name,
    }))
}

/// Read every row of `table` as raw values, along with its column names.
pub(crate) fn read_rows(conn: &Connection, table: &FeatureTable) -> Result<(Columns, Vec<Vec<Value>>)> {
    let mut stmt = conn.prepare(&format!("SELECT * FROM {}", quote_ident(&table.name)))?;
    let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let width = names.len();

    let rows = stmt
        .query_map([], |row| (0..width).map(|i| row.get::<_, Value>(i)).collect::<rusqlite::Result<Vec<Value>>>())?
        .collect::<rusqlite::Result<Vec<Vec<Value>>>>()?;
    Ok((Columns::new(names), rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_gpkg(tables: &[&str], contents: &[&str]) -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE gpkg_contents (table_name TEXT PRIMARY KEY, data_type TEXT NOT NULL);
             CREATE TABLE gpkg_geometry_columns (table_name TEXT, column_name TEXT);",
        ).unwrap();
        for table in tables {
            conn.execute_batch(&format!("CREATE TABLE {table} (fid INTEGER PRIMARY KEY, shape BLOB);")).unwrap();
            conn.execute("INSERT INTO gpkg_geometry_columns VALUES (?1, 'shape')", [table]).unwrap();
        }
        for table in contents {
            conn.execute("INSERT INTO gpkg_contents VALUES (?1, 'features')", [table]).unwrap();
        }
        conn
    }

    #[test]
    fn candidates_are_tried_in_order() {
        let conn = memory_gpkg(&["vesiliikennemerkit", "other"], &["vesiliikennemerkit", "other"]);
        let candidates = vec!["missing".to_string(), "vesiliikennemerkit".to_string()];
        let table = resolve_table(&conn, &candidates).unwrap().unwrap();
        assert_eq!(table.name, "vesiliikennemerkit");
        assert_eq!(table.geometry_column, "shape");
        assert_eq!(table.primary_key.as_deref(), Some("fid"));
    }

    #[test]
    fn single_features_table_is_the_fallback() {
        let conn = memory_gpkg(&["export_2024"], &["export_2024"]);
        let table = resolve_table(&conn, &["rajoitusalue_a".to_string()]).unwrap().unwrap();
        assert_eq!(table.name, "export_2024");

        let ambiguous = memory_gpkg(&["a", "b"], &["a", "b"]);
        assert!(resolve_table(&ambiguous, &["rajoitusalue_a".to_string()]).unwrap().is_none());
    }

    #[test]
    fn non_sqlite_bytes_are_rejected() {
        let err = with_bytes(b"PK\x03\x04 not a database", |_| Ok(())).unwrap_err();
        assert!(matches!(err, Error::InvalidContainer(_)));
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident("vesiliikennemerkit"), "\"vesiliikennemerkit\"");
        assert_eq!(quote_ident("odd\"name"), "\"odd\"\"name\"");

        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE \"odd\"\"name\" (\"geo\"\"m\" BLOB); INSERT INTO \"odd\"\"name\" VALUES (x'01');").unwrap();
        let sql = format!("SELECT {} FROM {} LIMIT 1", quote_ident("geo\"m"), quote_ident("odd\"name"));
        let blob: Vec<u8> = conn.query_row(&sql, [], |row| row.get(0)).unwrap();
        assert_eq!(blob, vec![1]);
    }
}
