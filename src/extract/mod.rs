//! Typed feature extraction from GeoPackage containers.

mod columns;
mod gpkg;
mod restriction;
mod sign;
mod worker;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use gpkg_wkb::Geometry;
use rusqlite::types::Value;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::config::ExtractOptions;
use crate::error::{Error, Result};
use crate::model::{RestrictionArea, TrafficSign};
use columns::{type_name, Columns, Field, Resolved};

pub use gpkg::{open_read_only, quote_ident, resolve_table, FeatureTable};
pub use worker::{spawn_decode, DecodeJob};

/// The two datasets the application consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    /// Restriction polygons (`rajoitusalue_a`).
    Restriction,
    /// Traffic sign points (`vesiliikennemerkit`).
    Sign,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 2] = [DatasetKind::Restriction, DatasetKind::Sign];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Restriction => "restriction",
            DatasetKind::Sign => "sign",
        }
    }

    /// File name used by the published downloads.
    pub fn file_name(&self) -> &'static str {
        match self {
            DatasetKind::Restriction => "rajoitusalue_a.gpkg",
            DatasetKind::Sign => "vesiliikennemerkit.gpkg",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for DatasetKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "restriction" | "restrictions" | "rajoitusalue_a" => Ok(DatasetKind::Restriction),
            "sign" | "signs" | "vesiliikennemerkit" => Ok(DatasetKind::Sign),
            other => Err(format!("unknown dataset kind: {other}")),
        }
    }
}

/// A decoded dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Dataset {
    Restrictions(Vec<RestrictionArea>),
    Signs(Vec<TrafficSign>),
}

impl Dataset {
    pub fn kind(&self) -> DatasetKind {
        match self {
            Dataset::Restrictions(_) => DatasetKind::Restriction,
            Dataset::Signs(_) => DatasetKind::Sign,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Dataset::Restrictions(areas) => areas.len(),
            Dataset::Signs(signs) => signs.len(),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn into_restrictions(self) -> Option<Vec<RestrictionArea>> {
        match self {
            Dataset::Restrictions(areas) => Some(areas),
            Dataset::Signs(_) => None,
        }
    }

    pub fn into_signs(self) -> Option<Vec<TrafficSign>> {
        match self {
            Dataset::Signs(signs) => Some(signs),
            Dataset::Restrictions(_) => None,
        }
    }
}

const SECONDARY_ID: Field = Field(&["id", "ID"]);
const FALLBACK_PRIMARY_KEY: &str = "fid";

/// Identifier columns: primary key (or `fid`), then `id`, then the row index.
pub(crate) struct RowIds {
    primary: Resolved,
    secondary: Resolved,
}

impl RowIds {
    pub(crate) fn new(columns: &Columns, table: &FeatureTable) -> Self {
        let primary = table.primary_key.as_deref().unwrap_or(FALLBACK_PRIMARY_KEY);
        Self { primary: columns.resolve_name(primary), secondary: columns.resolve(SECONDARY_ID) }
    }

    /// Non-numeric values fall through to the next tier.
    pub(crate) fn id(&self, row: &[Value], index: usize) -> i64 {
        self.primary.int(row)
            .or_else(|| self.secondary.int(row))
            .unwrap_or(index as i64)
    }
}

/// Decode the geometry cell of a row. NULL, non-blob and undecodable values
/// are errors.
pub(crate) fn row_geometry(column: &Resolved, table: &str, index: usize, row: &[Value]) -> Result<Geometry> {
    if column.is_empty() {
        return Err(Error::malformed(table, index, "geometry column not found"));
    }
    match column.value(row) {
        Some(Value::Blob(bytes)) => gpkg_wkb::decode(bytes).map_err(|err| Error::from_wkb(err, table, index)),
        Some(other) => Err(Error::malformed(table, index, format!("geometry cell holds {}", type_name(other)))),
        None => Err(Error::malformed(table, index, "geometry is NULL")),
    }
}

fn table_for(conn: &Connection, kind: DatasetKind, options: &ExtractOptions) -> Result<FeatureTable> {
    let candidates = options.tables(kind);
    resolve_table(conn, candidates)?.ok_or_else(|| Error::MissingTable {
        kind,
        tried: candidates.join(", "),
    })
}

/// Read the restriction dataset from an open container.
pub fn read_restrictions(conn: &Connection, options: &ExtractOptions) -> Result<Vec<RestrictionArea>> {
    let table = table_for(conn, DatasetKind::Restriction, options)?;
    let areas = restriction::read(conn, &table)?;
    tracing::info!(table = %table.name, count = areas.len(), "decoded restriction areas");
    Ok(areas)
}

/// Read the sign dataset from an open container.
pub fn read_signs(conn: &Connection, options: &ExtractOptions) -> Result<Vec<TrafficSign>> {
    let table = table_for(conn, DatasetKind::Sign, options)?;
    let signs = sign::read(conn, &table)?;
    tracing::info!(table = %table.name, count = signs.len(), "decoded traffic signs");
    Ok(signs)
}

/// Read one dataset from an open container.
pub fn extract(conn: &Connection, kind: DatasetKind, options: &ExtractOptions) -> Result<Dataset> {
    match kind {
        DatasetKind::Restriction => read_restrictions(conn, options).map(Dataset::Restrictions),
        DatasetKind::Sign => read_signs(conn, options).map(Dataset::Signs),
    }
}

/// Read one dataset from raw GeoPackage bytes.
pub fn extract_bytes(bytes: &[u8], kind: DatasetKind, options: &ExtractOptions) -> Result<Dataset> {
    gpkg::with_bytes(bytes, |conn| extract(conn, kind, options))
}

/// Read one dataset from a GeoPackage file.
pub fn extract_path(path: impl AsRef<Path>, kind: DatasetKind, options: &ExtractOptions) -> Result<Dataset> {
    let conn = open_read_only(path.as_ref())?;
    extract(&conn, kind, options)
}
