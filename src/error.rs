use gpkg_wkb::{GeometryKind, WkbError};

use crate::extract::DatasetKind;

/// Errors raised while loading datasets.
///
/// Evaluation itself never fails; every variant here comes from decoding,
/// reading the SQLite container, or fetching dataset bytes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed geometry in {table} row {row}: {reason}")]
    MalformedGeometry { table: String, row: usize, reason: String },

    #[error("unsupported geometry type code {code} in {table} row {row}")]
    UnsupportedGeometryType { table: String, row: usize, code: u32 },

    #[error("{table} row {row} has a {found} geometry, expected {expected}")]
    UnexpectedGeometry { table: String, row: usize, expected: &'static str, found: GeometryKind },

    #[error("{kind} dataset unavailable: {reason}")]
    DatasetUnavailable { kind: DatasetKind, reason: String },

    #[error("no feature table for the {kind} dataset (tried {tried})")]
    MissingTable { kind: DatasetKind, tried: String },

    #[error("not a GeoPackage container: {0}")]
    InvalidContainer(String),

    #[error("decode worker for the {0} dataset panicked")]
    WorkerPanicked(DatasetKind),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// Attach table/row context to a geometry decoding failure.
    pub(crate) fn from_wkb(err: WkbError, table: &str, row: usize) -> Self {
        match err {
            WkbError::Malformed { offset, reason } => Self::MalformedGeometry {
                table: table.to_string(),
                row,
                reason: format!("{reason} (byte {offset})"),
            },
            WkbError::UnsupportedGeometryType(code) => Self::UnsupportedGeometryType {
                table: table.to_string(),
                row,
                code,
            },
        }
    }

    pub(crate) fn malformed(table: &str, row: usize, reason: impl Into<String>) -> Self {
        Self::MalformedGeometry { table: table.to_string(), row, reason: reason.into() }
    }

    /// True for failures of the geometry decoder itself.
    pub fn is_geometry_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedGeometry { .. } | Self::UnsupportedGeometryType { .. } | Self::UnexpectedGeometry { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
