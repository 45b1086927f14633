//! Decoder for the geometry blobs stored in GeoPackage feature tables.
//!
//! A GeoPackage geometry column holds standard WKB, usually prefixed with the
//! GeoPackage binary header (`"GP"` magic, version, flags, SRS id and an
//! optional envelope). [`decode`] accepts both forms and auto-detects the
//! header. Only the geometry kinds found in waterway survey data are
//! supported: Point, Polygon and MultiPolygon.
//!
//! ```
//! use gpkg_wkb::{decode, encode_wkb, ByteOrder, Geometry};
//!
//! let point = Geometry::point(24.95, 60.17);
//! let bytes = encode_wkb(&point, ByteOrder::LittleEndian);
//! assert_eq!(decode(&bytes).unwrap(), point);
//! ```

mod error;
mod geometry;
mod header;
mod read;
mod write;

pub use error::{WkbError, WkbResult};
pub use geometry::{Geometry, GeometryKind};
pub use header::{Envelope, GpkgHeader};
pub use read::{decode, decode_wkb};
pub use write::{encode_gpkg, encode_wkb, ByteOrder};
