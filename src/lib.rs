#![doc = "Vesiopas public API: GeoPackage waterway data in, applicable restrictions and nearby signs out"]
mod config;
mod error;
mod extract;
mod index;
mod logic;
mod model;
mod source;
mod tracker;

#[doc(inline)]
pub use config::{ExtractOptions, IconConfig, Settings, TrackerConfig};

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use extract::{
    extract, extract_bytes, extract_path, open_read_only, quote_ident, read_restrictions, read_signs, resolve_table,
    spawn_decode, Dataset, DatasetKind, DecodeJob, FeatureTable,
};

#[doc(inline)]
pub use index::{SpatialIndex, METERS_PER_DEG_LAT, METERS_PER_DEG_LNG};

pub use logic::{applicability, finnish_cmp, haversine_m, is_within_validity, parse_timestamp, proximity};

#[doc(inline)]
pub use model::{
    format_distance, icon_key, parse_type_codes, unique_sign_types, ApplicableRestriction, BoatPosition, Filters,
    NearbySign, RestrictionArea, TrafficSign,
};

#[doc(inline)]
pub use source::{DatasetSource, DiskSource, MemSource};

#[doc(inline)]
pub use tracker::{evaluate_position, refresh, Evaluation, LoadSummary, Outcome, Throttle, Tracker, TrackerState};

pub use gpkg_wkb::{Geometry, GeometryKind};
