mod entry;
mod spatial;

pub use spatial::SpatialIndex;

/// Meters per degree of latitude, used to size sign query windows.
pub const METERS_PER_DEG_LAT: f64 = 111_000.0;

/// Meters per degree of longitude near 60°N. A fixed approximation: the
/// window is a pre-filter and callers check exact distances.
pub const METERS_PER_DEG_LNG: f64 = 55_000.0;
