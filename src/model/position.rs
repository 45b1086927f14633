use chrono::{DateTime, Utc};
use geo::Coord;
use serde::{Deserialize, Serialize};

/// One location sample from the positioning source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoatPosition {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
}

impl BoatPosition {
    pub fn new(latitude: f64, longitude: f64, timestamp_ms: i64) -> Self {
        Self { latitude, longitude, accuracy: None, heading: None, speed: None, timestamp_ms }
    }

    /// Position as an `(x, y)` = `(longitude, latitude)` coordinate.
    #[inline]
    pub fn coord(&self) -> Coord<f64> { Coord { x: self.longitude, y: self.latitude } }

    /// Sample time, clamped to the epoch when out of chrono's range.
    pub fn time(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp_ms).unwrap_or(DateTime::UNIX_EPOCH)
    }
}
