use std::collections::BTreeSet;
use std::ops::Deref;
use std::sync::Arc;

use geo::Coord;
use gpkg_wkb::Geometry;
use serde::{Deserialize, Serialize};

/// A traffic sign point from the `vesiliikennemerkit` dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficSign {
    pub id: i64,
    pub name_fi: Option<String>,
    pub name_sv: Option<String>,
    /// Sign class code (VLMLAJITYYPPI).
    pub type_class: i64,
    /// Sign type code (VLMTYYPPI), the value the type filter matches on.
    pub sign_type: i64,
    /// Numeric value shown on the sign (RAJOITUSARVO), e.g. a speed limit.
    pub restriction_value: Option<f64>,
    pub plate_text_fi: Option<String>,
    pub plate_text_sv: Option<String>,
    pub location_fi: Option<String>,
    pub location_sv: Option<String>,
    pub fairway_kind: Option<String>,
    pub decision: Option<String>,
    pub effect_area: Option<String>,
    pub pata_type: Option<i64>,
    pub pako_type: Option<i64>,
    pub register_number: Option<i64>,
    pub measured_on: Option<String>,
    pub fairways: Option<String>,
    pub detached_on: Option<String>,
    pub geometry: Geometry,
    /// `"<class>_<value>"` or `"<class>"`, see [`icon_key`].
    pub icon_key: String,
}

impl TrafficSign {
    /// Sign location as `(longitude, latitude)`.
    #[inline]
    pub fn coord(&self) -> Option<Coord<f64>> { self.geometry.as_point().map(|point| point.0) }

    pub fn display_name(&self) -> String {
        [&self.name_fi, &self.name_sv]
            .into_iter()
            .flatten()
            .find(|name| !name.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| format!("Merkki {}", self.type_class))
    }
}

/// Icon key for a sign class and optional value: `11` + `Some(50.0)` → `"11_50"`.
pub fn icon_key(type_class: i64, restriction_value: Option<f64>) -> String {
    match restriction_value {
        Some(value) => format!("{type_class}_{value}"),
        None => type_class.to_string(),
    }
}

/// Sorted distinct sign type codes, for building type filters.
pub fn unique_sign_types<'a>(signs: impl IntoIterator<Item = &'a TrafficSign>) -> Vec<i64> {
    signs.into_iter()
        .map(|sign| sign.sign_type)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// `"N m"` under a kilometer, `"x.y km"` otherwise.
pub fn format_distance(meters: u32) -> String {
    if meters < 1000 {
        format!("{meters} m")
    } else {
        format!("{:.1} km", meters as f64 / 1000.0)
    }
}

/// A sign within the nearby radius of the evaluated position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbySign {
    #[serde(flatten)]
    pub sign: Arc<TrafficSign>,
    /// Great-circle distance, rounded to whole meters.
    pub distance: u32,
    pub icon_url: String,
}

impl NearbySign {
    pub fn distance_label(&self) -> String { format_distance(self.distance) }
}

impl Deref for NearbySign {
    type Target = TrafficSign;

    fn deref(&self) -> &Self::Target { &self.sign }
}
