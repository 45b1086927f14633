use std::ops::Deref;
use std::sync::Arc;

use gpkg_wkb::Geometry;
use serde::{Deserialize, Serialize};

/// A restriction polygon from the `rajoitusalue_a` dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestrictionArea {
    pub id: i64,
    /// Human-readable restriction type (RAJOITUSTYYPPI), e.g. "Nopeusrajoitus".
    pub restriction_type: String,
    /// Raw restriction code list (RAJOITUSTYYPIT), e.g. "01, 02".
    pub restriction_codes: String,
    /// First run of digits in the magnitude text.
    pub speed_limit_kmh: Option<u32>,
    /// Free-text magnitude (SUURUUS).
    pub magnitude: String,
    pub length: Option<String>,
    /// Exception text (POIKKEUS).
    pub exception: Option<String>,
    pub note: Option<String>,
    pub decision_status: Option<String>,
    pub valid_from: Option<String>,
    pub valid_until: Option<String>,
    pub record_number: Option<String>,
    pub data_source: Option<String>,
    pub sequence: Option<i64>,
    pub place_name: Option<String>,
    pub detached_on: Option<String>,
    pub geometry: Geometry,
    /// `[min_x, min_y, max_x, max_y]` over every ring.
    pub bbox: [f64; 4],
}

impl RestrictionArea {
    /// Short label for lists and popups.
    pub fn label(&self) -> String {
        match self.speed_limit_kmh {
            Some(limit) => format!("Nopeusrajoitus {limit} km/h"),
            None if !self.restriction_type.trim().is_empty() => self.restriction_type.clone(),
            None => "Rajoitus".to_string(),
        }
    }

    /// Numeric codes of the raw restriction code list.
    pub fn type_codes(&self) -> Vec<u32> { parse_type_codes(&self.restriction_codes) }
}

/// Parse a comma separated code list such as `"01, 02"`, skipping blanks and
/// non-numeric entries.
pub fn parse_type_codes(codes: &str) -> Vec<u32> {
    codes.split(',')
        .filter_map(|code| code.trim().parse().ok())
        .collect()
}

/// A restriction that applies at the evaluated position.
///
/// The area is a shared immutable handle; callers wanting to edit it get a
/// private copy through [`Arc::make_mut`], the index is never affected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicableRestriction {
    #[serde(flatten)]
    pub area: Arc<RestrictionArea>,
    pub is_primary: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl ApplicableRestriction {
    pub fn new(area: Arc<RestrictionArea>) -> Self { Self { area, is_primary: false, distance: None } }
}

impl Deref for ApplicableRestriction {
    type Target = RestrictionArea;

    fn deref(&self) -> &Self::Target { &self.area }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(restriction_type: &str, speed_limit_kmh: Option<u32>) -> RestrictionArea {
        RestrictionArea {
            id: 1,
            restriction_type: restriction_type.to_string(),
            restriction_codes: "01, 02,,x".to_string(),
            speed_limit_kmh,
            magnitude: String::new(),
            length: None,
            exception: None,
            note: None,
            decision_status: None,
            valid_from: None,
            valid_until: None,
            record_number: None,
            data_source: None,
            sequence: None,
            place_name: None,
            detached_on: None,
            geometry: Geometry::polygon(vec![vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]]),
            bbox: [0.0, 0.0, 1.0, 1.0],
        }
    }

    #[test]
    fn label_prefers_speed_limit() {
        assert_eq!(area("Nopeusrajoitus", Some(10)).label(), "Nopeusrajoitus 10 km/h");
        assert_eq!(area("Aallokon aiheuttamisen kielto", None).label(), "Aallokon aiheuttamisen kielto");
        assert_eq!(area(" ", None).label(), "Rajoitus");
    }

    #[test]
    fn type_codes_skip_garbage() {
        assert_eq!(area("", None).type_codes(), vec![1, 2]);
    }

    #[test]
    fn serializes_flat_with_geojson_geometry() {
        let applicable = ApplicableRestriction { is_primary: true, ..ApplicableRestriction::new(Arc::new(area("Nopeusrajoitus", Some(10)))) };
        let json = serde_json::to_value(&applicable).unwrap();
        assert_eq!(json["speedLimitKmh"], 10);
        assert_eq!(json["isPrimary"], true);
        assert_eq!(json["geometry"]["type"], "Polygon");
        assert!(json.get("distance").is_none());
    }
}
