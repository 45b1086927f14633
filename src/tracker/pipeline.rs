use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::TrackerConfig;
use crate::index::SpatialIndex;
use crate::logic::{applicability, proximity};
use crate::model::{ApplicableRestriction, BoatPosition, Filters, NearbySign};

/// Both result lists for one accepted sample, published together.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub position: BoatPosition,
    pub restrictions: Vec<ApplicableRestriction>,
    pub signs: Vec<NearbySign>,
    pub evaluated_at: DateTime<Utc>,
}

impl Evaluation {
    /// The primary restriction, if any numeric limit applies.
    pub fn primary(&self) -> Option<&ApplicableRestriction> { self.restrictions.iter().find(|r| r.is_primary) }
}

/// Evaluate one position against an index: area query, applicability, sign
/// query, proximity, truncation.
pub fn evaluate_position(
    index: &SpatialIndex,
    position: &BoatPosition,
    filters: &Filters,
    config: &TrackerConfig,
    now: DateTime<Utc>,
) -> Evaluation {
    let (lng, lat) = (position.longitude, position.latitude);

    let areas = index.candidate_areas(lng, lat, config.area_buffer_deg);
    let restrictions = applicability::evaluate(&areas, position, filters, now);

    let candidates = index.nearby_signs_in_radius(lng, lat, f64::from(filters.nearby_radius_meters));
    let mut signs = proximity::evaluate(&candidates, position, filters, &config.icons);
    signs.truncate(config.max_signs);

    tracing::debug!(
        lat, lng,
        candidate_areas = areas.len(),
        restrictions = restrictions.len(),
        candidate_signs = candidates.len(),
        signs = signs.len(),
        "evaluated position"
    );
    Evaluation { position: *position, restrictions, signs, evaluated_at: now }
}
