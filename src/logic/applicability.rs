use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::model::{ApplicableRestriction, BoatPosition, Filters, RestrictionArea};
use super::collate::finnish_cmp;
use super::validity::is_within_validity;

/// Exception text marker for rules that exempt leisure boating.
pub const LEISURE_MARKER: &str = "huvi";

/// Restriction type marker for rules aimed at personal watercraft.
pub const PERSONAL_WATERCRAFT_MARKER: &str = "vesiskootterilla";

fn contains_ci(haystack: &str, needle: &str) -> bool { haystack.to_lowercase().contains(needle) }

/// Whether one candidate applies at the position: containment, validity
/// window, then the two category filters.
pub fn is_applicable(area: &RestrictionArea, position: &BoatPosition, filters: &Filters, now: DateTime<Utc>) -> bool {
    if !area.geometry.covers(position.coord()) {
        return false;
    }
    if !is_within_validity(area, now) {
        return false;
    }
    if !filters.professional_traffic_allowed
        && area.exception.as_deref().is_some_and(|text| contains_ci(text, LEISURE_MARKER))
    {
        return false;
    }
    if !filters.personal_watercraft_allowed && contains_ci(&area.restriction_type, PERSONAL_WATERCRAFT_MARKER) {
        return false;
    }
    true
}

/// Primary first, then numeric limits ascending, then unlimited rules by
/// type label in Finnish order.
fn compare(a: &ApplicableRestriction, b: &ApplicableRestriction) -> Ordering {
    b.is_primary.cmp(&a.is_primary).then_with(|| match (a.speed_limit_kmh, b.speed_limit_kmh) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => finnish_cmp(&a.restriction_type, &b.restriction_type),
    })
}

/// Filter candidates down to the restrictions that apply at `position`,
/// mark the primary one and sort.
///
/// The lowest numeric limit is primary; on ties the earliest candidate wins.
/// The sort is stable, so equal keys keep candidate order.
pub fn evaluate(
    candidates: &[Arc<RestrictionArea>],
    position: &BoatPosition,
    filters: &Filters,
    now: DateTime<Utc>,
) -> Vec<ApplicableRestriction> {
    let mut applicable: Vec<ApplicableRestriction> = candidates.iter()
        .filter(|area| is_applicable(area, position, filters, now))
        .map(|area| ApplicableRestriction::new(Arc::clone(area)))
        .collect();

    let mut primary: Option<(usize, u32)> = None;
    for (i, restriction) in applicable.iter().enumerate() {
        if let Some(limit) = restriction.speed_limit_kmh {
            if primary.is_none_or(|(_, lowest)| limit < lowest) {
                primary = Some((i, limit));
            }
        }
    }
    if let Some((i, _)) = primary {
        applicable[i].is_primary = true;
    }

    applicable.sort_by(compare);
    applicable
}
