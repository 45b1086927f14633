use std::sync::Arc;

use geo::Coord;

use crate::config::IconConfig;
use crate::model::{BoatPosition, Filters, NearbySign, TrafficSign};

/// Mean Earth radius in meters (IUGG).
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Great-circle distance in meters between two `(lng, lat)` coordinates.
pub fn haversine_m(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let (lat1, lat2) = (a.y.to_radians(), b.y.to_radians());
    let d_lat = (b.y - a.y).to_radians();
    let d_lng = (b.x - a.x).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Keep candidates of a selected type within the radius (inclusive), attach
/// rounded distances and icon URLs, nearest first. Equal distances keep
/// candidate order.
pub fn evaluate(
    candidates: &[Arc<TrafficSign>],
    position: &BoatPosition,
    filters: &Filters,
    icons: &IconConfig,
) -> Vec<NearbySign> {
    let here = position.coord();
    let radius = f64::from(filters.nearby_radius_meters);

    let mut nearby: Vec<NearbySign> = candidates.iter()
        .filter(|sign| filters.shows_sign_type(sign.sign_type))
        .filter_map(|sign| {
            let distance = haversine_m(here, sign.coord()?);
            (distance <= radius).then(|| NearbySign {
                sign: Arc::clone(sign),
                distance: distance.round() as u32,
                icon_url: icons.url(&sign.icon_key),
            })
        })
        .collect();

    nearby.sort_by_key(|sign| sign.distance);
    nearby
}
