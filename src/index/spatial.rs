use std::sync::Arc;

use ahash::AHashMap;
use rstar::{RTree, AABB};

use crate::model::{unique_sign_types, RestrictionArea, TrafficSign};
use super::entry::IndexEntry;
use super::{METERS_PER_DEG_LAT, METERS_PER_DEG_LNG};

/// Dual R-tree over restriction polygons (by bbox) and sign points, with
/// id → feature maps the tree entries resolve through.
#[derive(Debug)]
pub struct SpatialIndex {
    area_tree: RTree<IndexEntry>,
    sign_tree: RTree<IndexEntry>,
    areas: AHashMap<i64, Arc<RestrictionArea>>,
    signs: AHashMap<i64, Arc<TrafficSign>>,
}

impl Default for SpatialIndex {
    fn default() -> Self { Self::new() }
}

/// Build an identity map (last duplicate wins) and a bulk-loaded tree holding
/// one entry per retained feature.
fn load<T>(
    what: &'static str,
    features: Vec<T>,
    id: impl Fn(&T) -> i64,
    entry: impl Fn(&T) -> Option<IndexEntry>,
) -> (AHashMap<i64, Arc<T>>, RTree<IndexEntry>) {
    let features: Vec<Arc<T>> = features.into_iter().map(Arc::new).collect();

    let mut map = AHashMap::with_capacity(features.len());
    for feature in &features {
        map.insert(id(feature), Arc::clone(feature));
    }
    let duplicates = features.len() - map.len();
    if duplicates > 0 {
        tracing::warn!(what, duplicates, "duplicate feature ids, keeping the last row of each");
    }

    let mut skipped = 0usize;
    let entries: Vec<IndexEntry> = features.iter()
        .filter(|feature| map.get(&id(feature)).is_some_and(|kept| Arc::ptr_eq(kept, feature)))
        .filter_map(|feature| {
            let entry = entry(feature);
            skipped += entry.is_none() as usize;
            entry
        })
        .collect();
    if skipped > 0 {
        tracing::warn!(what, skipped, "features with non-finite coordinates left out of the index");
    }

    (map, RTree::bulk_load(entries))
}

/// Resolve tree hits through the identity map, sorted by id.
fn resolve<'a, T>(
    hits: impl Iterator<Item = &'a IndexEntry>,
    map: &AHashMap<i64, Arc<T>>,
) -> Vec<Arc<T>> {
    let mut ids: Vec<i64> = hits.map(IndexEntry::id).collect();
    ids.sort_unstable();
    ids.dedup();
    ids.into_iter().filter_map(|id| map.get(&id).cloned()).collect()
}

fn sorted_values<T>(map: &AHashMap<i64, Arc<T>>) -> Vec<Arc<T>> {
    let mut entries: Vec<(&i64, &Arc<T>)> = map.iter().collect();
    entries.sort_unstable_by_key(|(id, _)| **id);
    entries.into_iter().map(|(_, feature)| Arc::clone(feature)).collect()
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self {
            area_tree: RTree::new(),
            sign_tree: RTree::new(),
            areas: AHashMap::new(),
            signs: AHashMap::new(),
        }
    }

    /// Build both trees at once.
    pub fn build(areas: Vec<RestrictionArea>, signs: Vec<TrafficSign>) -> Self {
        let mut index = Self::new();
        index.build_area_index(areas);
        index.build_sign_index(signs);
        index
    }

    /// Replace the area tree and map with `areas`.
    pub fn build_area_index(&mut self, areas: Vec<RestrictionArea>) {
        let (map, tree) = load(
            "restriction areas",
            areas,
            |area| area.id,
            |area| IndexEntry::from_bbox(area.id, area.bbox),
        );
        tracing::info!(areas = map.len(), "built area index");
        self.areas = map;
        self.area_tree = tree;
    }

    /// Replace the sign tree and map with `signs`.
    pub fn build_sign_index(&mut self, signs: Vec<TrafficSign>) {
        let (map, tree) = load(
            "traffic signs",
            signs,
            |sign| sign.id,
            |sign| sign.coord().and_then(|c| IndexEntry::from_point(sign.id, c.x, c.y)),
        );
        tracing::info!(signs = map.len(), "built sign index");
        self.signs = map;
        self.sign_tree = tree;
    }

    /// Areas whose bbox intersects the square of half-width `buffer_deg`
    /// around the position. A pre-filter: containment is not checked.
    pub fn candidate_areas(&self, lng: f64, lat: f64, buffer_deg: f64) -> Vec<Arc<RestrictionArea>> {
        let window = AABB::from_corners([lng - buffer_deg, lat - buffer_deg], [lng + buffer_deg, lat + buffer_deg]);
        resolve(self.area_tree.locate_in_envelope_intersecting(&window), &self.areas)
    }

    /// Signs inside a window approximating `radius_m` around the position.
    pub fn nearby_signs_in_radius(&self, lng: f64, lat: f64, radius_m: f64) -> Vec<Arc<TrafficSign>> {
        let d_lat = radius_m / METERS_PER_DEG_LAT;
        let d_lng = radius_m / METERS_PER_DEG_LNG;
        let window = AABB::from_corners([lng - d_lng, lat - d_lat], [lng + d_lng, lat + d_lat]);
        resolve(self.sign_tree.locate_in_envelope_intersecting(&window), &self.signs)
    }

    #[inline] pub fn area(&self, id: i64) -> Option<&Arc<RestrictionArea>> { self.areas.get(&id) }

    #[inline] pub fn sign(&self, id: i64) -> Option<&Arc<TrafficSign>> { self.signs.get(&id) }

    /// Every indexed area, sorted by id.
    pub fn all_areas(&self) -> Vec<Arc<RestrictionArea>> { sorted_values(&self.areas) }

    /// Every indexed sign, sorted by id.
    pub fn all_signs(&self) -> Vec<Arc<TrafficSign>> { sorted_values(&self.signs) }

    #[inline] pub fn area_count(&self) -> usize { self.areas.len() }

    #[inline] pub fn sign_count(&self) -> usize { self.signs.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.areas.is_empty() && self.signs.is_empty() }

    /// Distinct sign type codes present in the index.
    pub fn sign_types(&self) -> Vec<i64> { unique_sign_types(self.signs.values().map(Arc::as_ref)) }
}
