use rstar::{RTreeObject, AABB};

/// A bounding box in an R-tree, associated with a feature by id.
#[derive(Debug, Clone)]
pub(super) struct IndexEntry {
    id: i64,
    bbox: [f64; 4], // [min_x, min_y, max_x, max_y]
}

impl IndexEntry {
    /// Entry for a polygon bbox. `None` when any corner is not finite.
    pub(super) fn from_bbox(id: i64, bbox: [f64; 4]) -> Option<Self> {
        bbox.iter().all(|v| v.is_finite()).then_some(Self { id, bbox })
    }

    /// Degenerate entry for a point.
    pub(super) fn from_point(id: i64, x: f64, y: f64) -> Option<Self> { Self::from_bbox(id, [x, y, x, y]) }

    /// Get the id of the corresponding feature.
    pub(super) fn id(&self) -> i64 { self.id }
}

impl RTreeObject for IndexEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        let [min_x, min_y, max_x, max_y] = self.bbox;
        AABB::from_corners([min_x, min_y], [max_x, max_y])
    }
}
