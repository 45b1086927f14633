use std::fmt;

use geo::{Coord, Intersects, LineString, Point, Polygon, Rect};

/// A decoded geometry. Coordinates are `(x, y)` = `(longitude, latitude)`.
///
/// Polygon rings are kept exactly as decoded: the first ring is the exterior
/// boundary, the rest are holes, and an open ring stays open.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "GeoJson", from = "GeoJson"))]
pub enum Geometry {
    Point(Point<f64>),
    Polygon(Vec<LineString<f64>>),
    MultiPolygon(Vec<Vec<LineString<f64>>>),
}

/// Discriminant of [`Geometry`], also used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    Polygon,
    MultiPolygon,
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GeometryKind::Point => "Point",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
        })
    }
}

fn rings_from_pairs(rings: Vec<Vec<(f64, f64)>>) -> Vec<LineString<f64>> {
    rings.into_iter()
        .map(|ring| ring.into_iter().map(|(x, y)| Coord { x, y }).collect())
        .collect()
}

/// `geo` polygon for containment tests. `Polygon::new` closes open rings,
/// so this is never stored.
fn to_polygon(rings: &[LineString<f64>]) -> Option<Polygon<f64>> {
    let (exterior, interiors) = rings.split_first()?;
    Some(Polygon::new(exterior.clone(), interiors.to_vec()))
}

fn polygon_covers(rings: &[LineString<f64>], coord: Coord<f64>) -> bool {
    to_polygon(rings).is_some_and(|polygon| polygon.intersects(&coord))
}

impl Geometry {
    pub fn point(x: f64, y: f64) -> Self { Self::Point(Point::new(x, y)) }

    /// Polygon from `(x, y)` rings; the first ring is the exterior.
    pub fn polygon(rings: Vec<Vec<(f64, f64)>>) -> Self { Self::Polygon(rings_from_pairs(rings)) }

    /// MultiPolygon from per-polygon ring lists.
    pub fn multi_polygon(polygons: Vec<Vec<Vec<(f64, f64)>>>) -> Self {
        Self::MultiPolygon(polygons.into_iter().map(rings_from_pairs).collect())
    }

    pub fn kind(&self) -> GeometryKind {
        match self {
            Self::Point(_) => GeometryKind::Point,
            Self::Polygon(_) => GeometryKind::Polygon,
            Self::MultiPolygon(_) => GeometryKind::MultiPolygon,
        }
    }

    /// The point, if this is a Point geometry.
    #[inline]
    pub fn as_point(&self) -> Option<Point<f64>> {
        match self {
            Self::Point(point) => Some(*point),
            _ => None,
        }
    }

    /// Every ring of the geometry in decode order (exterior, holes, next polygon...).
    pub fn rings(&self) -> Vec<&LineString<f64>> {
        match self {
            Self::Point(_) => Vec::new(),
            Self::Polygon(rings) => rings.iter().collect(),
            Self::MultiPolygon(polygons) => polygons.iter().flatten().collect(),
        }
    }

    /// Iterate over every coordinate of every ring of every polygon.
    pub fn coords(&self) -> Box<dyn Iterator<Item = Coord<f64>> + '_> {
        match self {
            Self::Point(point) => Box::new(std::iter::once(point.0)),
            _ => Box::new(self.rings().into_iter().flat_map(|ring| ring.0.iter().copied())),
        }
    }

    /// Total number of coordinates across all rings.
    #[inline]
    pub fn coord_count(&self) -> usize { self.coords().count() }

    /// Enclosing box of all coordinates, or `None` for an empty geometry.
    pub fn bbox(&self) -> Option<Rect<f64>> {
        self.coords()
            .map(|c| (c.x, c.y, c.x, c.y))
            .reduce(|a, b| (a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3)))
            .map(|(min_x, min_y, max_x, max_y)| Rect::new(
                Coord { x: min_x, y: min_y },
                Coord { x: max_x, y: max_y },
            ))
    }

    /// Whether `coord` lies inside the geometry or on its boundary.
    /// Holes subtract from the covered area; open rings are treated as closed.
    pub fn covers(&self, coord: Coord<f64>) -> bool {
        match self {
            Self::Point(point) => point.0 == coord,
            Self::Polygon(rings) => polygon_covers(rings, coord),
            Self::MultiPolygon(polygons) => polygons.iter().any(|rings| polygon_covers(rings, coord)),
        }
    }
}

/// GeoJSON-shaped mirror of [`Geometry`] used for serialization.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "coordinates")]
enum GeoJson {
    Point([f64; 2]),
    Polygon(Vec<Vec<[f64; 2]>>),
    MultiPolygon(Vec<Vec<Vec<[f64; 2]>>>),
}

#[cfg(feature = "serde")]
fn rings_to_json(rings: &[LineString<f64>]) -> Vec<Vec<[f64; 2]>> {
    rings.iter()
        .map(|ring| ring.coords().map(|c| [c.x, c.y]).collect())
        .collect()
}

#[cfg(feature = "serde")]
fn rings_from_json(rings: Vec<Vec<[f64; 2]>>) -> Vec<LineString<f64>> {
    rings.into_iter()
        .map(|ring| ring.into_iter().map(|[x, y]| Coord { x, y }).collect())
        .collect()
}

#[cfg(feature = "serde")]
impl From<Geometry> for GeoJson {
    fn from(geometry: Geometry) -> Self {
        match geometry {
            Geometry::Point(point) => GeoJson::Point([point.x(), point.y()]),
            Geometry::Polygon(rings) => GeoJson::Polygon(rings_to_json(&rings)),
            Geometry::MultiPolygon(polygons) => {
                GeoJson::MultiPolygon(polygons.iter().map(|rings| rings_to_json(rings)).collect())
            }
        }
    }
}

#[cfg(feature = "serde")]
impl From<GeoJson> for Geometry {
    fn from(json: GeoJson) -> Self {
        match json {
            GeoJson::Point([x, y]) => Geometry::point(x, y),
            GeoJson::Polygon(rings) => Geometry::Polygon(rings_from_json(rings)),
            GeoJson::MultiPolygon(polygons) => {
                Geometry::MultiPolygon(polygons.into_iter().map(rings_from_json).collect())
            }
        }
    }
}
