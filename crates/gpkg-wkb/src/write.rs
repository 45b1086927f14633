//! WKB writing operations (reference encoder used for fixtures and round trips).

use geo::LineString;

use crate::geometry::Geometry;
use crate::header::MAGIC;

const WKB_POINT: u32 = 1;
const WKB_POLYGON: u32 = 3;
const WKB_MULTIPOLYGON: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    BigEndian,
    LittleEndian,
}

struct Writer {
    out: Vec<u8>,
    order: ByteOrder,
}

impl Writer {
    fn u8(&mut self, value: u8) { self.out.push(value) }

    fn u32(&mut self, value: u32) {
        match self.order {
            ByteOrder::LittleEndian => self.out.extend_from_slice(&value.to_le_bytes()),
            ByteOrder::BigEndian => self.out.extend_from_slice(&value.to_be_bytes()),
        }
    }

    fn f64(&mut self, value: f64) {
        match self.order {
            ByteOrder::LittleEndian => self.out.extend_from_slice(&value.to_le_bytes()),
            ByteOrder::BigEndian => self.out.extend_from_slice(&value.to_be_bytes()),
        }
    }

    fn preamble(&mut self, code: u32) {
        self.u8(match self.order {
            ByteOrder::BigEndian => 0,
            ByteOrder::LittleEndian => 1,
        });
        self.u32(code);
    }

    fn ring(&mut self, ring: &LineString<f64>) {
        self.u32(ring.0.len() as u32);
        for coord in ring.coords() {
            self.f64(coord.x);
            self.f64(coord.y);
        }
    }

    fn polygon_body(&mut self, rings: &[LineString<f64>]) {
        self.u32(rings.len() as u32);
        for ring in rings {
            self.ring(ring);
        }
    }
}

/// Encode a geometry as plain 2D WKB.
pub fn encode_wkb(geometry: &Geometry, order: ByteOrder) -> Vec<u8> {
    let mut writer = Writer { out: Vec::new(), order };
    match geometry {
        Geometry::Point(point) => {
            writer.preamble(WKB_POINT);
            writer.f64(point.x());
            writer.f64(point.y());
        }
        Geometry::Polygon(rings) => {
            writer.preamble(WKB_POLYGON);
            writer.polygon_body(rings);
        }
        Geometry::MultiPolygon(polygons) => {
            writer.preamble(WKB_MULTIPOLYGON);
            writer.u32(polygons.len() as u32);
            for rings in polygons {
                writer.preamble(WKB_POLYGON);
                writer.polygon_body(rings);
            }
        }
    }
    writer.out
}

/// Encode a geometry as a GeoPackage blob: little-endian header with the
/// given SRS id, an XY envelope when `with_envelope` is set, then WKB.
pub fn encode_gpkg(geometry: &Geometry, srs_id: i32, with_envelope: bool) -> Vec<u8> {
    let bbox = geometry.bbox().filter(|_| with_envelope);
    let indicator: u8 = if bbox.is_some() { 1 } else { 0 };

    let mut out = Vec::new();
    out.extend_from_slice(&MAGIC);
    out.push(0);
    out.push(0b1 | (indicator << 1));
    out.extend_from_slice(&srs_id.to_le_bytes());
    if let Some(rect) = bbox {
        for value in [rect.min().x, rect.max().x, rect.min().y, rect.max().y] {
            out.extend_from_slice(&value.to_le_bytes());
        }
    }
    out.extend(encode_wkb(geometry, ByteOrder::LittleEndian));
    out
}
