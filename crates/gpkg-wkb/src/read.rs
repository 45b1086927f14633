//! WKB reading operations.

use geo::{Coord, LineString, Point};

use crate::error::{WkbError, WkbResult};
use crate::geometry::Geometry;
use crate::header::GpkgHeader;

/// WKB geometry type codes
const WKB_POINT: u32 = 1;
const WKB_POLYGON: u32 = 3;
const WKB_MULTIPOLYGON: u32 = 6;

/// WKB byte order markers
const WKB_BE: u8 = 0;
const WKB_LE: u8 = 1;

/// Extended-WKB flag bits carried in the upper bits of the type code
const FLAG_Z: u32 = 0x8000_0000;
const FLAG_M: u32 = 0x4000_0000;
const FLAG_SRID: u32 = 0x2000_0000;

/// Bounds-checked cursor over a byte slice with a switchable byte order.
pub(crate) struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
    little_endian: bool,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self { Self::at(buf, 0) }

    pub(crate) fn at(buf: &'a [u8], pos: usize) -> Self { Self { buf, pos, little_endian: true } }

    #[inline] pub(crate) fn position(&self) -> usize { self.pos }

    #[inline] pub(crate) fn remaining(&self) -> usize { self.buf.len().saturating_sub(self.pos) }

    #[inline] pub(crate) fn set_little_endian(&mut self, little_endian: bool) { self.little_endian = little_endian }

    fn take<const N: usize>(&mut self) -> WkbResult<[u8; N]> {
        let bytes = self.buf.get(self.pos..self.pos + N)
            .ok_or_else(|| WkbError::malformed(
                self.pos,
                format!("buffer truncated, needed {N} bytes, {} left", self.remaining()),
            ))?;
        self.pos += N;
        // Length checked above, the conversion cannot fail.
        Ok(bytes.try_into().unwrap_or([0; N]))
    }

    pub(crate) fn skip(&mut self, n: usize) -> WkbResult<()> {
        if self.remaining() < n {
            return Err(WkbError::malformed(
                self.pos,
                format!("buffer truncated, cannot skip {n} bytes, {} left", self.remaining()),
            ));
        }
        self.pos += n;
        Ok(())
    }

    pub(crate) fn u8(&mut self) -> WkbResult<u8> { Ok(self.take::<1>()?[0]) }

    pub(crate) fn u32(&mut self) -> WkbResult<u32> {
        let bytes = self.take::<4>()?;
        Ok(if self.little_endian { u32::from_le_bytes(bytes) } else { u32::from_be_bytes(bytes) })
    }

    pub(crate) fn i32(&mut self) -> WkbResult<i32> {
        let bytes = self.take::<4>()?;
        Ok(if self.little_endian { i32::from_le_bytes(bytes) } else { i32::from_be_bytes(bytes) })
    }

    pub(crate) fn f64(&mut self) -> WkbResult<f64> {
        let bytes = self.take::<8>()?;
        Ok(if self.little_endian { f64::from_le_bytes(bytes) } else { f64::from_be_bytes(bytes) })
    }

    /// Read an element count and reject it when `count * min_item_len`
    /// cannot fit in what is left of the buffer.
    fn count(&mut self, min_item_len: usize, what: &str) -> WkbResult<usize> {
        let offset = self.pos;
        let count = self.u32()? as usize;
        let needed = count.checked_mul(min_item_len).unwrap_or(usize::MAX);
        if needed > self.remaining() {
            return Err(WkbError::malformed(
                offset,
                format!("{what} count {count} needs {needed} bytes, {} left", self.remaining()),
            ));
        }
        Ok(count)
    }
}

/// Decoded type code: base geometry type plus dimension/SRID flags.
#[derive(Debug, Clone, Copy)]
struct TypeCode {
    raw: u32,
    base: u32,
    has_z: bool,
    has_m: bool,
    has_srid: bool,
}

impl TypeCode {
    fn parse(raw: u32) -> Self {
        // ISO WKB encodes dimensions as +1000 (Z), +2000 (M), +3000 (ZM).
        let code = raw & !(FLAG_Z | FLAG_M | FLAG_SRID);
        let iso = code / 1000;
        Self {
            raw,
            base: code % 1000,
            has_z: raw & FLAG_Z != 0 || iso == 1 || iso == 3,
            has_m: raw & FLAG_M != 0 || iso == 2 || iso == 3,
            has_srid: raw & FLAG_SRID != 0,
        }
    }

    /// Bytes per stored vertex.
    #[inline]
    fn vertex_len(&self) -> usize { 16 + 8 * (self.has_z as usize + self.has_m as usize) }

    /// Bytes of Z/M values to skip after each (x, y).
    #[inline]
    fn extra_len(&self) -> usize { self.vertex_len() - 16 }
}

/// Decode a geometry blob, skipping a GeoPackage header when one is present.
pub fn decode(bytes: &[u8]) -> WkbResult<Geometry> {
    let offset = if GpkgHeader::is_present(bytes) {
        GpkgHeader::parse(bytes)?.wkb_offset()
    } else {
        0
    };
    read_geometry(&mut Reader::at(bytes, offset))
}

/// Decode plain WKB with no GeoPackage header.
pub fn decode_wkb(bytes: &[u8]) -> WkbResult<Geometry> {
    read_geometry(&mut Reader::new(bytes))
}

/// Read the byte-order marker, type code and optional SRID of one geometry.
fn read_preamble(reader: &mut Reader) -> WkbResult<TypeCode> {
    let offset = reader.position();
    match reader.u8()? {
        WKB_LE => reader.set_little_endian(true),
        WKB_BE => reader.set_little_endian(false),
        other => return Err(WkbError::malformed(offset, format!("invalid byte order marker {other}"))),
    }

    let ty = TypeCode::parse(reader.u32()?);
    if ty.has_srid {
        reader.skip(4)?;
    }
    Ok(ty)
}

fn read_geometry(reader: &mut Reader) -> WkbResult<Geometry> {
    let ty = read_preamble(reader)?;
    match ty.base {
        WKB_POINT => Ok(Geometry::Point(read_point(reader, &ty)?)),
        WKB_POLYGON => Ok(Geometry::Polygon(read_polygon(reader, &ty)?)),
        WKB_MULTIPOLYGON => Ok(Geometry::MultiPolygon(read_multi_polygon(reader)?)),
        _ => Err(WkbError::UnsupportedGeometryType(ty.raw)),
    }
}

fn read_coord(reader: &mut Reader, ty: &TypeCode) -> WkbResult<Coord<f64>> {
    let x = reader.f64()?;
    let y = reader.f64()?;
    reader.skip(ty.extra_len())?;
    Ok(Coord { x, y })
}

fn read_point(reader: &mut Reader, ty: &TypeCode) -> WkbResult<Point<f64>> {
    Ok(Point(read_coord(reader, ty)?))
}

/// Rings are returned as stored; closure is not checked or added.
fn read_polygon(reader: &mut Reader, ty: &TypeCode) -> WkbResult<Vec<LineString<f64>>> {
    let num_rings = reader.count(4, "ring")?;
    let mut rings = Vec::with_capacity(num_rings);
    for _ in 0..num_rings {
        let num_points = reader.count(ty.vertex_len(), "point")?;
        let mut ring = Vec::with_capacity(num_points);
        for _ in 0..num_points {
            ring.push(read_coord(reader, ty)?);
        }
        rings.push(LineString::new(ring));
    }
    Ok(rings)
}

/// Each member is a standalone geometry with its own byte order and flags.
fn read_multi_polygon(reader: &mut Reader) -> WkbResult<Vec<Vec<LineString<f64>>>> {
    // Smallest member: byte order (1) + type (4) + ring count (4).
    let num_polygons = reader.count(9, "polygon")?;
    let mut polygons = Vec::with_capacity(num_polygons);
    for _ in 0..num_polygons {
        let offset = reader.position();
        let member = read_preamble(reader)?;
        if member.base != WKB_POLYGON {
            return Err(WkbError::malformed(
                offset,
                format!("multipolygon member has type code {}, expected a polygon", member.raw),
            ));
        }
        polygons.push(read_polygon(reader, &member)?);
    }
    Ok(polygons)
}
