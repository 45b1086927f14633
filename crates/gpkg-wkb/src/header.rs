//! GeoPackage binary header (`GP` + version + flags + SRS id + envelope).

use crate::error::{WkbError, WkbResult};
use crate::read::Reader;

/// Magic bytes at the start of every GeoPackage geometry blob.
pub const MAGIC: [u8; 2] = *b"GP";

/// Fixed part of the header: magic (2), version (1), flags (1), SRS id (4).
const FIXED_LEN: usize = 8;

const FLAG_LITTLE_ENDIAN: u8 = 0b0000_0001;
const FLAG_EMPTY: u8 = 0b0001_0000;
const FLAG_EXTENDED: u8 = 0b0010_0000;

/// Bounding envelope stored in the header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub z: Option<(f64, f64)>,
    pub m: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GpkgHeader {
    pub version: u8,
    pub flags: u8,
    pub srs_id: i32,
    pub envelope: Option<Envelope>,
}

/// Envelope size in bytes for the 3-bit indicator in the flags byte.
pub(crate) fn envelope_len(indicator: u8) -> Option<usize> {
    match indicator {
        0 => Some(0),
        1 => Some(32),
        2 | 3 => Some(48),
        4 => Some(64),
        _ => None,
    }
}

impl GpkgHeader {
    /// True when `bytes` starts with the GeoPackage magic.
    #[inline]
    pub fn is_present(bytes: &[u8]) -> bool { bytes.len() >= 2 && bytes[..2] == MAGIC }

    /// Parse the header at the start of `bytes`.
    pub fn parse(bytes: &[u8]) -> WkbResult<Self> {
        if !Self::is_present(bytes) {
            return Err(WkbError::malformed(0, "missing GeoPackage magic"));
        }

        let mut reader = Reader::new(bytes);
        reader.skip(2)?;
        let version = reader.u8()?;
        let flags = reader.u8()?;
        reader.set_little_endian(flags & FLAG_LITTLE_ENDIAN != 0);
        let srs_id = reader.i32()?;

        let indicator = (flags >> 1) & 0x07;
        let len = envelope_len(indicator)
            .ok_or_else(|| WkbError::malformed(3, format!("invalid envelope indicator {indicator}")))?;
        if reader.remaining() < len {
            return Err(WkbError::malformed(
                reader.position(),
                format!("envelope needs {len} bytes, {} left", reader.remaining()),
            ));
        }

        let envelope = match indicator {
            0 => None,
            _ => {
                let (min_x, max_x, min_y, max_y) = (reader.f64()?, reader.f64()?, reader.f64()?, reader.f64()?);
                let z = if indicator == 2 || indicator == 4 { Some((reader.f64()?, reader.f64()?)) } else { None };
                let m = if indicator == 3 || indicator == 4 { Some((reader.f64()?, reader.f64()?)) } else { None };
                Some(Envelope { min_x, max_x, min_y, max_y, z, m })
            }
        };

        Ok(Self { version, flags, srs_id, envelope })
    }

    /// Total header length, i.e. the offset of the WKB payload.
    pub fn wkb_offset(&self) -> usize {
        FIXED_LEN + envelope_len((self.flags >> 1) & 0x07).unwrap_or(0)
    }

    #[inline] pub fn is_empty_geometry(&self) -> bool { self.flags & FLAG_EMPTY != 0 }

    #[inline] pub fn is_extended(&self) -> bool { self.flags & FLAG_EXTENDED != 0 }
}
