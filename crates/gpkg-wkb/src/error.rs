/// Errors raised while decoding a geometry blob.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WkbError {
    /// The buffer is truncated, or a marker/count disagrees with what is left.
    #[error("malformed geometry at byte {offset}: {reason}")]
    Malformed { offset: usize, reason: String },

    /// The base type code is not Point (1), Polygon (3) or MultiPolygon (6).
    #[error("unsupported geometry type code {0}")]
    UnsupportedGeometryType(u32),
}

impl WkbError {
    pub(crate) fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        Self::Malformed { offset, reason: reason.into() }
    }

    /// True for [`WkbError::Malformed`].
    pub fn is_malformed(&self) -> bool { matches!(self, Self::Malformed { .. }) }
}

pub type WkbResult<T> = std::result::Result<T, WkbError>;
