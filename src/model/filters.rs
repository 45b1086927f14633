use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// User-controlled evaluation filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Filters {
    /// When false, restrictions whose exception mentions leisure traffic are hidden.
    pub professional_traffic_allowed: bool,
    /// When false, restrictions aimed at personal watercraft are hidden.
    pub personal_watercraft_allowed: bool,
    /// Sign type codes to show. Empty means every type.
    pub selected_sign_types: BTreeSet<i64>,
    pub nearby_radius_meters: u32,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            professional_traffic_allowed: true,
            personal_watercraft_allowed: true,
            selected_sign_types: BTreeSet::new(),
            nearby_radius_meters: 250,
        }
    }
}

impl Filters {
    /// Whether a sign of the given type code passes the type filter.
    #[inline]
    pub fn shows_sign_type(&self, sign_type: i64) -> bool {
        self.selected_sign_types.is_empty() || self.selected_sign_types.contains(&sign_type)
    }
}
