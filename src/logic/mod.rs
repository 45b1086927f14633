pub mod applicability;
pub mod proximity;
mod collate;
mod validity;

pub use collate::finnish_cmp;
pub use proximity::haversine_m;
pub use validity::{is_within_validity, parse_timestamp};
