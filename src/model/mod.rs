mod filters;
mod position;
mod restriction;
mod sign;

pub use filters::Filters;
pub use position::BoatPosition;
pub use restriction::{parse_type_codes, ApplicableRestriction, RestrictionArea};
pub use sign::{format_distance, icon_key, unique_sign_types, NearbySign, TrafficSign};
