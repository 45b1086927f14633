use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::model::RestrictionArea;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an ISO-8601 timestamp or date. Values without an offset are UTC and
/// a bare date means midnight. Unparseable text yields `None`.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Some(time.with_timezone(&Utc));
    }
    NAIVE_FORMATS.iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Whether `now` lies inside the area's validity window. Missing or
/// unparseable bounds do not restrict.
pub fn is_within_validity(area: &RestrictionArea, now: DateTime<Utc>) -> bool {
    let starts = area.valid_from.as_deref().and_then(parse_timestamp);
    let ends = area.valid_until.as_deref().and_then(parse_timestamp);
    starts.is_none_or(|start| now >= start) && ends.is_none_or(|end| now <= end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn accepted_formats() {
        let midnight = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-05-01"), Some(midnight));
        assert_eq!(parse_timestamp("2024-05-01T00:00:00"), Some(midnight));
        assert_eq!(parse_timestamp("2024-05-01 00:00:00"), Some(midnight));
        assert_eq!(parse_timestamp("2024-05-01T03:00:00+03:00"), Some(midnight));
        assert_eq!(parse_timestamp("2024-05-01T00:00:00.000Z"), Some(midnight));
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("toistaiseksi"), None);
        assert_eq!(parse_timestamp("2024-13-01"), None);
    }
}
