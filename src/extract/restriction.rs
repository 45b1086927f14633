use std::sync::LazyLock;

use gpkg_wkb::GeometryKind;
use regex::Regex;
use rusqlite::types::Value;
use rusqlite::Connection;

use crate::error::{Error, Result};
use crate::model::RestrictionArea;
use super::columns::{Columns, Field, Resolved};
use super::gpkg::{read_rows, FeatureTable};
use super::{row_geometry, RowIds};

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid regex"));

const RESTRICTION_TYPE: Field = Field(&["RAJOITUSTYYPPI", "RAJOITUS_TYYPPI"]);
const RESTRICTION_CODES: Field = Field(&["RAJOITUSTYYPIT", "RAJOITUS_TYYPIT"]);
const MAGNITUDE: Field = Field(&["SUURUUS"]);
const LENGTH: Field = Field(&["PITUUS"]);
const EXCEPTION: Field = Field(&["POIKKEUS"]);
const NOTE: Field = Field(&["LISÄTIETO", "LISATIETO"]);
const DECISION_STATUS: Field = Field(&["PAATOSTILA", "PÄÄTÖSTILA"]);
const VALID_FROM: Field = Field(&["ALKUPÄIVÄMÄÄRÄ", "ALKUPAIVAMAARA", "ALKUPVM"]);
const VALID_UNTIL: Field = Field(&["LOPPUPÄIVÄMÄÄRÄ", "LOPPUPAIVAMAARA", "LOPPUPVM"]);
const RECORD_NUMBER: Field = Field(&["DIAARINUMERO"]);
const DATA_SOURCE: Field = Field(&["TIETOLAHDE", "TIETOLÄHDE"]);
const SEQUENCE: Field = Field(&["JNRO"]);
const PLACE_NAME: Field = Field(&["NIMISIJAINTI"]);
const DETACHED_ON: Field = Field(&["IRROTUS_PVM", "IRROTUSPVM"]);

/// First run of ASCII digits in a magnitude text: `"10 km/h"` → 10.
pub(crate) fn parse_speed_limit(magnitude: &str) -> Option<u32> {
    DIGITS.find(magnitude).and_then(|m| m.as_str().parse().ok())
}

/// Column positions for every restriction attribute, resolved once per table.
struct Layout {
    ids: RowIds,
    geometry: Resolved,
    restriction_type: Resolved,
    restriction_codes: Resolved,
    magnitude: Resolved,
    length: Resolved,
    exception: Resolved,
    note: Resolved,
    decision_status: Resolved,
    valid_from: Resolved,
    valid_until: Resolved,
    record_number: Resolved,
    data_source: Resolved,
    sequence: Resolved,
    place_name: Resolved,
    detached_on: Resolved,
}

impl Layout {
    fn new(columns: &Columns, table: &FeatureTable) -> Self {
        Self {
            ids: RowIds::new(columns, table),
            geometry: columns.resolve_name(&table.geometry_column),
            restriction_type: columns.resolve(RESTRICTION_TYPE),
            restriction_codes: columns.resolve(RESTRICTION_CODES),
            magnitude: columns.resolve(MAGNITUDE),
            length: columns.resolve(LENGTH),
            exception: columns.resolve(EXCEPTION),
            note: columns.resolve(NOTE),
            decision_status: columns.resolve(DECISION_STATUS),
            valid_from: columns.resolve(VALID_FROM),
            valid_until: columns.resolve(VALID_UNTIL),
            record_number: columns.resolve(RECORD_NUMBER),
            data_source: columns.resolve(DATA_SOURCE),
            sequence: columns.resolve(SEQUENCE),
            place_name: columns.resolve(PLACE_NAME),
            detached_on: columns.resolve(DETACHED_ON),
        }
    }

    fn area(&self, table: &str, index: usize, row: &[Value]) -> Result<RestrictionArea> {
        let geometry = row_geometry(&self.geometry, table, index, row)?;
        if !matches!(geometry.kind(), GeometryKind::Polygon | GeometryKind::MultiPolygon) {
            return Err(Error::UnexpectedGeometry {
                table: table.to_string(),
                row: index,
                expected: "Polygon or MultiPolygon",
                found: geometry.kind(),
            });
        }
        let rect = geometry.bbox()
            .ok_or_else(|| Error::malformed(table, index, "polygon has no coordinates"))?;

        let magnitude = self.magnitude.text(row).unwrap_or_default();
        Ok(RestrictionArea {
            id: self.ids.id(row, index),
            restriction_type: self.restriction_type.text(row).unwrap_or_default(),
            restriction_codes: self.restriction_codes.text(row).unwrap_or_default(),
            speed_limit_kmh: parse_speed_limit(&magnitude),
            magnitude,
            length: self.length.text(row),
            exception: self.exception.text(row),
            note: self.note.text(row),
            decision_status: self.decision_status.text(row),
            valid_from: self.valid_from.text(row),
            valid_until: self.valid_until.text(row),
            record_number: self.record_number.text(row),
            data_source: self.data_source.text(row),
            sequence: self.sequence.int(row),
            place_name: self.place_name.text(row),
            detached_on: self.detached_on.text(row),
            bbox: [rect.min().x, rect.min().y, rect.max().x, rect.max().y],
            geometry,
        })
    }
}

/// Decode every row of a restriction table. The first bad row aborts.
pub(crate) fn read(conn: &Connection, table: &FeatureTable) -> Result<Vec<RestrictionArea>> {
    let (columns, rows) = read_rows(conn, table)?;
    let layout = Layout::new(&columns, table);
    rows.iter()
        .enumerate()
        .map(|(index, row)| layout.area(&table.name, index, row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_limit_is_first_digit_run() {
        assert_eq!(parse_speed_limit("10 km/h"), Some(10));
        assert_eq!(parse_speed_limit("max 8 solmua / 15 km/h"), Some(8));
        assert_eq!(parse_speed_limit("Ei rajoitusta"), None);
        assert_eq!(parse_speed_limit(""), None);
        assert_eq!(parse_speed_limit("99999999999999"), None);
    }
}
