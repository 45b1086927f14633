use gpkg_wkb::GeometryKind;
use rusqlite::types::Value;
use rusqlite::Connection;

use crate::error::{Error, Result};
use crate::model::{icon_key, TrafficSign};
use super::columns::{Columns, Field, Resolved};
use super::gpkg::{read_rows, FeatureTable};
use super::{row_geometry, RowIds};

const NAME_FI: Field = Field(&["NIMIFI", "NIMI_FI"]);
const NAME_SV: Field = Field(&["NIMISV", "NIMI_SV"]);
const TYPE_CLASS: Field = Field(&["VLMLAJITYYPPI", "VLM_LAJITYYPPI"]);
const SIGN_TYPE: Field = Field(&["VLMTYYPPI", "VLM_TYYPPI"]);
const RESTRICTION_VALUE: Field = Field(&["RAJOITUSARVO"]);
const PLATE_TEXT_FI: Field = Field(&["LISAKILMENTEKSTIFI", "LISAKILVENTEKSTIFI"]);
const PLATE_TEXT_SV: Field = Field(&["LISAKILMENTEKSTISV", "LISAKILVENTEKSTISV"]);
const LOCATION_FI: Field = Field(&["SIJAINTIFI", "SIJAINTI_FI"]);
const LOCATION_SV: Field = Field(&["SIJAINTISV", "SIJAINTI_SV"]);
const FAIRWAY_KIND: Field = Field(&["VAYLALAJI"]);
const DECISION: Field = Field(&["PAATOS"]);
const EFFECT_AREA: Field = Field(&["VAIKUTUSALUE"]);
const PATA_TYPE: Field = Field(&["PATATYYPPI"]);
const PAKO_TYPE: Field = Field(&["PAKOTYYPPI"]);
const REGISTER_NUMBER: Field = Field(&["TKL_NUMERO", "TKLNUMERO"]);
const MEASURED_ON: Field = Field(&["MITTAUSPAIVA", "MITTAUSPÄIVÄ"]);
const FAIRWAYS: Field = Field(&["VAYLAT"]);
const DETACHED_ON: Field = Field(&["IRROTUS_PVM", "IRROTUSPVM"]);

struct Layout {
    ids: RowIds,
    geometry: Resolved,
    name_fi: Resolved,
    name_sv: Resolved,
    type_class: Resolved,
    sign_type: Resolved,
    restriction_value: Resolved,
    plate_text_fi: Resolved,
    plate_text_sv: Resolved,
    location_fi: Resolved,
    location_sv: Resolved,
    fairway_kind: Resolved,
    decision: Resolved,
    effect_area: Resolved,
    pata_type: Resolved,
    pako_type: Resolved,
    register_number: Resolved,
    measured_on: Resolved,
    fairways: Resolved,
    detached_on: Resolved,
}

impl Layout {
    fn new(columns: &Columns, table: &FeatureTable) -> Self {
        Self {
            ids: RowIds::new(columns, table),
            geometry: columns.resolve_name(&table.geometry_column),
            name_fi: columns.resolve(NAME_FI),
            name_sv: columns.resolve(NAME_SV),
            type_class: columns.resolve(TYPE_CLASS),
            sign_type: columns.resolve(SIGN_TYPE),
            restriction_value: columns.resolve(RESTRICTION_VALUE),
            plate_text_fi: columns.resolve(PLATE_TEXT_FI),
            plate_text_sv: columns.resolve(PLATE_TEXT_SV),
            location_fi: columns.resolve(LOCATION_FI),
            location_sv: columns.resolve(LOCATION_SV),
            fairway_kind: columns.resolve(FAIRWAY_KIND),
            decision: columns.resolve(DECISION),
            effect_area: columns.resolve(EFFECT_AREA),
            pata_type: columns.resolve(PATA_TYPE),
            pako_type: columns.resolve(PAKO_TYPE),
            register_number: columns.resolve(REGISTER_NUMBER),
            measured_on: columns.resolve(MEASURED_ON),
            fairways: columns.resolve(FAIRWAYS),
            detached_on: columns.resolve(DETACHED_ON),
        }
    }

    fn sign(&self, table: &str, index: usize, row: &[Value]) -> Result<TrafficSign> {
        let geometry = row_geometry(&self.geometry, table, index, row)?;
        if geometry.kind() != GeometryKind::Point {
            return Err(Error::UnexpectedGeometry {
                table: table.to_string(),
                row: index,
                expected: "Point",
                found: geometry.kind(),
            });
        }

        // Missing class/type codes read as 0.
        let type_class = self.type_class.int(row).unwrap_or(0);
        let restriction_value = self.restriction_value.float(row);
        Ok(TrafficSign {
            id: self.ids.id(row, index),
            name_fi: self.name_fi.text(row),
            name_sv: self.name_sv.text(row),
            type_class,
            sign_type: self.sign_type.int(row).unwrap_or(0),
            restriction_value,
            plate_text_fi: self.plate_text_fi.text(row),
            plate_text_sv: self.plate_text_sv.text(row),
            location_fi: self.location_fi.text(row),
            location_sv: self.location_sv.text(row),
            fairway_kind: self.fairway_kind.text(row),
            decision: self.decision.text(row),
            effect_area: self.effect_area.text(row),
            pata_type: self.pata_type.int(row),
            pako_type: self.pako_type.int(row),
            register_number: self.register_number.int(row),
            measured_on: self.measured_on.text(row),
            fairways: self.fairways.text(row),
            detached_on: self.detached_on.text(row),
            geometry,
            icon_key: icon_key(type_class, restriction_value),
        })
    }
}

/// Decode every row of a sign table. The first bad row aborts.
pub(crate) fn read(conn: &Connection, table: &FeatureTable) -> Result<Vec<TrafficSign>> {
    let (columns, rows) = read_rows(conn, table)?;
    let layout = Layout::new(&columns, table);
    rows.iter()
        .enumerate()
        .map(|(index, row)| layout.sign(&table.name, index, row))
        .collect()
}
