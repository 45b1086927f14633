//! Column alias resolution and value coercion for attribute rows.

use rusqlite::types::Value;

/// Ordered source-column aliases for one logical attribute.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Field(pub(crate) &'static [&'static str]);

/// Column positions resolved for one [`Field`], in priority order.
#[derive(Debug, Clone, Default)]
pub(crate) struct Resolved(Vec<usize>);

/// Column names of a table, used to resolve fields once per table.
#[derive(Debug, Clone)]
pub(crate) struct Columns {
    names: Vec<String>,
}

impl Columns {
    pub(crate) fn new(names: Vec<String>) -> Self { Self { names } }

    /// Each alias in order, matched exactly or else case-insensitively.
    pub(crate) fn resolve(&self, field: Field) -> Resolved {
        let mut indices: Vec<usize> = Vec::new();
        for alias in field.0 {
            if let Some(i) = self.position(alias) {
                if !indices.contains(&i) {
                    indices.push(i);
                }
            }
        }
        Resolved(indices)
    }

    /// Resolve a single column by name.
    pub(crate) fn resolve_name(&self, name: &str) -> Resolved {
        Resolved(self.position(name).into_iter().collect())
    }

    fn position(&self, name: &str) -> Option<usize> {
        let lower = name.to_lowercase();
        self.names.iter().position(|n| n == name)
            .or_else(|| self.names.iter().position(|n| n.to_lowercase() == lower))
    }
}

impl Resolved {
    #[inline] pub(crate) fn is_empty(&self) -> bool { self.0.is_empty() }

    /// First non-null value among the resolved columns.
    pub(crate) fn value<'r>(&self, row: &'r [Value]) -> Option<&'r Value> {
        self.0.iter()
            .filter_map(|&i| row.get(i))
            .find(|value| !matches!(value, Value::Null))
    }

    pub(crate) fn text(&self, row: &[Value]) -> Option<String> { self.value(row).and_then(as_text) }

    pub(crate) fn int(&self, row: &[Value]) -> Option<i64> { self.value(row).and_then(as_i64) }

    pub(crate) fn float(&self, row: &[Value]) -> Option<f64> { self.value(row).and_then(as_f64) }
}

pub(crate) fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(f) => Some(f.to_string()),
        Value::Text(s) => Some(s.clone()),
        Value::Blob(bytes) => String::from_utf8(bytes.clone()).ok(),
    }
}

/// Integer coercion: integral reals and numeric text are accepted.
pub(crate) fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(*i),
        Value::Real(f) => real_to_i64(*f),
        Value::Text(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| s.parse::<f64>().ok().and_then(real_to_i64))
        }
        Value::Null | Value::Blob(_) => None,
    }
}

pub(crate) fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Integer(i) => Some(*i as f64),
        Value::Real(f) => Some(*f).filter(|f| f.is_finite()),
        Value::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        Value::Null | Value::Blob(_) => None,
    }
}

fn real_to_i64(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}

/// Human-readable storage class, for error messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NULL",
        Value::Integer(_) => "INTEGER",
        Value::Real(_) => "REAL",
        Value::Text(_) => "TEXT",
        Value::Blob(_) => "BLOB",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Columns {
        Columns::new(["fid", "geom", "lisätieto", "SUURUUS", "Suuruus_2", "ID"].map(String::from).to_vec())
    }

    #[test]
    fn aliases_resolve_in_order() {
        let columns = columns();
        assert_eq!(columns.resolve(Field(&["Suuruus_2", "SUURUUS"])).0, vec![4, 3]);
        assert_eq!(columns.resolve(Field(&["suuruus", "Suuruus_2"])).0, vec![3, 4]);
        assert_eq!(columns.resolve(Field(&["id", "ID"])).0, vec![5]);
        assert_eq!(columns.resolve(Field(&["LISÄTIETO"])).0, vec![2]);
        assert!(columns.resolve(Field(&["PITUUS"])).is_empty());
    }

    #[test]
    fn first_non_null_wins() {
        let resolved = columns().resolve(Field(&["SUURUUS", "Suuruus_2"]));
        let row = vec![
            Value::Integer(1),
            Value::Null,
            Value::Null,
            Value::Null,
            Value::Text("10 km/h".into()),
            Value::Null,
        ];
        assert_eq!(resolved.text(&row).as_deref(), Some("10 km/h"));
    }

    #[test]
    fn coercions() {
        assert_eq!(as_i64(&Value::Real(42.0)), Some(42));
        assert_eq!(as_i64(&Value::Real(4.2)), None);
        assert_eq!(as_i64(&Value::Text(" 17 ".into())), Some(17));
        assert_eq!(as_i64(&Value::Text("17.0".into())), Some(17));
        assert_eq!(as_i64(&Value::Text("x".into())), None);
        assert_eq!(as_f64(&Value::Integer(50)), Some(50.0));
        assert_eq!(as_f64(&Value::Text("NaN".into())), None);
        assert_eq!(as_text(&Value::Integer(3)).as_deref(), Some("3"));
    }
}
