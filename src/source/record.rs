//! JSON-backed records.
//!
//! The console does not know the shape of its records ahead of time. Each
//! record is a JSON object; columns reach into it with dotted paths such as
//! `college.campus.name`. Missing segments and `null` become
//! [`CellValue::Absent`].

use crate::model::{CellValue, Record, RecordId};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

/// One record: a JSON object plus its identity.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRecord {
    id: RecordId,
    value: Value,
}

impl JsonRecord {
    /// Wrap an object, reading its identity from `id_field`.
    ///
    /// Returns `None` if the value is not an object or the identity field is
    /// missing or not an integer or string.
    pub fn from_value(value: Value, id_field: &str) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        let id = match lookup(&value, id_field)? {
            Value::Number(n) => RecordId::Int(n.as_i64()?),
            Value::String(s) if !s.is_empty() => RecordId::Text(s.clone()),
            _ => return None,
        };
        Some(Self { id, value })
    }

    /// The underlying JSON object.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Raw JSON at a dotted path.
    pub fn raw(&self, path: &str) -> Option<&Value> {
        lookup(&self.value, path)
    }

    /// Cell value at a dotted path.
    pub fn get(&self, path: &str) -> CellValue {
        self.raw(path).map_or(CellValue::Absent, json_to_cell)
    }

    /// Copy of this record with `path` set to `new_value`.
    ///
    /// Intermediate objects are created as needed. A non-object segment in
    /// the way is replaced.
    pub fn with_field(&self, path: &str, new_value: Value) -> Self {
        let mut value = self.value.clone();
        set_path(&mut value, path, new_value);
        Self {
            id: self.id.clone(),
            value,
        }
    }
}

impl Record for JsonRecord {
    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

/// Follow a dotted path through nested objects.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, segment| current.as_object()?.get(segment))
}

fn set_path(value: &mut Value, path: &str, new_value: Value) {
    let mut segments = path.split('.').peekable();
    let mut current = value;
    while let Some(segment) = segments.next() {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        let Value::Object(map) = current else {
            return;
        };
        if segments.peek().is_none() {
            map.insert(segment.to_string(), new_value);
            return;
        }
        current = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
}

/// Convert a JSON value into a cell value.
///
/// Strings that look like RFC 3339 timestamps or `YYYY-MM-DD` dates become
/// [`CellValue::Date`]. Arrays join their elements' display text; objects
/// render as compact JSON.
pub fn json_to_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Absent,
        Value::Bool(b) => CellValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => CellValue::Int(i),
            None => n.as_f64().map_or(CellValue::Absent, CellValue::Float),
        },
        Value::String(s) => parse_date(s).map_or_else(|| CellValue::Text(s.clone()), CellValue::Date),
        Value::Array(items) => CellValue::Text(
            items
                .iter()
                .map(|item| json_to_cell(item).display_text())
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Object(_) => CellValue::Text(value.to_string()),
    }
}

/// Offsets are dropped; the wall-clock time written in the source is kept.
fn parse_date(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> JsonRecord {
        JsonRecord::from_value(value, "id").expect("record should have an id")
    }

    #[test]
    fn identity_accepts_integers_and_strings() {
        assert_eq!(record(json!({"id": 7})).id(), RecordId::Int(7));
        assert_eq!(
            record(json!({"id": "a-1"})).id(),
            RecordId::Text("a-1".to_string())
        );
    }

    #[test]
    fn identity_rejects_missing_and_unusable_values() {
        assert!(JsonRecord::from_value(json!({"name": "x"}), "id").is_none());
        assert!(JsonRecord::from_value(json!({"id": 1.5}), "id").is_none());
        assert!(JsonRecord::from_value(json!({"id": ""}), "id").is_none());
        assert!(JsonRecord::from_value(json!([1]), "id").is_none());
    }

    #[test]
    fn nested_identity_path() {
        let r = JsonRecord::from_value(json!({"meta": {"key": 3}}), "meta.key").unwrap();
        assert_eq!(r.id(), RecordId::Int(3));
    }

    #[test]
    fn dotted_paths_resolve_nested_fields() {
        let r = record(json!({"id": 1, "college": {"campus": {"name": "North"}}}));

        assert_eq!(r.get("college.campus.name"), CellValue::Text("North".to_string()));
    }

    #[test]
    fn missing_or_null_segments_are_absent() {
        let r = record(json!({"id": 1, "college": null, "campus": {}}));

        assert_eq!(r.get("college.campus.name"), CellValue::Absent);
        assert_eq!(r.get("campus.name"), CellValue::Absent);
        assert_eq!(r.get("nope"), CellValue::Absent);
    }

    #[test]
    fn scalar_kinds_convert() {
        assert_eq!(json_to_cell(&json!(true)), CellValue::Bool(true));
        assert_eq!(json_to_cell(&json!(42)), CellValue::Int(42));
        assert_eq!(json_to_cell(&json!(2.5)), CellValue::Float(2.5));
        assert_eq!(
            json_to_cell(&json!(["a", null, "b"])),
            CellValue::Text("a, b".to_string())
        );
    }

    #[test]
    fn date_strings_become_dates() {
        let date = json_to_cell(&json!("2024-03-01"));
        assert_eq!(date.display_text(), "2024-03-01");

        let timestamp = json_to_cell(&json!("2024-03-01T09:30:00Z"));
        assert_eq!(timestamp.display_text(), "2024-03-01 09:30");

        assert_eq!(
            json_to_cell(&json!("March 1st")),
            CellValue::Text("March 1st".to_string())
        );
    }

    #[test]
    fn offset_timestamps_keep_their_wall_clock_time() {
        let timestamp = json_to_cell(&json!("2024-03-01T09:30:00+02:00"));

        assert_eq!(timestamp.display_text(), "2024-03-01 09:30");
    }

    #[test]
    fn with_field_sets_nested_value_without_touching_original() {
        let r = record(json!({"id": 1, "status": {"active": false}}));

        let updated = r.with_field("status.active", json!(true));

        assert_eq!(updated.get("status.active"), CellValue::Bool(true));
        assert_eq!(r.get("status.active"), CellValue::Bool(false));
        assert_eq!(updated.id(), r.id());
    }

    #[test]
    fn with_field_creates_missing_objects() {
        let r = record(json!({"id": 1}));

        let updated = r.with_field("a.b", json!("x"));

        assert_eq!(updated.get("a.b"), CellValue::Text("x".to_string()));
    }
}
