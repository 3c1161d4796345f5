//! Column schemas for JSON records.

use super::record::JsonRecord;
use crate::config::ColumnSpec;
use crate::model::Column;
use serde_json::Value;

/// Build table columns from configured specs.
pub fn columns_from_specs(specs: &[ColumnSpec]) -> Vec<Column<JsonRecord>> {
    specs.iter().map(column_from_spec).collect()
}

fn column_from_spec(spec: &ColumnSpec) -> Column<JsonRecord> {
    let path = spec.field_path().to_string();
    let mut column = Column::new(spec.id.clone(), spec.header_label(), move |r: &JsonRecord| {
        r.get(&path)
    });
    if let Some(width) = spec.width {
        column = column.width(width);
    }
    if let Some(sortable) = spec.sortable {
        column = column.sortable(sortable);
    }
    if spec.hidden == Some(true) {
        column = column.hidden();
    }
    column
}

/// Derive column specs from the records themselves.
///
/// Nested objects are flattened into dotted paths. The identity field comes
/// first; the rest follow in order of first appearance.
pub fn infer_column_specs(records: &[JsonRecord], id_field: &str) -> Vec<ColumnSpec> {
    let mut paths: Vec<String> = Vec::new();
    for record in records {
        collect_paths(record.value(), None, &mut paths);
    }
    // A field that is null in one record and an object in another keeps only
    // its nested paths.
    let parents: Vec<String> = paths
        .iter()
        .filter(|p| {
            let prefix = format!("{p}.");
            paths.iter().any(|other| other.starts_with(&prefix))
        })
        .cloned()
        .collect();
    paths.retain(|p| !parents.contains(p));
    if let Some(position) = paths.iter().position(|p| p == id_field) {
        let id = paths.remove(position);
        paths.insert(0, id);
    }
    paths
        .into_iter()
        .map(|path| ColumnSpec {
            header: Some(header_from_path(&path)),
            ..ColumnSpec::new(path)
        })
        .collect()
}

fn collect_paths(value: &Value, prefix: Option<&str>, paths: &mut Vec<String>) {
    let Value::Object(map) = value else {
        return;
    };
    for (key, child) in map {
        let path = match prefix {
            Some(p) => format!("{p}.{key}"),
            None => key.clone(),
        };
        if matches!(child, Value::Object(inner) if !inner.is_empty()) {
            collect_paths(child, Some(&path), paths);
        } else if !paths.contains(&path) {
            paths.push(path);
        }
    }
}

/// `college.campus_name` -> `Campus Name`.
fn header_from_path(path: &str) -> String {
    let last = path.rsplit('.').next().unwrap_or(path);
    last.split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellValue, ColumnSet};
    use serde_json::json;

    fn records() -> Vec<JsonRecord> {
        vec![
            JsonRecord::from_value(
                json!({"name": "Ada", "id": 1, "college": {"campus": {"name": "North"}}}),
                "id",
            )
            .unwrap(),
            JsonRecord::from_value(json!({"id": 2, "email": "b@x.io", "college": null}), "id")
                .unwrap(),
        ]
    }

    #[test]
    fn inferred_columns_flatten_nested_objects_and_lead_with_id() {
        let specs = infer_column_specs(&records(), "id");
        let ids: Vec<&str> = specs.iter().map(|s| s.id.as_str()).collect();

        assert_eq!(ids[0], "id");
        assert!(ids.contains(&"college.campus.name"));
        assert!(ids.contains(&"email"));
        assert!(ids.contains(&"name"));
        assert!(!ids.contains(&"college"));
    }

    #[test]
    fn inferred_ids_are_unique() {
        let specs = infer_column_specs(&records(), "id");

        assert!(ColumnSet::new(columns_from_specs(&specs)).is_ok());
    }

    #[test]
    fn headers_are_title_cased_from_last_segment() {
        assert_eq!(header_from_path("college.campus_name"), "Campus Name");
        assert_eq!(header_from_path("email"), "Email");
    }

    #[test]
    fn spec_settings_carry_into_columns() {
        let spec = ColumnSpec {
            path: Some("college.campus.name".to_string()),
            header: Some("Campus".to_string()),
            width: Some(30),
            sortable: Some(false),
            hidden: Some(true),
            ..ColumnSpec::new("campus")
        };

        let columns = columns_from_specs(&[spec]);
        let column = &columns[0];

        assert_eq!(column.id(), "campus");
        assert_eq!(column.header(), "Campus");
        assert_eq!(column.render_width(), 30);
        assert!(!column.is_sortable());
        assert!(column.is_hidden());
        assert_eq!(
            column.value(&records()[0]),
            CellValue::Text("North".to_string())
        );
        assert_eq!(column.value(&records()[1]), CellValue::Absent);
    }
}
