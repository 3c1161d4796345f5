//! Wiring between loaded JSON records and the table engine.
//!
//! Builds the console's [`TablePane`] from the resolved configuration and
//! applies bulk requests to a snapshot. Both are pure so they can be tested
//! without a terminal.

use crate::config::{ColumnSpec, ResolvedConfig};
use crate::model::{CellValue, ConfigError, Record, RecordId};
use crate::source::{columns_from_specs, infer_column_specs, JsonRecord};
use crate::state::{BulkActionSlot, BulkRequest, DataTable, FieldFilterSlot, TablePane};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{info, warn};

/// Column ids searched by default, in order of preference.
const PREFERRED_SEARCH_KEYS: &[&str] = &["name", "title", "email"];

/// Field toggled by the `activate`/`deactivate` bulk actions.
pub const ACTIVE_FIELD: &str = "active";

/// Build the pane for a snapshot.
///
/// Columns come from the configuration, or are inferred from the records
/// when none are configured. Without an explicit search key a label-like
/// column (`name`, `title`, `email`) is searched, else the first
/// non-identity column holding text.
///
/// # Errors
///
/// Any [`ConfigError`] from the column set, search key or page sizes.
pub fn build_pane(
    config: &ResolvedConfig,
    records: Vec<JsonRecord>,
    source_name: &str,
) -> Result<TablePane<JsonRecord>, ConfigError> {
    let mut specs = if config.columns.is_empty() {
        infer_column_specs(&records, &config.id_field)
    } else {
        config.columns.clone()
    };
    if specs.is_empty() {
        specs.push(ColumnSpec::new(config.id_field.clone()));
    }

    let search_key = config
        .search_key
        .clone()
        .or_else(|| default_search_key(&specs, &records, &config.id_field));

    let source = source_name.to_string();
    let mut builder = DataTable::builder(columns_from_specs(&specs))
        .records(records)
        .page_size(config.page_size)
        .source(source_name)
        .on_remove(move |id: &RecordId| {
            info!(%id, source = %source, "record removed");
        });
    if let Some(key) = search_key {
        builder = builder.search_key(key);
    }
    if let Some(placeholder) = &config.search_placeholder {
        builder = builder.search_placeholder(placeholder.clone());
    }
    if let Some(rule) = &config.unselectable {
        let field = rule.field.clone();
        let value = rule.value.clone();
        builder = builder.selectable(move |r: &JsonRecord| r.get(&field).display_text() != value);
    }

    let mut pane =
        TablePane::new(builder.build()?).with_page_size_options(config.page_size_options.clone())?;
    if let Some(field) = &config.filter_field {
        let path = field.clone();
        pane = pane.with_filter_slot(FieldFilterSlot::new(
            format!("field:{field}"),
            field.clone(),
            move |r: &JsonRecord| r.get(&path),
        ));
    }
    if !config.bulk_actions.is_empty() {
        pane = pane.with_action_slot(BulkActionSlot::new("Bulk", config.bulk_actions.clone()));
    }
    Ok(pane)
}

/// A column named like a label, else the first non-identity text column.
fn default_search_key(specs: &[ColumnSpec], records: &[JsonRecord], id_field: &str) -> Option<String> {
    let candidates: Vec<&ColumnSpec> = specs.iter().filter(|s| s.field_path() != id_field).collect();
    PREFERRED_SEARCH_KEYS
        .iter()
        .find_map(|key| candidates.iter().find(|s| s.id == *key))
        .or_else(|| {
            candidates.iter().find(|s| {
                records
                    .iter()
                    .any(|r| matches!(r.get(s.field_path()), CellValue::Text(_)))
            })
        })
        .map(|s| s.id.clone())
}

/// Snapshot after a bulk action, plus a status line describing it.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkOutcome {
    /// Snapshot after the action.
    pub records: Vec<JsonRecord>,
    /// Status line describing what happened.
    pub message: String,
}

/// Apply `request` to `records`, producing the next snapshot.
///
/// - `archive`, `delete`: drop the requested records
/// - `activate`, `deactivate`: set [`ACTIVE_FIELD`] to `true`/`false`
///
/// Unknown actions leave the snapshot unchanged.
pub fn apply_bulk(records: &[JsonRecord], request: &BulkRequest) -> BulkOutcome {
    let ids: HashSet<RecordId> = request.ids.iter().cloned().collect();
    let touched = records.iter().filter(|r| ids.contains(&r.id())).count();

    let (records, verb) = match request.action.as_str() {
        "archive" | "delete" => (
            records
                .iter()
                .filter(|r| !ids.contains(&r.id()))
                .cloned()
                .collect(),
            if request.action == "archive" {
                "Archived"
            } else {
                "Deleted"
            },
        ),
        "activate" | "deactivate" => {
            let flag = request.action == "activate";
            (
                records
                    .iter()
                    .map(|r| {
                        if ids.contains(&r.id()) {
                            r.with_field(ACTIVE_FIELD, Value::Bool(flag))
                        } else {
                            r.clone()
                        }
                    })
                    .collect(),
                if flag { "Activated" } else { "Deactivated" },
            )
        }
        other => {
            warn!(action = other, "unknown bulk action");
            return BulkOutcome {
                records: records.to_vec(),
                message: format!("Unknown action: {other}"),
            };
        }
    };

    info!(action = %request.action, records = touched, "bulk action applied");
    BulkOutcome {
        records,
        message: format!("{verb} {touched} record(s)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnselectableRule;
    use crate::source::parse_records;

    const USERS: &str = r#"[
        {"id": 1, "name": "Ada", "role": "admin", "active": true},
        {"id": 2, "name": "Grace", "role": "member", "active": false},
        {"id": 3, "name": "Linus", "role": "member"}
    ]"#;

    fn users() -> Vec<JsonRecord> {
        parse_records(USERS, "users.json", "id").unwrap()
    }

    #[test]
    fn inferred_columns_start_with_identity() {
        let pane = build_pane(&ResolvedConfig::default(), users(), "users.json").unwrap();

        let ids: Vec<&str> = pane.table().columns().iter().map(|c| c.id()).collect();
        assert_eq!(ids[0], "id");
        assert!(ids.contains(&"name"));
        assert!(ids.contains(&"role"));
    }

    #[test]
    fn default_search_key_skips_identity() {
        let pane = build_pane(&ResolvedConfig::default(), users(), "users.json").unwrap();

        let key = pane.table().columns().search_column().map(|c| c.id().to_string());
        assert_eq!(key.as_deref(), Some("name"));
    }

    #[test]
    fn default_search_key_falls_back_to_first_text_column() {
        let records = parse_records(r#"[{"id": 1, "flag": true, "city": "Oslo"}]"#, "t", "id").unwrap();

        let pane = build_pane(&ResolvedConfig::default(), records, "t").unwrap();

        let key = pane.table().columns().search_column().map(|c| c.id().to_string());
        assert_eq!(key.as_deref(), Some("city"));
    }

    #[test]
    fn configured_columns_and_search_key_are_used() {
        let config = ResolvedConfig {
            columns: vec![ColumnSpec::new("id"), ColumnSpec::new("name")],
            search_key: Some("name".to_string()),
            ..ResolvedConfig::default()
        };
        let mut pane = build_pane(&config, users(), "users.json").unwrap();

        pane.table_mut().set_query("gra");

        let visible: Vec<RecordId> = pane.table().visible_records().iter().map(|r| r.id()).collect();
        assert_eq!(visible, vec![RecordId::Int(2)]);
    }

    #[test]
    fn unknown_search_key_is_a_config_error() {
        let config = ResolvedConfig {
            search_key: Some("nope".to_string()),
            ..ResolvedConfig::default()
        };

        let err = build_pane(&config, users(), "users.json").unwrap_err();

        assert_eq!(err, ConfigError::UnknownSearchKey("nope".to_string()));
    }

    #[test]
    fn empty_snapshot_still_has_identity_column() {
        let pane = build_pane(&ResolvedConfig::default(), Vec::new(), "empty.json").unwrap();

        assert_eq!(pane.table().columns().len(), 1);
        assert!(pane.table().view().is_empty());
    }

    #[test]
    fn unselectable_rule_blocks_matching_rows() {
        let config = ResolvedConfig {
            unselectable: Some(UnselectableRule {
                field: "role".to_string(),
                value: "admin".to_string(),
            }),
            ..ResolvedConfig::default()
        };
        let mut pane = build_pane(&config, users(), "users.json").unwrap();

        assert!(!pane.table_mut().toggle_selection(&RecordId::Int(1)));
        assert!(pane.table_mut().toggle_selection(&RecordId::Int(2)));
    }

    #[test]
    fn slots_follow_configuration() {
        let config = ResolvedConfig {
            filter_field: Some("role".to_string()),
            ..ResolvedConfig::default()
        };
        let pane = build_pane(&config, users(), "users.json").unwrap();
        assert!(pane.has_filter_slot());
        assert!(pane.has_action_slot());

        let bare = ResolvedConfig {
            bulk_actions: Vec::new(),
            ..ResolvedConfig::default()
        };
        let pane = build_pane(&bare, users(), "users.json").unwrap();
        assert!(!pane.has_filter_slot());
        assert!(!pane.has_action_slot());
    }

    #[test]
    fn archive_removes_requested_records() {
        let request = BulkRequest {
            action: "archive".to_string(),
            ids: vec![RecordId::Int(1), RecordId::Int(3)],
        };

        let outcome = apply_bulk(&users(), &request);

        let ids: Vec<RecordId> = outcome.records.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![RecordId::Int(2)]);
        assert_eq!(outcome.message, "Archived 2 record(s)");
    }

    #[test]
    fn activate_sets_flag_on_requested_records_only() {
        let request = BulkRequest {
            action: "activate".to_string(),
            ids: vec![RecordId::Int(2), RecordId::Int(3)],
        };

        let outcome = apply_bulk(&users(), &request);

        let flags: Vec<Option<&Value>> = outcome.records.iter().map(|r| r.raw(ACTIVE_FIELD)).collect();
        assert_eq!(
            flags,
            vec![
                Some(&Value::Bool(true)),
                Some(&Value::Bool(true)),
                Some(&Value::Bool(true))
            ]
        );
        assert_eq!(outcome.message, "Activated 2 record(s)");
    }

    #[test]
    fn deactivate_clears_flag() {
        let request = BulkRequest {
            action: "deactivate".to_string(),
            ids: vec![RecordId::Int(1)],
        };

        let outcome = apply_bulk(&users(), &request);

        assert_eq!(outcome.records[0].raw(ACTIVE_FIELD), Some(&Value::Bool(false)));
    }

    #[test]
    fn unknown_action_leaves_snapshot() {
        let request = BulkRequest {
            action: "launch".to_string(),
            ids: vec![RecordId::Int(1)],
        };

        let outcome = apply_bulk(&users(), &request);

        assert_eq!(outcome.records, users());
        assert_eq!(outcome.message, "Unknown action: launch");
    }
}
