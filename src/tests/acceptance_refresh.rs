//! Acceptance tests: reloading the snapshot from its file.

use crate::model::RecordId;
use crate::test_harness::{users_config, AcceptanceTestHarness};
use crossterm::event::KeyCode;
use std::fs;
use std::path::PathBuf;

fn temp_fixture(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("recgrid_{name}.json"));
    fs::write(&path, contents).expect("write fixture");
    path
}

fn records(count: i64) -> String {
    let items: Vec<String> = (1..=count)
        .map(|i| format!(r#"{{"id": {i}, "name": "user {i}", "role": "member"}}"#))
        .collect();
    format!("[{}]", items.join(","))
}

#[test]
fn refresh_picks_up_new_records_and_keeps_state() {
    // GIVEN: 12 records, page 2, record 11 selected
    let path = temp_fixture("refresh_new", &records(12));
    let mut harness =
        AcceptanceTestHarness::from_fixture_with_config(path.to_str().unwrap(), &users_config(), 80, 24)
            .expect("fixture loads");
    harness.send_key(KeyCode::Char('l'));
    harness.send_key(KeyCode::Char(' '));

    // WHEN: the file grows and the user refreshes
    fs::write(&path, records(15)).unwrap();
    harness.send_key(KeyCode::Char('r'));

    // THEN: the new rows appear; page and selection stay
    let table = harness.pane().table();
    assert_eq!(table.records().len(), 15);
    assert_eq!(table.view().page_index, 1);
    assert!(table.is_selected(&RecordId::Int(11)));
    assert!(!table.is_loading());
    assert_eq!(harness.status(), Some("Reloaded 15 record(s)"));
    fs::remove_file(path).ok();
}

#[test]
fn refresh_prunes_vanished_selection_and_clamps_page() {
    let path = temp_fixture("refresh_shrink", &records(12));
    let mut harness =
        AcceptanceTestHarness::from_fixture_with_config(path.to_str().unwrap(), &users_config(), 80, 24)
            .expect("fixture loads");
    harness.send_key(KeyCode::Char('l'));
    harness.send_key(KeyCode::Char(' '));

    fs::write(&path, records(5)).unwrap();
    harness.send_key(KeyCode::Char('r'));

    let table = harness.pane().table();
    assert!(table.selection().is_empty());
    assert_eq!(table.view().page_index, 0);
    fs::remove_file(path).ok();
}

#[test]
fn failed_refresh_keeps_old_snapshot() {
    let path = temp_fixture("refresh_broken", &records(3));
    let mut harness =
        AcceptanceTestHarness::from_fixture_with_config(path.to_str().unwrap(), &users_config(), 80, 24)
            .expect("fixture loads");

    fs::write(&path, "[{").unwrap();
    harness.send_key(KeyCode::Char('r'));

    assert_eq!(harness.pane().table().records().len(), 3);
    assert!(!harness.pane().table().is_loading());
    assert!(harness.status().unwrap_or_default().starts_with("Reload failed"));
    fs::remove_file(path).ok();
}
