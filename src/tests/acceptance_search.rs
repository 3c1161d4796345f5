//! Acceptance tests: searching and filtering the users table.

use crate::test_harness::{ids, AcceptanceTestHarness, USERS_FIXTURE};
use crossterm::event::{KeyCode, KeyModifiers};

#[test]
fn typing_a_query_narrows_rows_live() {
    // GIVEN: the users table on page 1
    let mut harness = AcceptanceTestHarness::from_fixture(USERS_FIXTURE).expect("fixture loads");

    // WHEN: user starts a search and types part of a name
    harness.send_key(KeyCode::Char('/'));
    harness.type_text("grace");

    // THEN: only the matching row is visible, before Enter is pressed
    assert_eq!(harness.visible_ids(), ids(&[2]));
    assert_eq!(harness.pane().table().query(), "grace");
}

#[test]
fn search_is_case_insensitive_and_kept_on_enter() {
    let mut harness = AcceptanceTestHarness::from_fixture(USERS_FIXTURE).expect("fixture loads");

    harness.send_key(KeyCode::Char('/'));
    harness.type_text("LAMP");
    harness.send_key(KeyCode::Enter);

    assert_eq!(harness.visible_ids(), ids(&[25]));
    let screen = harness.render_to_string();
    assert!(screen.contains("LAMP"));
    assert!(screen.contains("Leslie Lamport"));
}

#[test]
fn escape_while_typing_clears_the_query() {
    let mut harness = AcceptanceTestHarness::from_fixture(USERS_FIXTURE).expect("fixture loads");
    harness.send_key(KeyCode::Char('/'));
    harness.type_text("grace");

    harness.send_key(KeyCode::Esc);

    assert_eq!(harness.pane().table().query(), "");
    assert_eq!(harness.pane().table().view().filtered_len, 25);
}

#[test]
fn query_change_returns_to_first_page() {
    // GIVEN: user is on page 2
    let mut harness = AcceptanceTestHarness::from_fixture(USERS_FIXTURE).expect("fixture loads");
    harness.send_key(KeyCode::Char('l'));
    assert_eq!(harness.pane().table().view().page_index, 1);

    // WHEN: a query is typed
    harness.send_key_with_mods(KeyCode::Char('f'), KeyModifiers::CONTROL);
    harness.type_text("a");

    // THEN: paging restarts at page 1
    assert_eq!(harness.pane().table().view().page_index, 0);
}

#[test]
fn no_match_shows_empty_state() {
    let mut harness = AcceptanceTestHarness::from_fixture(USERS_FIXTURE).expect("fixture loads");

    harness.send_key(KeyCode::Char('/'));
    harness.type_text("zzzz");
    harness.send_key(KeyCode::Enter);

    let screen = harness.render_to_string();
    assert!(screen.contains("No results."));
    assert!(screen.contains("0 of 0 row(s) selected."));
    assert!(screen.contains("Page 1 of 1"));
}

#[test]
fn filter_bar_and_search_combine() {
    // GIVEN: filter bar narrowed to admins
    let mut harness = AcceptanceTestHarness::from_fixture(USERS_FIXTURE).expect("fixture loads");
    harness.send_key(KeyCode::Char('f'));
    harness.send_key(KeyCode::Right);
    harness.send_key(KeyCode::Tab);
    assert_eq!(harness.visible_ids(), ids(&[5, 10, 15, 20, 25]));

    // WHEN: a query is added
    harness.send_key(KeyCode::Char('/'));
    harness.type_text("an");
    harness.send_key(KeyCode::Enter);

    // THEN: only admins whose name contains "an" remain
    assert_eq!(harness.visible_ids(), ids(&[10, 20]));
}

#[test]
fn filter_bar_cycles_roles_and_back_to_all() {
    let mut harness = AcceptanceTestHarness::from_fixture(USERS_FIXTURE).expect("fixture loads");
    harness.send_key(KeyCode::Char('f'));

    harness.send_key(KeyCode::Right);
    harness.send_key(KeyCode::Right);
    assert_eq!(harness.pane().table().view().filtered_len, 13);

    harness.send_key(KeyCode::Right);
    assert_eq!(harness.pane().table().view().filtered_len, 7);

    harness.send_key(KeyCode::Right);
    assert_eq!(harness.pane().table().view().filtered_len, 25);

    let screen = harness.render_to_string();
    assert!(screen.contains("[all]"));
}
