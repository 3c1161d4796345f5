//! Acceptance tests: paging through the users table.

use crate::test_harness::{ids, AcceptanceTestHarness, USERS_FIXTURE};
use crossterm::event::KeyCode;

#[test]
fn first_page_shows_ten_rows_and_position() {
    let mut harness = AcceptanceTestHarness::from_fixture(USERS_FIXTURE).expect("fixture loads");

    assert_eq!(harness.visible_ids(), ids(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]));
    let screen = harness.render_to_string();
    assert!(screen.contains("Rows per page: 10"));
    assert!(screen.contains("Page 1 of 3"));
}

#[test]
fn next_and_previous_page() {
    let mut harness = AcceptanceTestHarness::from_fixture(USERS_FIXTURE).expect("fixture loads");

    harness.send_key(KeyCode::Char('l'));
    assert_eq!(harness.visible_ids()[0], ids(&[11])[0]);
    assert!(harness.render_to_string().contains("Page 2 of 3"));

    harness.send_key(KeyCode::PageUp);
    assert_eq!(harness.pane().table().view().page_index, 0);
}

#[test]
fn paging_stops_at_both_ends() {
    let mut harness = AcceptanceTestHarness::from_fixture(USERS_FIXTURE).expect("fixture loads");

    harness.send_key(KeyCode::Char('h'));
    assert_eq!(harness.pane().table().view().page_index, 0);

    harness.send_keys(&[KeyCode::Char('l'), KeyCode::Char('l'), KeyCode::Char('l')]);
    assert_eq!(harness.pane().table().view().page_index, 2);
    assert_eq!(harness.visible_ids(), ids(&[21, 22, 23, 24, 25]));
}

#[test]
fn last_and_first_page_keys() {
    let mut harness = AcceptanceTestHarness::from_fixture(USERS_FIXTURE).expect("fixture loads");

    harness.send_key(KeyCode::End);
    assert_eq!(harness.pane().table().view().page_index, 2);

    harness.send_key(KeyCode::Char('g'));
    assert_eq!(harness.pane().table().view().page_index, 0);
}

#[test]
fn page_size_cycles_through_options() {
    let mut harness = AcceptanceTestHarness::from_fixture(USERS_FIXTURE).expect("fixture loads");

    harness.send_key(KeyCode::Char('p'));
    assert_eq!(harness.visible_ids().len(), 20);
    assert!(harness.render_to_string().contains("Page 1 of 2"));

    harness.send_key(KeyCode::Char('p'));
    harness.send_key(KeyCode::Char('p'));
    harness.send_key(KeyCode::Char('p'));
    assert_eq!(harness.pane().table().view().page_size, 50);

    harness.send_key(KeyCode::Char('p'));
    assert_eq!(harness.pane().table().view().page_size, 10);
}

#[test]
fn narrowing_clamps_page_index() {
    // GIVEN: user is on page 3 of 3
    let mut harness = AcceptanceTestHarness::from_fixture(USERS_FIXTURE).expect("fixture loads");
    harness.send_key(KeyCode::Char('G'));
    assert_eq!(harness.pane().table().view().page_index, 2);

    // WHEN: filter bar narrows to the five admins
    harness.send_key(KeyCode::Char('f'));
    harness.send_key(KeyCode::Right);

    // THEN: the page falls back to the only remaining page
    let view = harness.pane().table().view();
    assert_eq!(view.page_index, 0);
    assert_eq!(view.page_count, 1);
    assert_eq!(harness.visible_ids(), ids(&[5, 10, 15, 20, 25]));
}

#[test]
fn cursor_moves_within_page() {
    let mut harness = AcceptanceTestHarness::from_fixture(USERS_FIXTURE).expect("fixture loads");

    harness.send_keys(&[KeyCode::Char('j'), KeyCode::Down, KeyCode::Char('k')]);
    assert_eq!(harness.pane().cursor(), 1);

    // Cursor cannot leave the page
    for _ in 0..20 {
        harness.send_key(KeyCode::Char('j'));
    }
    assert_eq!(harness.pane().cursor(), 9);

    harness.send_key(KeyCode::Char('l'));
    assert_eq!(harness.pane().cursor(), 0);
}
