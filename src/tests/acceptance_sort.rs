//! Acceptance tests: sorting by column and column visibility.

use crate::state::SortDirection;
use crate::test_harness::{ids, AcceptanceTestHarness, USERS_FIXTURE};
use crossterm::event::{KeyCode, KeyModifiers};

#[test]
fn digit_sorts_by_visible_column_ascending() {
    // GIVEN: users in file order
    let mut harness = AcceptanceTestHarness::from_fixture(USERS_FIXTURE).expect("fixture loads");

    // WHEN: user presses 5 (Score is the fifth column)
    harness.send_key(KeyCode::Char('5'));

    // THEN: lowest scores come first
    assert_eq!(
        harness.visible_ids(),
        ids(&[19, 11, 3, 22, 6, 25, 17, 9, 1, 20])
    );
    assert!(harness.render_to_string().contains("Score ▲"));
}

#[test]
fn missing_scores_sort_last_in_both_directions() {
    let mut harness = AcceptanceTestHarness::from_fixture(USERS_FIXTURE).expect("fixture loads");

    harness.send_key(KeyCode::Char('5'));
    harness.send_key(KeyCode::Char('G'));
    assert_eq!(harness.visible_ids(), ids(&[16, 8, 7, 14, 21]));

    harness.send_key(KeyCode::Char('5'));
    harness.send_key(KeyCode::Char('G'));
    assert_eq!(harness.visible_ids(), ids(&[11, 19, 7, 14, 21]));
}

#[test]
fn third_press_restores_input_order() {
    let mut harness = AcceptanceTestHarness::from_fixture(USERS_FIXTURE).expect("fixture loads");

    harness.send_key(KeyCode::Char('5'));
    harness.send_key(KeyCode::Char('5'));
    assert_eq!(
        harness.pane().table().sort().map(|s| s.direction),
        Some(SortDirection::Descending)
    );
    assert_eq!(harness.visible_ids()[..3], ids(&[8, 16, 24])[..]);

    harness.send_key(KeyCode::Char('5'));

    assert!(harness.pane().table().sort().is_none());
    assert_eq!(harness.visible_ids(), ids(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]));
}

#[test]
fn zero_clears_sort() {
    let mut harness = AcceptanceTestHarness::from_fixture(USERS_FIXTURE).expect("fixture loads");
    harness.send_key(KeyCode::Char('2'));
    assert!(harness.pane().table().sort().is_some());

    harness.send_key(KeyCode::Char('0'));

    assert!(harness.pane().table().sort().is_none());
}

#[test]
fn sorting_returns_to_first_page() {
    let mut harness = AcceptanceTestHarness::from_fixture(USERS_FIXTURE).expect("fixture loads");
    harness.send_key(KeyCode::Char('l'));

    harness.send_key(KeyCode::Char('2'));

    assert_eq!(harness.pane().table().view().page_index, 0);
}

#[test]
fn alt_digit_hides_and_shows_a_column() {
    // GIVEN: the Campus column is visible
    let mut harness = AcceptanceTestHarness::from_fixture(USERS_FIXTURE).expect("fixture loads");
    assert!(harness.render_to_string().contains("Campus"));

    // WHEN: Alt+4 toggles it off
    harness.send_key_with_mods(KeyCode::Char('4'), KeyModifiers::ALT);

    // THEN: header is gone and digit 4 now sorts Score
    assert!(!harness.render_to_string().contains("Campus"));
    harness.send_key(KeyCode::Char('4'));
    assert_eq!(
        harness.pane().table().sort().map(|s| s.column_id.as_str()),
        Some("score")
    );

    harness.send_key_with_mods(KeyCode::Char('4'), KeyModifiers::ALT);
    assert!(harness.render_to_string().contains("Campus"));
}
