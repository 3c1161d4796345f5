//! Tests for the sort engine.

use super::*;

#[derive(Debug, Clone)]
struct Row {
    id: i64,
    v: Option<i64>,
}

fn rows(values: &[(i64, Option<i64>)]) -> Vec<Row> {
    values.iter().map(|&(id, v)| Row { id, v }).collect()
}

fn v_column() -> Column<Row> {
    Column::new("v", "V", |r: &Row| r.v.into())
}

fn sorted_ids(records: &[Row], direction: SortDirection) -> Vec<i64> {
    let mut indices: Vec<usize> = (0..records.len()).collect();
    sort_indices(records, &mut indices, &v_column(), direction);
    indices.iter().map(|&i| records[i].id).collect()
}

// ===== Stability =====

#[test]
fn equal_values_keep_input_order_ascending() {
    let records = rows(&[(1, Some(5)), (2, Some(5)), (3, Some(1))]);

    assert_eq!(sorted_ids(&records, SortDirection::Ascending), vec![3, 1, 2]);
}

#[test]
fn equal_values_keep_input_order_descending() {
    let records = rows(&[(1, Some(5)), (2, Some(5)), (3, Some(1))]);

    assert_eq!(sorted_ids(&records, SortDirection::Descending), vec![1, 2, 3]);
}

// ===== Absent values =====

#[test]
fn absent_values_sort_last_in_both_directions() {
    let records = rows(&[(1, None), (2, Some(3)), (3, Some(7)), (4, None)]);

    assert_eq!(sorted_ids(&records, SortDirection::Ascending), vec![2, 3, 1, 4]);
    assert_eq!(sorted_ids(&records, SortDirection::Descending), vec![3, 2, 1, 4]);
}

#[test]
fn compare_values_orders_absent_after_present() {
    let present = CellValue::Int(1);

    assert_eq!(
        compare_values(&CellValue::Absent, &present, SortDirection::Descending),
        Ordering::Greater
    );
    assert_eq!(
        compare_values(&CellValue::Absent, &CellValue::Absent, SortDirection::Ascending),
        Ordering::Equal
    );
}

// ===== Toggle cycle =====

#[test]
fn same_column_cycles_asc_desc_none() {
    let first = next_sort(None, "name");
    assert_eq!(first, Some(SortState::ascending("name")));

    let second = next_sort(first.as_ref(), "name");
    assert_eq!(second, Some(SortState::descending("name")));

    let third = next_sort(second.as_ref(), "name");
    assert_eq!(third, None);
}

#[test]
fn different_column_starts_ascending() {
    let current = SortState::descending("name");

    assert_eq!(
        next_sort(Some(&current), "email"),
        Some(SortState::ascending("email"))
    );
}

#[test]
fn sorting_a_subset_only_reorders_given_indices() {
    let records = rows(&[(1, Some(9)), (2, Some(1)), (3, Some(5))]);
    let mut indices = vec![0, 2];

    sort_indices(&records, &mut indices, &v_column(), SortDirection::Ascending);

    assert_eq!(indices, vec![2, 0]);
}
