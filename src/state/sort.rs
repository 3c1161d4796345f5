//! Single-column stable sorting.
//!
//! Header clicks cycle `asc -> desc -> unsorted`. Unsorted is the caller's
//! input order. Absent values sort last in both directions.

use crate::model::{CellValue, Column};
use std::cmp::Ordering;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Header indicator glyph.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Active sort: one column, one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    /// Column being sorted.
    pub column_id: String,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortState {
    /// Ascending sort on `column_id`.
    pub fn ascending(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending sort on `column_id`.
    pub fn descending(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Next sort state after clicking `column_id`'s header.
///
/// Same column: `asc -> desc -> None`. Different column: starts at `asc`,
/// replacing the previous sort.
pub fn next_sort(current: Option<&SortState>, column_id: &str) -> Option<SortState> {
    match current {
        Some(s) if s.column_id == column_id => match s.direction {
            SortDirection::Ascending => Some(SortState::descending(column_id)),
            SortDirection::Descending => None,
        },
        _ => Some(SortState::ascending(column_id)),
    }
}

/// Compare two cell values for `direction`, keeping absent values last.
pub fn compare_values(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    match (a.is_absent(), b.is_absent()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = a.compare(b);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
    }
}

/// Stable-sort `indices` (positions into `records`) by `column`.
///
/// Each accessor runs once per record. Ties keep their incoming order.
pub fn sort_indices<T>(
    records: &[T],
    indices: &mut Vec<usize>,
    column: &Column<T>,
    direction: SortDirection,
) {
    let mut keyed: Vec<(usize, CellValue)> = indices
        .iter()
        .map(|&i| (i, column.value(&records[i])))
        .collect();
    keyed.sort_by(|a, b| compare_values(&a.1, &b.1, direction));
    indices.clear();
    indices.extend(keyed.into_iter().map(|(i, _)| i));
}

#[cfg(test)]
#[path = "sort_tests.rs"]
mod tests;
