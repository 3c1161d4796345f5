//! Derived view: the pure projection from table inputs to the visible page.
//!
//! `visible = paginate(sort(filter(records, query, filters), sort), page)`,
//! recomputed from scratch on every call. Nothing here caches, so the view can
//! never drift from the records or the state it was computed from.

use super::matcher::{matches_row, FilterSet};
use super::selection::{header_check, HeaderCheck};
use super::sort::sort_indices;
use super::table::TableState;
use crate::model::{ColumnSet, Record, RecordId};

/// The visible page plus the metadata needed to render pagination and
/// selection summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    /// Positions into the record snapshot, in display order, for this page.
    pub rows: Vec<usize>,
    /// Rows passing query and filters.
    pub filtered_len: usize,
    /// Rows in the snapshot.
    pub total_len: usize,
    /// Effective (clamped) page index.
    pub page_index: usize,
    /// Pages for the filtered rows, at least one.
    pub page_count: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Offset of `rows[0]` within the filtered sequence.
    pub first_row: usize,
    /// Selected identities among the rows passing query and filters.
    pub selected_count: usize,
    /// Selected identities across the whole snapshot, filtered out or not.
    pub selected_total: usize,
    /// "Select all" checkbox state for this page.
    pub header_check: HeaderCheck,
}

impl TableView {
    /// No rows to show (zero records or zero matches).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// "Page X of Y".
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page_index + 1, self.page_count)
    }

    /// "N of M row(s) selected."
    pub fn selection_label(&self) -> String {
        format!(
            "{} of {} row(s) selected.",
            self.selected_count, self.filtered_len
        )
    }

    /// Identities of the visible rows, in display order.
    pub fn row_ids<T: Record>(&self, records: &[T]) -> Vec<RecordId> {
        self.rows.iter().map(|&i| records[i].id()).collect()
    }
}

/// Positions of the rows passing query and filters, in sorted order.
///
/// A sort naming a column that no longer exists leaves input order.
pub fn filtered_sorted<T>(
    records: &[T],
    columns: &ColumnSet<T>,
    filters: &FilterSet<T>,
    state: &TableState,
) -> Vec<usize> {
    let mut indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, row)| matches_row(columns, filters, *row, &state.query))
        .map(|(i, _)| i)
        .collect();

    if let Some(sort) = &state.sort {
        if let Some(column) = columns.get(&sort.column_id) {
            sort_indices(records, &mut indices, column, sort.direction);
        }
    }

    indices
}

/// Project the inputs into the visible page.
pub fn project<T: Record>(
    records: &[T],
    columns: &ColumnSet<T>,
    filters: &FilterSet<T>,
    state: &TableState,
    selectable: &dyn Fn(&T) -> bool,
) -> TableView {
    let ordered = filtered_sorted(records, columns, filters, state);
    let filtered_len = ordered.len();
    let page = state.page.clamped(filtered_len);
    let range = page.range(filtered_len);
    let rows = ordered[range.clone()].to_vec();
    let selected_count = ordered
        .iter()
        .filter(|&&i| state.selection.is_selected(&records[i].id()))
        .count();

    let visible_selectable: Vec<RecordId> = rows
        .iter()
        .map(|&i| &records[i])
        .filter(|row| selectable(*row))
        .map(|row| row.id())
        .collect();

    TableView {
        header_check: header_check(&state.selection, &visible_selectable),
        rows,
        filtered_len,
        total_len: records.len(),
        page_index: page.index(),
        page_count: page.page_count(filtered_len),
        page_size: page.size(),
        first_row: range.start,
        selected_count,
        selected_total: state.selection.len(),
    }
}
