//! Composition slots: caller-supplied decorations around a table.
//!
//! A slot (filter bar, bulk-action bar, ...) sees the table through a
//! [`TableHandle`]. It can read records and the selection, push named
//! predicates into the row matcher and trigger selection operations. It
//! cannot reorder or hide rows any other way.

mod bulk_action;
mod field_filter;

pub use bulk_action::BulkActionSlot;
pub use field_filter::FieldFilterSlot;

use super::table::DataTable;
use super::view::TableView;
use crate::model::{Record, RecordId};
use crossterm::event::KeyEvent;

/// A request to apply `action` to a set of records, handed to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkRequest {
    /// Action name, e.g. `archive`.
    pub action: String,
    /// Identities the action applies to.
    pub ids: Vec<RecordId>,
}

/// Result of offering a key to a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotOutcome {
    /// The slot did not use the key.
    Ignored,
    /// The slot consumed the key and may have changed the table.
    Handled,
    /// The slot asks the caller to apply a bulk action.
    Bulk(BulkRequest),
}

/// Read-only view handed to [`TableSlot::render`].
pub struct SlotContext<'a, T> {
    /// Table being rendered.
    pub table: &'a DataTable<T>,
    /// Projection of the current page.
    pub view: &'a TableView,
}

/// The slot-facing surface of a [`DataTable`].
pub struct TableHandle<'a, T> {
    table: &'a mut DataTable<T>,
}

impl<'a, T: Record> TableHandle<'a, T> {
    /// Handle over `table`.
    pub fn new(table: &'a mut DataTable<T>) -> Self {
        Self { table }
    }

    /// The current snapshot.
    pub fn records(&self) -> &[T] {
        self.table.records()
    }

    /// Rows on the current page.
    pub fn visible_records(&self) -> Vec<&T> {
        self.table.visible_records()
    }

    /// Selected identities in sorted order.
    pub fn selected_ids(&self) -> Vec<RecordId> {
        self.table.selected_ids()
    }

    /// Selected records in snapshot order.
    pub fn selected_records(&self) -> Vec<&T> {
        self.table.selected_records()
    }

    /// Number of selected identities.
    pub fn selection_len(&self) -> usize {
        self.table.selection().len()
    }

    /// Whether `id` is selected.
    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.table.is_selected(id)
    }

    /// Add or replace a named filter.
    pub fn set_filter(&mut self, name: impl Into<String>, predicate: impl Fn(&T) -> bool + 'static) {
        self.table.set_filter(name, predicate);
    }

    /// Remove a named filter.
    pub fn remove_filter(&mut self, name: &str) -> bool {
        self.table.remove_filter(name)
    }

    /// Remove every filter.
    pub fn clear_filters(&mut self) {
        self.table.clear_filters();
    }

    /// Toggle selection of one row.
    pub fn toggle(&mut self, id: &RecordId) -> bool {
        self.table.toggle_selection(id)
    }

    /// Select or deselect the visible page.
    pub fn select_all_visible(&mut self) -> usize {
        self.table.select_all_visible()
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) -> usize {
        self.table.clear_selection()
    }
}

/// An externally supplied decoration rendered next to the table.
pub trait TableSlot<T> {
    /// Short label shown before the slot's content.
    fn title(&self) -> &str;

    /// Text segments to display, in order.
    fn render(&self, ctx: &SlotContext<'_, T>) -> Vec<String>;

    /// Offer a key while the slot has focus.
    fn handle_key(&mut self, key: KeyEvent, table: &mut TableHandle<'_, T>) -> SlotOutcome;

    /// Forget slot-local state after the dataset source changed.
    fn reset(&mut self) {}
}

#[cfg(test)]
#[path = "slots_tests.rs"]
mod tests;
