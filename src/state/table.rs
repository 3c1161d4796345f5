//! The table engine.
//!
//! [`DataTable`] owns the ephemeral [`TableState`] for one rendered table and
//! an immutable snapshot of the caller's records. Every mutation runs to
//! completion, then [`DataTable::view`] recomputes the visible page from
//! scratch.

use super::matcher::{FilterSet, RowPredicate};
use super::pagination::{PageState, DEFAULT_PAGE_SIZE};
use super::selection::Selection;
use super::sort::{next_sort, SortState};
use super::view::{filtered_sorted, project, TableView};
use crate::model::{Column, ColumnSet, ConfigError, Record, RecordId, TableError};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Interaction state owned by one table instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    /// Free-text query against the search-key column.
    pub query: String,
    /// Active sort, or input order.
    pub sort: Option<SortState>,
    /// Page index and size.
    pub page: PageState,
    /// Selected identities.
    pub selection: Selection,
    /// Ids of columns not rendered. Hidden columns still sort and filter.
    pub hidden_columns: BTreeSet<String>,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            query: String::new(),
            sort: None,
            page: PageState::default(),
            selection: Selection::new(),
            hidden_columns: BTreeSet::new(),
        }
    }
}

impl TableState {
    /// Default state with a specific page size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroPageSize`] if `page_size` is 0.
    pub fn with_page_size(page_size: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            page: PageState::new(page_size)?,
            ..Self::default()
        })
    }
}

/// Decides whether a record may be selected (and shows a checkbox).
pub type SelectablePredicate<T> = Box<dyn Fn(&T) -> bool>;

/// Caller callback run when a record should leave the caller's dataset.
pub type RemoveHook = Box<dyn FnMut(&RecordId)>;

/// Builder for [`DataTable`].
pub struct DataTableBuilder<T> {
    columns: Vec<Column<T>>,
    records: Arc<[T]>,
    search_key: Option<String>,
    search_placeholder: Option<String>,
    page_size: usize,
    selectable: Option<SelectablePredicate<T>>,
    on_remove: Option<RemoveHook>,
    source: Option<String>,
}

impl<T: Record> DataTableBuilder<T> {
    /// Initial record snapshot.
    pub fn records(mut self, records: impl Into<Arc<[T]>>) -> Self {
        self.records = records.into();
        self
    }

    /// Column id used for free-text search.
    pub fn search_key(mut self, key: impl Into<String>) -> Self {
        self.search_key = Some(key.into());
        self
    }

    /// Placeholder shown in an empty search box.
    pub fn search_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.search_placeholder = Some(placeholder.into());
        self
    }

    /// Rows per page. Zero fails at build time.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Restrict which records can be selected. Default: all.
    pub fn selectable(mut self, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        self.selectable = Some(Box::new(predicate));
        self
    }

    /// Callback for [`DataTable::record_removed`].
    pub fn on_remove(mut self, hook: impl FnMut(&RecordId) + 'static) -> Self {
        self.on_remove = Some(Box::new(hook));
        self
    }

    /// Identity of the dataset source (e.g. the list being shown).
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Validate the configuration and create the table.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`]: duplicate or empty column ids, an unknown search key,
    /// or a zero page size.
    pub fn build(self) -> Result<DataTable<T>, ConfigError> {
        let mut columns = ColumnSet::new(self.columns)?;
        if let Some(key) = &self.search_key {
            columns = columns.with_search_key(key)?;
        }

        let mut state = TableState::with_page_size(self.page_size)?;
        state.hidden_columns = initially_hidden(&columns);

        let placeholder = self.search_placeholder.unwrap_or_else(|| {
            match columns.search_column() {
                Some(column) => format!("Filter {}...", column.header().to_lowercase()),
                None => "Filter...".to_string(),
            }
        });

        debug!(
            columns = columns.len(),
            records = self.records.len(),
            page_size = self.page_size,
            "table created"
        );

        Ok(DataTable {
            records: self.records,
            columns,
            filters: FilterSet::new(),
            state,
            default_page_size: self.page_size,
            selectable: self.selectable,
            on_remove: self.on_remove,
            source: self.source,
            search_placeholder: placeholder,
            loading: false,
        })
    }
}

fn initially_hidden<T>(columns: &ColumnSet<T>) -> BTreeSet<String> {
    columns
        .iter()
        .filter(|c| c.is_hidden())
        .map(|c| c.id().to_string())
        .collect()
}

/// A sortable, searchable, paginated, selectable view over a record snapshot.
pub struct DataTable<T> {
    records: Arc<[T]>,
    columns: ColumnSet<T>,
    filters: FilterSet<T>,
    state: TableState,
    default_page_size: usize,
    selectable: Option<SelectablePredicate<T>>,
    on_remove: Option<RemoveHook>,
    source: Option<String>,
    search_placeholder: String,
    loading: bool,
}

impl<T: Record> DataTable<T> {
    /// Start building a table over `columns`.
    pub fn builder(columns: Vec<Column<T>>) -> DataTableBuilder<T> {
        DataTableBuilder {
            columns,
            records: Arc::from(Vec::new()),
            search_key: None,
            search_placeholder: None,
            page_size: DEFAULT_PAGE_SIZE,
            selectable: None,
            on_remove: None,
            source: None,
        }
    }

    // ===== Accessors =====

    /// The current snapshot.
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Shared handle to the current snapshot.
    pub fn snapshot(&self) -> Arc<[T]> {
        Arc::clone(&self.records)
    }

    /// Column descriptors.
    pub fn columns(&self) -> &ColumnSet<T> {
        &self.columns
    }

    /// Columns that are rendered, in declaration order.
    pub fn visible_columns(&self) -> Vec<&Column<T>> {
        self.columns
            .iter()
            .filter(|c| !self.state.hidden_columns.contains(c.id()))
            .collect()
    }

    /// Interaction state.
    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Active slot filters.
    pub fn filters(&self) -> &FilterSet<T> {
        &self.filters
    }

    /// Current free-text query.
    pub fn query(&self) -> &str {
        &self.state.query
    }

    /// Active sort, if any.
    pub fn sort(&self) -> Option<&SortState> {
        self.state.sort.as_ref()
    }

    /// Dataset source identity.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Placeholder for the search bar.
    pub fn search_placeholder(&self) -> &str {
        &self.search_placeholder
    }

    /// Caller-owned loading flag. Mutually exclusive with the empty view.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Set by the caller while a fetch is in flight.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Whether `row` passes the selectable predicate.
    pub fn is_selectable(&self, row: &T) -> bool {
        self.selectable.as_ref().map_or(true, |p| p(row))
    }

    /// Find a record in the snapshot by identity.
    pub fn find(&self, id: &RecordId) -> Option<&T> {
        self.records.iter().find(|r| &r.id() == id)
    }

    // ===== Derived view =====

    /// Recompute the visible page.
    pub fn view(&self) -> TableView {
        let selectable = |row: &T| self.is_selectable(row);
        project(
            &self.records,
            &self.columns,
            &self.filters,
            &self.state,
            &selectable,
        )
    }

    /// Records on the visible page, in display order.
    pub fn visible_records(&self) -> Vec<&T> {
        self.view()
            .rows
            .iter()
            .map(|&i| &self.records[i])
            .collect()
    }

    /// Number of rows passing query and filters.
    pub fn filtered_len(&self) -> usize {
        filtered_sorted(&self.records, &self.columns, &self.filters, &self.state).len()
    }

    fn clamp_page(&mut self) {
        let len = self.filtered_len();
        self.state.page = self.state.page.clamped(len);
    }

    // ===== Search =====

    /// Replace the free-text query. Returns to the first page.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.state.query {
            return;
        }
        debug!(query = %query, "query changed");
        self.state.query = query;
        self.state.page = self.state.page.first();
    }

    // ===== Filters =====

    /// Add or replace a named predicate filter. Returns to the first page.
    pub fn set_filter(&mut self, name: impl Into<String>, predicate: impl Fn(&T) -> bool + 'static) {
        let name = name.into();
        let boxed: RowPredicate<T> = Box::new(predicate);
        let replaced = self.filters.set(name.clone(), boxed);
        debug!(filter = %name, replaced, "filter set");
        self.state.page = self.state.page.first();
    }

    /// Remove a named filter. Returns `true` if it was active.
    pub fn remove_filter(&mut self, name: &str) -> bool {
        let removed = self.filters.remove(name);
        if removed {
            debug!(filter = %name, "filter removed");
            self.state.page = self.state.page.first();
        }
        removed
    }

    /// Remove every slot filter and return to the first page.
    pub fn clear_filters(&mut self) {
        if !self.filters.is_empty() {
            self.filters.clear();
            self.state.page = self.state.page.first();
        }
    }

    // ===== Sorting =====

    /// Cycle sorting on `column_id`: `asc -> desc -> unsorted`.
    ///
    /// Returns the new sort state. Returns to the first page.
    ///
    /// # Errors
    ///
    /// [`TableError::UnknownColumn`] or [`TableError::NotSortable`].
    pub fn toggle_sort(&mut self, column_id: &str) -> Result<Option<SortState>, TableError> {
        self.sortable_column(column_id)?;
        self.state.sort = next_sort(self.state.sort.as_ref(), column_id);
        self.state.page = self.state.page.first();
        debug!(column = column_id, sort = ?self.state.sort, "sort toggled");
        Ok(self.state.sort.clone())
    }

    /// Set or clear the sort directly. Returns to the first page.
    ///
    /// # Errors
    ///
    /// [`TableError::UnknownColumn`] or [`TableError::NotSortable`].
    pub fn set_sort(&mut self, sort: Option<SortState>) -> Result<(), TableError> {
        if let Some(s) = &sort {
            self.sortable_column(&s.column_id)?;
        }
        self.state.sort = sort;
        self.state.page = self.state.page.first();
        Ok(())
    }

    fn sortable_column(&self, column_id: &str) -> Result<&Column<T>, TableError> {
        let column = self.columns.get(column_id).ok_or_else(|| {
            warn!(column = column_id, "sort requested on unknown column");
            TableError::UnknownColumn(column_id.to_string())
        })?;
        if !column.is_sortable() {
            warn!(column = column_id, "sort requested on unsortable column");
            return Err(TableError::NotSortable(column_id.to_string()));
        }
        Ok(column)
    }

    // ===== Pagination =====

    /// Advance one page, stopping at the last.
    pub fn next_page(&mut self) {
        let len = self.filtered_len();
        self.state.page = self.state.page.next(len);
    }

    /// Go back one page, stopping at the first.
    pub fn prev_page(&mut self) {
        self.state.page = self.state.page.prev();
    }

    /// Jump to the first page.
    pub fn first_page(&mut self) {
        self.state.page = self.state.page.first();
    }

    /// Jump to the last page.
    pub fn last_page(&mut self) {
        let len = self.filtered_len();
        self.state.page = self.state.page.last(len);
    }

    /// Jump to a page, clamped into range.
    pub fn set_page_index(&mut self, index: usize) {
        let len = self.filtered_len();
        self.state.page = self.state.page.with_index(index, len);
    }

    /// Change the page size, keeping the first visible row on screen.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroPageSize`] if `size` is 0.
    pub fn set_page_size(&mut self, size: usize) -> Result<(), ConfigError> {
        let len = self.filtered_len();
        self.state.page = self.state.page.resized(size, len)?;
        debug!(size, page = self.state.page.index(), "page size changed");
        Ok(())
    }

    // ===== Selection =====

    /// Whether `id` is selected.
    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.state.selection.is_selected(id)
    }

    /// Toggle one record. Returns `true` if it is now selected.
    ///
    /// Unknown or non-selectable records are left unselected.
    pub fn toggle_selection(&mut self, id: &RecordId) -> bool {
        let selectable = match self.find(id) {
            Some(row) => self.is_selectable(row),
            None => false,
        };
        if !selectable {
            return false;
        }
        self.state.selection.toggle(id)
    }

    /// Header-checkbox behaviour over the visible page only.
    ///
    /// Selects every selectable row on the page; if all of them are already
    /// selected, deselects them instead. Returns how many identities changed.
    pub fn select_all_visible(&mut self) -> usize {
        let view = self.view();
        let ids: Vec<RecordId> = view
            .rows
            .iter()
            .map(|&i| &self.records[i])
            .filter(|row| self.is_selectable(row))
            .map(|row| row.id())
            .collect();
        if ids.is_empty() {
            return 0;
        }
        if ids.iter().all(|id| self.state.selection.is_selected(id)) {
            self.state.selection.deselect_all(&ids)
        } else {
            self.state.selection.select_all(&ids)
        }
    }

    /// Clear the selection. Returns how many were deselected.
    pub fn clear_selection(&mut self) -> usize {
        self.state.selection.clear()
    }

    /// Selection state.
    pub fn selection(&self) -> &Selection {
        &self.state.selection
    }

    /// Selected identities in sorted order.
    pub fn selected_ids(&self) -> Vec<RecordId> {
        self.state.selection.to_vec()
    }

    /// Selected records in snapshot order.
    pub fn selected_records(&self) -> Vec<&T> {
        self.records
            .iter()
            .filter(|r| self.state.selection.is_selected(&r.id()))
            .collect()
    }

    // ===== Columns =====

    /// Show or hide a column. Returns `true` if it is now visible.
    ///
    /// # Errors
    ///
    /// [`TableError::UnknownColumn`].
    pub fn toggle_column_visibility(&mut self, column_id: &str) -> Result<bool, TableError> {
        if self.columns.get(column_id).is_none() {
            return Err(TableError::UnknownColumn(column_id.to_string()));
        }
        let visible = if self.state.hidden_columns.remove(column_id) {
            true
        } else {
            self.state.hidden_columns.insert(column_id.to_string());
            false
        };
        debug!(column = column_id, visible, "column visibility toggled");
        Ok(visible)
    }

    // ===== Dataset lifecycle =====

    /// Take a fresh snapshot from the same source (external refresh).
    ///
    /// Query, sort, filters and page size survive. Selections whose identity
    /// vanished or is no longer selectable are pruned and the page index is
    /// clamped.
    pub fn replace_records(&mut self, records: impl Into<Arc<[T]>>) {
        self.records = records.into();
        let present: HashSet<RecordId> = self
            .records
            .iter()
            .filter(|r| self.is_selectable(r))
            .map(Record::id)
            .collect();
        let pruned = self.state.selection.retain_present(&present);
        self.clamp_page();
        self.loading = false;
        debug!(records = self.records.len(), pruned, "records replaced");
    }

    /// Switch to a different dataset source, resetting all state to defaults.
    pub fn reset_source(&mut self, source: impl Into<String>, records: impl Into<Arc<[T]>>) {
        let source = source.into();
        debug!(from = ?self.source, to = %source, "dataset source changed");
        self.records = records.into();
        self.filters.clear();
        self.state = TableState {
            page: PageState::new(self.default_page_size).unwrap_or_default(),
            hidden_columns: initially_hidden(&self.columns),
            ..TableState::default()
        };
        self.source = Some(source);
        self.loading = false;
    }
}

impl<T: Record + Clone> DataTable<T> {
    /// An external delete/archive of `id` succeeded.
    ///
    /// Runs the caller's `on_remove` hook, then swaps in a snapshot without the
    /// record, prunes the selection and clamps the page. Returns `false` if no
    /// record had this identity.
    pub fn record_removed(&mut self, id: &RecordId) -> bool {
        if self.find(id).is_none() {
            return false;
        }
        if let Some(hook) = self.on_remove.as_mut() {
            hook(id);
        }
        let remaining: Vec<T> = self
            .records
            .iter()
            .filter(|r| &r.id() != id)
            .cloned()
            .collect();
        self.replace_records(remaining);
        true
    }
}

impl<T> fmt::Debug for DataTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("records", &self.records.len())
            .field("columns", &self.columns)
            .field("filters", &self.filters)
            .field("state", &self.state)
            .field("source", &self.source)
            .field("loading", &self.loading)
            .finish()
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
