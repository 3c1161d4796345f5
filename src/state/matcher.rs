//! Row matching: free-text query plus caller-injected predicate filters.
//!
//! A record is visible iff it passes the text query AND every active filter.
//! Both halves are pure, so re-evaluating after a change to one filter only
//! changes the set implied by that filter.

use crate::model::ColumnSet;
use std::fmt;

/// A caller-supplied row predicate (e.g. a role or campus dropdown).
pub type RowPredicate<T> = Box<dyn Fn(&T) -> bool>;

/// Named predicate filters combined with logical AND.
///
/// Names keep filters independent: setting a filter under an existing name
/// replaces only that filter.
pub struct FilterSet<T> {
    filters: Vec<(String, RowPredicate<T>)>,
}

impl<T> Default for FilterSet<T> {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
        }
    }
}

impl<T> FilterSet<T> {
    /// Empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a filter. Returns `true` if one was replaced.
    pub fn set(&mut self, name: impl Into<String>, predicate: RowPredicate<T>) -> bool {
        let name = name.into();
        match self.filters.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => {
                slot.1 = predicate;
                true
            }
            None => {
                self.filters.push((name, predicate));
                false
            }
        }
    }

    /// Remove a filter by name. Returns `true` if it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.filters.len();
        self.filters.retain(|(n, _)| n != name);
        self.filters.len() != before
    }

    /// Remove every filter.
    pub fn clear(&mut self) {
        self.filters.clear();
    }

    /// Number of active filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// True when no filter is active.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Whether a filter with this name is active.
    pub fn contains(&self, name: &str) -> bool {
        self.filters.iter().any(|(n, _)| n == name)
    }

    /// Names of the active filters.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(|(n, _)| n.as_str())
    }

    /// Whether `row` passes every active filter.
    pub fn passes(&self, row: &T) -> bool {
        self.filters.iter().all(|(_, predicate)| predicate(row))
    }
}

impl<T> fmt::Debug for FilterSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Whether `row` passes the free-text `query`.
///
/// The query is matched against the search-key column only. An empty query,
/// or a table with no search key, matches every row.
pub fn matches_query<T>(columns: &ColumnSet<T>, row: &T, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    match columns.search_column() {
        Some(column) => column.matches(row, query),
        None => true,
    }
}

/// Full row test: text query AND slot filters.
pub fn matches_row<T>(columns: &ColumnSet<T>, filters: &FilterSet<T>, row: &T, query: &str) -> bool {
    matches_query(columns, row, query) && filters.passes(row)
}
