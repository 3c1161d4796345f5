//! Column descriptors.
//!
//! A column knows how to pull a [`CellValue`] out of a record, how to turn it into display
//! text, and whether it takes part in sorting and filtering. Columns carry closures rather
//! than implementing a per-record-type trait, so one record type can be shown through any
//! number of column sets.

use super::error::ConfigError;
use super::value::CellValue;
use std::collections::HashSet;
use std::fmt;

/// Extracts a value from a record. Must be pure.
pub type Accessor<T> = Box<dyn Fn(&T) -> CellValue>;

/// Renders a cell from the accessor output and the full record.
pub type CellRenderer<T> = Box<dyn Fn(&CellValue, &T) -> String>;

/// Column-specific text filter, overriding the default substring match.
pub type FilterFn<T> = Box<dyn Fn(&T, &str) -> bool>;

/// Default render width for a column, in terminal cells.
pub const DEFAULT_COLUMN_WIDTH: u16 = 16;

/// Declarative description of one table column.
///
/// ```
/// use recgrid::model::{CellValue, Column};
///
/// struct Campus { name: String, colleges: u32 }
///
/// let name = Column::new("name", "Name", |c: &Campus| CellValue::from(&c.name));
/// let colleges = Column::new("colleges", "Colleges", |c: &Campus| c.colleges.into())
///     .cell(|value, _| format!("{} colleges", value.display_text()))
///     .width(12);
/// # let _ = (name, colleges);
/// ```
pub struct Column<T> {
    id: String,
    header: String,
    accessor: Accessor<T>,
    cell: Option<CellRenderer<T>>,
    filter_fn: Option<FilterFn<T>>,
    sortable: bool,
    hidden: bool,
    width: u16,
}

impl<T> Column<T> {
    /// Create a sortable, visible column.
    pub fn new(
        id: impl Into<String>,
        header: impl Into<String>,
        accessor: impl Fn(&T) -> CellValue + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            accessor: Box::new(accessor),
            cell: None,
            filter_fn: None,
            sortable: true,
            hidden: false,
            width: DEFAULT_COLUMN_WIDTH,
        }
    }

    /// Custom cell rendering.
    pub fn cell(mut self, render: impl Fn(&CellValue, &T) -> String + 'static) -> Self {
        self.cell = Some(Box::new(render));
        self
    }

    /// Custom text filter used when this column is the search target.
    pub fn filter(mut self, filter: impl Fn(&T, &str) -> bool + 'static) -> Self {
        self.filter_fn = Some(Box::new(filter));
        self
    }

    /// Enable or disable sorting on this column.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Start hidden. Hidden columns still sort and filter.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Render width hint.
    pub fn width(mut self, width: u16) -> Self {
        self.width = width.max(1);
        self
    }

    /// Unique column id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Header label.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Whether the sort engine may pick this column.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Hidden columns still sort and filter but are not rendered.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Render width hint, or the default width.
    pub fn render_width(&self) -> u16 {
        self.width
    }

    /// Whether a custom `filter_fn` is set.
    pub fn has_filter(&self) -> bool {
        self.filter_fn.is_some()
    }

    /// Accessor output for a record.
    pub fn value(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }

    /// Display text for a record's cell.
    pub fn render(&self, row: &T) -> String {
        let value = self.value(row);
        match &self.cell {
            Some(render) => render(&value, row),
            None => value.display_text(),
        }
    }

    /// Whether `row` passes `query` for this column.
    ///
    /// A custom filter wins. Otherwise the accessor output is matched as a
    /// case-insensitive substring; an empty query matches everything.
    pub fn matches(&self, row: &T, query: &str) -> bool {
        if let Some(filter) = &self.filter_fn {
            return filter(row, query);
        }
        if query.is_empty() {
            return true;
        }
        contains_ignore_case(&self.value(row).display_text(), query)
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("hidden", &self.hidden)
            .field("width", &self.width)
            .field("has_filter", &self.filter_fn.is_some())
            .finish()
    }
}

/// Case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// An ordered, validated set of columns with an optional search target.
pub struct ColumnSet<T> {
    columns: Vec<Column<T>>,
    search_key: Option<usize>,
}

impl<T> ColumnSet<T> {
    /// Validate a column list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyColumnId`] or [`ConfigError::DuplicateColumn`].
    pub fn new(columns: Vec<Column<T>>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if column.id.trim().is_empty() {
                return Err(ConfigError::EmptyColumnId);
            }
            if !seen.insert(column.id.as_str()) {
                return Err(ConfigError::DuplicateColumn(column.id.clone()));
            }
        }
        Ok(Self {
            columns,
            search_key: None,
        })
    }

    /// Designate the free-text search target.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownSearchKey`] if no column has this id.
    pub fn with_search_key(mut self, key: &str) -> Result<Self, ConfigError> {
        let position = self
            .position(key)
            .ok_or_else(|| ConfigError::UnknownSearchKey(key.to_string()))?;
        self.search_key = Some(position);
        Ok(self)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Column<T>> {
        self.columns.iter()
    }

    /// Column by id.
    pub fn get(&self, id: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Declaration index of a column id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    /// The designated search column, if any.
    pub fn search_column(&self) -> Option<&Column<T>> {
        self.search_key.map(|i| &self.columns[i])
    }
}

impl<T> fmt::Debug for ColumnSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSet")
            .field("columns", &self.columns)
            .field(
                "search_key",
                &self.search_column().map(|c| c.id.as_str()),
            )
            .finish()
    }
}

#[cfg(test)]
#[path = "column_tests.rs"]
mod tests;
