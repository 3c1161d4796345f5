//! Table state machine (pure).
//!
//! All state transitions are pure functions testable without a terminal.

pub mod matcher;
pub mod pagination;
pub mod pane;
pub mod search_input_handler;
pub mod selection;
pub mod slots;
pub mod sort;
pub mod table;
pub mod view;

// Re-export for convenience
pub use matcher::{matches_query, matches_row, FilterSet, RowPredicate};
pub use pagination::{page_count, PageState, DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS};
pub use pane::{PaneAction, PaneFocus, TablePane};
pub use search_input_handler::SearchInput;
pub use selection::{header_check, HeaderCheck, Selection};
pub use slots::{
    BulkActionSlot, BulkRequest, FieldFilterSlot, SlotContext, SlotOutcome, TableHandle,
    TableSlot,
};
pub use sort::{compare_values, next_sort, sort_indices, SortDirection, SortState};
pub use table::{DataTable, DataTableBuilder, RemoveHook, SelectablePredicate, TableState};
pub use view::{filtered_sorted, project, TableView};
