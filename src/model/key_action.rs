//! Domain-level keyboard actions independent of key bindings.

/// Table actions that configurable key bindings map to.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Row cursor
    /// Move the row cursor up. Default: k/↑
    RowUp,
    /// Move the row cursor down. Default: j/↓
    RowDown,

    // Pagination
    /// Next page. Default: l/→/Page Down
    NextPage,
    /// Previous page. Default: h/←/Page Up
    PrevPage,
    /// First page. Default: g/Home
    FirstPage,
    /// Last page. Default: G/End
    LastPage,
    /// Cycle through the configured page sizes. Default: p
    CyclePageSize,

    // Sorting and columns
    /// Cycle sort on the nth visible column (1-based). Default: 1-9
    SortColumn(usize),
    /// Clear sorting. Default: 0
    ClearSort,
    /// Show or hide the nth column (1-based). Default: Alt+1-9
    ToggleColumn(usize),

    // Selection
    /// Toggle selection of the row under the cursor. Default: Space
    ToggleSelect,
    /// Select (or deselect) every selectable row on the page. Default: a
    SelectAllVisible,
    /// Clear the selection. Default: x
    ClearSelection,

    // Search
    /// Start editing the search query. Default: //Ctrl+f
    StartSearch,
    /// Clear the search query. Default: Esc
    ClearSearch,

    // Slots
    /// Focus the filter bar. Default: f
    FocusFilterSlot,
    /// Focus the action bar. Default: b
    FocusActionSlot,

    // Row actions
    /// Open the row under the cursor. Default: Enter
    ActivateRow,
    /// Delete the row under the cursor. Default: d/Delete
    DeleteRow,

    // Application
    /// Reload records from the source. Default: r
    Refresh,
    /// Show help overlay. Default: ?
    Help,
    /// Exit. Default: q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Whether this action changes only the row cursor.
    pub fn is_cursor_motion(self) -> bool {
        matches!(self, KeyAction::RowUp | KeyAction::RowDown)
    }
}
