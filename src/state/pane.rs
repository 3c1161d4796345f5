//! Interactive pane: one table, its slots, and keyboard routing.
//!
//! [`TablePane`] is the pure state machine behind the console. Key events go
//! in, [`PaneAction`]s come out; side effects such as deleting a record or
//! applying a bulk action belong to the caller.

use super::pagination::DEFAULT_PAGE_SIZE_OPTIONS;
use super::search_input_handler::{
    activate_search_input, handle_backspace, handle_char_input, handle_cursor_left,
    handle_cursor_right, handle_delete, handle_end, handle_home, submit_search, SearchInput,
};
use super::slots::{BulkRequest, SlotContext, SlotOutcome, TableHandle, TableSlot};
use super::table::DataTable;
use super::view::TableView;
use crate::config::KeyBindings;
use crate::model::{ConfigError, KeyAction, Record, RecordId};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Which part of the pane receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaneFocus {
    /// Row navigation and table keys.
    #[default]
    Table,
    /// Typing into the search bar.
    Search,
    /// Keys go to the filter slot.
    FilterSlot,
    /// Keys go to the action slot.
    ActionSlot,
}

/// What the caller should do after a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaneAction {
    /// Nothing changed.
    None,
    /// State changed; repaint.
    Redraw,
    /// The row under the cursor was opened.
    Activated(RecordId),
    /// The user asked to delete the row under the cursor.
    DeleteRequested(RecordId),
    /// A slot handed over the selection.
    Bulk(BulkRequest),
    /// Reload the records.
    Refresh,
    /// Open the help overlay.
    ToggleHelp,
    /// Leave the console.
    Quit,
}

/// A [`DataTable`] plus its optional filter and action slots.
pub struct TablePane<T> {
    table: DataTable<T>,
    filter_slot: Option<Box<dyn TableSlot<T>>>,
    action_slot: Option<Box<dyn TableSlot<T>>>,
    focus: PaneFocus,
    search: SearchInput,
    cursor: usize,
    page_size_options: Vec<usize>,
}

impl<T: Record> TablePane<T> {
    /// Pane around `table`, focused on the table.
    pub fn new(table: DataTable<T>) -> Self {
        Self {
            table,
            filter_slot: None,
            action_slot: None,
            focus: PaneFocus::Table,
            search: SearchInput::Idle,
            cursor: 0,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
        }
    }

    /// Attach a filter bar.
    pub fn with_filter_slot(mut self, slot: impl TableSlot<T> + 'static) -> Self {
        self.filter_slot = Some(Box::new(slot));
        self
    }

    /// Attach an action bar.
    pub fn with_action_slot(mut self, slot: impl TableSlot<T> + 'static) -> Self {
        self.action_slot = Some(Box::new(slot));
        self
    }

    /// Page sizes offered by [`KeyAction::CyclePageSize`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroPageSize`] if the list is empty or contains 0.
    pub fn with_page_size_options(mut self, options: Vec<usize>) -> Result<Self, ConfigError> {
        if options.is_empty() || options.contains(&0) {
            return Err(ConfigError::ZeroPageSize);
        }
        self.page_size_options = options;
        Ok(self)
    }

    // ===== Accessors =====

    /// The underlying table.
    pub fn table(&self) -> &DataTable<T> {
        &self.table
    }

    /// Mutable access to the underlying table.
    pub fn table_mut(&mut self) -> &mut DataTable<T> {
        &mut self.table
    }

    /// Which part of the pane receives keys.
    pub fn focus(&self) -> PaneFocus {
        self.focus
    }

    /// Search bar input state.
    pub fn search(&self) -> &SearchInput {
        &self.search
    }

    /// Row cursor within the visible page.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Sizes the page-size selector cycles through.
    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    /// Whether a filter bar is attached.
    pub fn has_filter_slot(&self) -> bool {
        self.filter_slot.is_some()
    }

    /// Whether an action bar is attached.
    pub fn has_action_slot(&self) -> bool {
        self.action_slot.is_some()
    }

    /// Title and rendered segments of the filter slot.
    pub fn filter_slot_segments(&self, view: &TableView) -> Option<(String, Vec<String>)> {
        self.filter_slot
            .as_ref()
            .map(|slot| render_slot(slot.as_ref(), &self.table, view))
    }

    /// Title and rendered segments of the action slot.
    pub fn action_slot_segments(&self, view: &TableView) -> Option<(String, Vec<String>)> {
        self.action_slot
            .as_ref()
            .map(|slot| render_slot(slot.as_ref(), &self.table, view))
    }

    /// Identity of the row under the cursor.
    pub fn current_id(&self) -> Option<RecordId> {
        let view = self.table.view();
        view.rows
            .get(self.cursor)
            .map(|&i| self.table.records()[i].id())
    }

    // ===== Dataset lifecycle =====

    /// Same source, fresh snapshot.
    pub fn replace_records(&mut self, records: impl Into<Arc<[T]>>) {
        self.table.replace_records(records);
        self.clamp_cursor();
    }

    /// New source: table state and slot state go back to defaults.
    pub fn reset_source(&mut self, source: impl Into<String>, records: impl Into<Arc<[T]>>) {
        self.table.reset_source(source, records);
        if let Some(slot) = self.filter_slot.as_mut() {
            slot.reset();
        }
        if let Some(slot) = self.action_slot.as_mut() {
            slot.reset();
        }
        self.search = SearchInput::Idle;
        self.focus = PaneFocus::Table;
        self.cursor = 0;
    }

    fn clamp_cursor(&mut self) {
        let rows = self.table.view().rows.len();
        self.cursor = self.cursor.min(rows.saturating_sub(1));
    }

    // ===== Key routing =====

    /// Route one key event according to the current focus.
    pub fn handle_key(&mut self, key: KeyEvent, bindings: &KeyBindings) -> PaneAction {
        let action = match self.focus {
            PaneFocus::Search => self.handle_search_key(key),
            PaneFocus::FilterSlot | PaneFocus::ActionSlot => self.handle_slot_key(key),
            PaneFocus::Table => match bindings.get(key) {
                Some(action) => self.apply(action),
                None => PaneAction::None,
            },
        };
        self.clamp_cursor();
        action
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> PaneAction {
        let search = std::mem::take(&mut self.search);
        self.search = match key.code {
            KeyCode::Enter => {
                self.focus = PaneFocus::Table;
                submit_search(search)
            }
            KeyCode::Esc => {
                self.focus = PaneFocus::Table;
                self.table.set_query("");
                self.cursor = 0;
                return PaneAction::Redraw;
            }
            KeyCode::Backspace => handle_backspace(search),
            KeyCode::Delete => handle_delete(search),
            KeyCode::Left => handle_cursor_left(search),
            KeyCode::Right => handle_cursor_right(search),
            KeyCode::Home => handle_home(search),
            KeyCode::End => handle_end(search),
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                handle_char_input(search, ch)
            }
            _ => search,
        };
        if let Some(query) = self.search.query() {
            if query != self.table.query() {
                let query = query.to_string();
                self.table.set_query(query);
                self.cursor = 0;
            }
        }
        PaneAction::Redraw
    }

    fn handle_slot_key(&mut self, key: KeyEvent) -> PaneAction {
        if matches!(key.code, KeyCode::Esc | KeyCode::Tab) {
            self.focus = PaneFocus::Table;
            return PaneAction::Redraw;
        }
        let slot = match self.focus {
            PaneFocus::FilterSlot => self.filter_slot.as_mut(),
            PaneFocus::ActionSlot => self.action_slot.as_mut(),
            _ => None,
        };
        let Some(slot) = slot else {
            self.focus = PaneFocus::Table;
            return PaneAction::Redraw;
        };
        let mut handle = TableHandle::new(&mut self.table);
        match slot.handle_key(key, &mut handle) {
            SlotOutcome::Ignored => PaneAction::None,
            SlotOutcome::Handled => PaneAction::Redraw,
            SlotOutcome::Bulk(request) => PaneAction::Bulk(request),
        }
    }

    /// Apply a table-focus action.
    pub fn apply(&mut self, action: KeyAction) -> PaneAction {
        debug!(?action, "pane action");
        match action {
            KeyAction::RowUp => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyAction::RowDown => {
                self.cursor += 1;
            }
            KeyAction::NextPage => {
                self.table.next_page();
                self.cursor = 0;
            }
            KeyAction::PrevPage => {
                self.table.prev_page();
                self.cursor = 0;
            }
            KeyAction::FirstPage => {
                self.table.first_page();
                self.cursor = 0;
            }
            KeyAction::LastPage => {
                self.table.last_page();
                self.cursor = 0;
            }
            KeyAction::CyclePageSize => {
                let next = self.next_page_size();
                // Options are validated non-zero.
                if self.table.set_page_size(next).is_err() {
                    return PaneAction::None;
                }
                self.cursor = 0;
            }
            KeyAction::SortColumn(n) => {
                let Some(id) = self.visible_column_id(n) else {
                    return PaneAction::None;
                };
                if self.table.toggle_sort(&id).is_err() {
                    return PaneAction::None;
                }
                self.cursor = 0;
            }
            KeyAction::ClearSort => {
                if self.table.sort().is_none() {
                    return PaneAction::None;
                }
                if self.table.set_sort(None).is_err() {
                    return PaneAction::None;
                }
                self.cursor = 0;
            }
            KeyAction::ToggleColumn(n) => {
                let Some(id) = self.column_id(n) else {
                    return PaneAction::None;
                };
                if self.table.toggle_column_visibility(&id).is_err() {
                    return PaneAction::None;
                }
            }
            KeyAction::ToggleSelect => {
                let Some(id) = self.current_id() else {
                    return PaneAction::None;
                };
                self.table.toggle_selection(&id);
            }
            KeyAction::SelectAllVisible => {
                self.table.select_all_visible();
            }
            KeyAction::ClearSelection => {
                self.table.clear_selection();
            }
            KeyAction::StartSearch => {
                let search = std::mem::take(&mut self.search);
                self.search = activate_search_input(search, self.table.query());
                self.focus = PaneFocus::Search;
            }
            KeyAction::ClearSearch => {
                if self.table.query().is_empty() {
                    return PaneAction::None;
                }
                self.table.set_query("");
                self.cursor = 0;
            }
            KeyAction::FocusFilterSlot => {
                if self.filter_slot.is_none() {
                    return PaneAction::None;
                }
                self.focus = PaneFocus::FilterSlot;
            }
            KeyAction::FocusActionSlot => {
                if self.action_slot.is_none() {
                    return PaneAction::None;
                }
                self.focus = PaneFocus::ActionSlot;
            }
            KeyAction::ActivateRow => {
                return self
                    .current_id()
                    .map_or(PaneAction::None, PaneAction::Activated);
            }
            KeyAction::DeleteRow => {
                return self
                    .current_id()
                    .map_or(PaneAction::None, PaneAction::DeleteRequested);
            }
            KeyAction::Refresh => return PaneAction::Refresh,
            KeyAction::Help => return PaneAction::ToggleHelp,
            KeyAction::Quit => return PaneAction::Quit,
        }
        PaneAction::Redraw
    }

    fn next_page_size(&self) -> usize {
        let current = self.table.state().page.size();
        match self.page_size_options.iter().position(|&s| s == current) {
            Some(i) => self.page_size_options[(i + 1) % self.page_size_options.len()],
            None => self.page_size_options[0],
        }
    }

    /// Id of the nth (1-based) rendered column.
    fn visible_column_id(&self, n: usize) -> Option<String> {
        let index = n.checked_sub(1)?;
        self.table
            .visible_columns()
            .get(index)
            .map(|c| c.id().to_string())
    }

    /// Id of the nth (1-based) declared column, hidden or not.
    fn column_id(&self, n: usize) -> Option<String> {
        let index = n.checked_sub(1)?;
        self.table
            .columns()
            .iter()
            .nth(index)
            .map(|c| c.id().to_string())
    }
}

impl<T: Record + Clone> TablePane<T> {
    /// Forward an external delete to the table, keeping the cursor on the page.
    pub fn record_removed(&mut self, id: &RecordId) -> bool {
        let removed = self.table.record_removed(id);
        self.clamp_cursor();
        removed
    }
}

fn render_slot<T>(
    slot: &dyn TableSlot<T>,
    table: &DataTable<T>,
    view: &TableView,
) -> (String, Vec<String>) {
    let ctx = SlotContext { table, view };
    (slot.title().to_string(), slot.render(&ctx))
}

impl<T> fmt::Debug for TablePane<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TablePane")
            .field("table", &self.table)
            .field("focus", &self.focus)
            .field("search", &self.search)
            .field("cursor", &self.cursor)
            .field("page_size_options", &self.page_size_options)
            .finish()
    }
}

#[cfg(test)]
#[path = "pane_tests.rs"]
mod tests;
