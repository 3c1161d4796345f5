//! Action bar that hands the selection to the caller.

use super::{BulkRequest, SlotContext, SlotOutcome, TableHandle, TableSlot};
use crate::model::Record;
use crossterm::event::{KeyCode, KeyEvent};
use tracing::{debug, warn};

/// Offers a fixed list of bulk actions over the current selection.
///
/// Keys while focused: `→`/`l` and `←`/`h` pick an action, `Enter` emits a
/// [`BulkRequest`] for every selected identity.
pub struct BulkActionSlot {
    title: String,
    actions: Vec<String>,
    cursor: usize,
}

impl BulkActionSlot {
    /// Bar titled `title` offering `actions`.
    pub fn new(title: impl Into<String>, actions: Vec<String>) -> Self {
        Self {
            title: title.into(),
            actions,
            cursor: 0,
        }
    }

    /// Actions in display order.
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// The highlighted action, if any are configured.
    pub fn current(&self) -> Option<&str> {
        self.actions.get(self.cursor).map(String::as_str)
    }
}

impl<T: Record> TableSlot<T> for BulkActionSlot {
    fn title(&self) -> &str {
        &self.title
    }

    fn render(&self, ctx: &SlotContext<'_, T>) -> Vec<String> {
        let mut segments: Vec<String> = self
            .actions
            .iter()
            .enumerate()
            .map(|(i, action)| {
                if i == self.cursor {
                    format!("[{action}]")
                } else {
                    action.clone()
                }
            })
            .collect();
        segments.push(format!("({} selected)", ctx.view.selected_total));
        segments
    }

    fn handle_key(&mut self, key: KeyEvent, table: &mut TableHandle<'_, T>) -> SlotOutcome {
        if self.actions.is_empty() {
            return SlotOutcome::Ignored;
        }
        match key.code {
            KeyCode::Right | KeyCode::Char('l') => {
                self.cursor = (self.cursor + 1) % self.actions.len();
                SlotOutcome::Handled
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.cursor = (self.cursor + self.actions.len() - 1) % self.actions.len();
                SlotOutcome::Handled
            }
            KeyCode::Enter => {
                let ids = table.selected_ids();
                let Some(action) = self.current() else {
                    return SlotOutcome::Ignored;
                };
                if ids.is_empty() {
                    warn!(action, "bulk action with empty selection");
                    return SlotOutcome::Handled;
                }
                debug!(action, count = ids.len(), "bulk action requested");
                SlotOutcome::Bulk(BulkRequest {
                    action: action.to_string(),
                    ids,
                })
            }
            _ => SlotOutcome::Ignored,
        }
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }
}
