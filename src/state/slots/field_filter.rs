//! Filter bar that narrows rows to one value of a record field.

use super::{SlotContext, SlotOutcome, TableHandle, TableSlot};
use crate::model::{CellValue, Record};
use crossterm::event::{KeyCode, KeyEvent};
use std::collections::BTreeSet;
use std::rc::Rc;
use tracing::debug;

type FieldAccessor<T> = Rc<dyn Fn(&T) -> CellValue>;

/// Cycles through the distinct values of a field and filters rows to the
/// chosen one.
///
/// Keys while focused: `→`/`l` next value, `←`/`h` previous value,
/// `x`/`Backspace` back to all rows. Cycling past either end returns to
/// "all".
pub struct FieldFilterSlot<T> {
    name: String,
    title: String,
    accessor: FieldAccessor<T>,
    current: Option<String>,
}

impl<T: Record + 'static> FieldFilterSlot<T> {
    /// `name` keys the predicate in the table's filter set.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        accessor: impl Fn(&T) -> CellValue + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            accessor: Rc::new(accessor),
            current: None,
        }
    }

    /// The value rows are currently narrowed to.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Distinct non-empty display values across `records`, sorted.
    pub fn options(&self, records: &[T]) -> Vec<String> {
        records
            .iter()
            .map(|r| (self.accessor)(r).display_text())
            .filter(|v| !v.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn step(&self, options: &[String], forward: bool) -> Option<String> {
        if options.is_empty() {
            return None;
        }
        let position = self
            .current
            .as_ref()
            .and_then(|c| options.iter().position(|o| o == c));
        let next = match (position, forward) {
            (None, true) => Some(0),
            (None, false) => Some(options.len() - 1),
            (Some(i), true) if i + 1 < options.len() => Some(i + 1),
            (Some(i), false) if i > 0 => Some(i - 1),
            _ => None,
        };
        next.map(|i| options[i].clone())
    }

    fn apply(&mut self, value: Option<String>, table: &mut TableHandle<'_, T>) {
        debug!(filter = %self.name, value = ?value, "field filter changed");
        match &value {
            Some(v) => {
                let wanted = v.clone();
                let accessor = Rc::clone(&self.accessor);
                table.set_filter(self.name.clone(), move |row: &T| {
                    accessor(row).display_text() == wanted
                });
            }
            None => {
                table.remove_filter(&self.name);
            }
        }
        self.current = value;
    }
}

impl<T: Record + 'static> TableSlot<T> for FieldFilterSlot<T> {
    fn title(&self) -> &str {
        &self.title
    }

    fn render(&self, ctx: &SlotContext<'_, T>) -> Vec<String> {
        let mut segments = vec![if self.current.is_none() {
            "[all]".to_string()
        } else {
            "all".to_string()
        }];
        for option in self.options(ctx.table.records()) {
            if self.current.as_deref() == Some(option.as_str()) {
                segments.push(format!("[{option}]"));
            } else {
                segments.push(option);
            }
        }
        segments
    }

    fn handle_key(&mut self, key: KeyEvent, table: &mut TableHandle<'_, T>) -> SlotOutcome {
        let value = match key.code {
            KeyCode::Right | KeyCode::Char('l') => {
                let options = self.options(table.records());
                self.step(&options, true)
            }
            KeyCode::Left | KeyCode::Char('h') => {
                let options = self.options(table.records());
                self.step(&options, false)
            }
            KeyCode::Char('x') | KeyCode::Backspace => None,
            _ => return SlotOutcome::Ignored,
        };
        self.apply(value, table);
        SlotOutcome::Handled
    }

    fn reset(&mut self) {
        self.current = None;
    }
}
