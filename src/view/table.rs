//! Table widget: the visible page with checkbox column and sort indicators.

use super::constants::CHECKBOX_WIDTH;
use super::helpers::truncate_to_width;
use super::styles::TableStyles;
use crate::model::Record;
use crate::state::{DataTable, TableView};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget},
};

/// Header texts: the page checkbox, then each visible column with its
/// sort indicator.
pub fn header_cells<T: Record>(table: &DataTable<T>, view: &TableView) -> Vec<String> {
    let mut cells = vec![view.header_check.glyph().to_string()];
    let sort = table.sort();
    for column in table.visible_columns() {
        let label = match sort {
            Some(s) if s.column_id == column.id() => {
                format!("{} {}", column.header(), s.direction.indicator())
            }
            _ => column.header().to_string(),
        };
        cells.push(label);
    }
    cells
}

/// Cell texts for one record: its checkbox, then each visible column.
///
/// Rows that cannot be selected get a blank checkbox.
pub fn row_cells<T: Record>(table: &DataTable<T>, row: &T) -> Vec<String> {
    let checkbox = if !table.is_selectable(row) {
        "   "
    } else if table.is_selected(&row.id()) {
        "[x]"
    } else {
        "[ ]"
    };
    let mut cells = vec![checkbox.to_string()];
    cells.extend(table.visible_columns().iter().map(|c| c.render(row)));
    cells
}

/// Renders one page of a [`DataTable`].
pub struct TableWidget<'a, T> {
    table: &'a DataTable<T>,
    view: &'a TableView,
    cursor: Option<usize>,
    styles: TableStyles,
}

impl<'a, T: Record> TableWidget<'a, T> {
    /// Widget for one page of `table` as projected in `view`.
    pub fn new(table: &'a DataTable<T>, view: &'a TableView) -> Self {
        Self {
            table,
            view,
            cursor: None,
            styles: TableStyles::default(),
        }
    }

    /// Highlight the row at this position within the page.
    pub fn cursor(mut self, cursor: Option<usize>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Override the default styles.
    pub fn styles(mut self, styles: TableStyles) -> Self {
        self.styles = styles;
        self
    }

    fn title(&self) -> String {
        match self.table.source() {
            Some(source) => format!(" {} ({}) ", source, self.view.total_len),
            None => format!(" Records ({}) ", self.view.total_len),
        }
    }
}

impl<T: Record> Widget for TableWidget<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL).title(self.title());

        if self.table.is_loading() || self.view.is_empty() {
            let message = if self.table.is_loading() {
                "Loading..."
            } else {
                "No results."
            };
            let inner = block.inner(area);
            block.render(area, buf);
            if inner.height == 0 {
                return;
            }
            // Header stays visible above the message.
            let header_area = Rect { height: 1, ..inner };
            let body_area = Rect {
                y: inner.y + 1,
                height: inner.height.saturating_sub(1),
                ..inner
            };
            Table::new(Vec::<Row>::new(), self.widths())
                .header(self.header_row())
                .render(header_area, buf);
            Paragraph::new(message)
                .style(self.styles.muted)
                .alignment(Alignment::Center)
                .render(body_area, buf);
            return;
        }

        let records = self.table.records();
        let widths = self.widths();
        let rows: Vec<Row> = self
            .view
            .rows
            .iter()
            .enumerate()
            .map(|(pos, &index)| {
                let record = &records[index];
                let cells = row_cells(self.table, record);
                let row = Row::new(self.fit(cells));
                if self.cursor == Some(pos) {
                    row.style(self.styles.cursor_row)
                } else if self.table.is_selected(&record.id()) {
                    row.style(self.styles.selected_row)
                } else {
                    row
                }
            })
            .collect();

        Table::new(rows, widths)
            .header(self.header_row())
            .column_spacing(1)
            .block(block)
            .render(area, buf);
    }
}

impl<T: Record> TableWidget<'_, T> {
    fn widths(&self) -> Vec<Constraint> {
        std::iter::once(Constraint::Length(CHECKBOX_WIDTH))
            .chain(
                self.table
                    .visible_columns()
                    .iter()
                    .map(|c| Constraint::Length(c.render_width())),
            )
            .collect()
    }

    fn header_row(&self) -> Row<'static> {
        let cells = header_cells(self.table, self.view);
        Row::new(self.fit(cells)).style(self.styles.header)
    }

    /// Truncate each cell to its column width.
    fn fit(&self, cells: Vec<String>) -> Vec<Cell<'static>> {
        let widths = std::iter::once(CHECKBOX_WIDTH).chain(
            self.table
                .visible_columns()
                .into_iter()
                .map(|c| c.render_width())
                .collect::<Vec<_>>(),
        );
        cells
            .into_iter()
            .zip(widths)
            .map(|(text, width)| Cell::from(truncate_to_width(&text, usize::from(width))))
            .collect()
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
