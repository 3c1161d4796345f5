//! Screen layout: search bar, slot bars, table, status bar.

use super::constants::{SEARCH_BAR_HEIGHT, SLOT_BAR_HEIGHT, STATUS_BAR_HEIGHT};
use super::help::render_help_overlay;
use super::search_input::SearchBar;
use super::styles::TableStyles;
use super::table::TableWidget;
use crate::model::Record;
use crate::state::{PaneFocus, TablePane, TableView};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// What to draw on top of the pane.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlay<'a> {
    /// Last status message (action results, load errors).
    pub status: Option<&'a str>,
    /// Help scroll offset when the help overlay is open.
    pub help: Option<u16>,
}

/// Render the whole screen for one pane.
pub fn render_layout<T: Record>(frame: &mut Frame, pane: &TablePane<T>, overlay: Overlay<'_>) {
    let styles = TableStyles::default();
    let table = pane.table();
    let view = table.view();

    let mut constraints = vec![Constraint::Length(SEARCH_BAR_HEIGHT)];
    let filter_bar = pane.filter_slot_segments(&view);
    let action_bar = pane.action_slot_segments(&view);
    if filter_bar.is_some() {
        constraints.push(Constraint::Length(SLOT_BAR_HEIGHT));
    }
    if action_bar.is_some() {
        constraints.push(Constraint::Length(SLOT_BAR_HEIGHT));
    }
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(STATUS_BAR_HEIGHT));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());
    let mut next = chunks.iter().copied();
    let mut take = || next.next().unwrap_or_default();

    frame.render_widget(
        SearchBar::new(pane.search(), table.query(), table.search_placeholder()).styles(styles),
        take(),
    );
    if let Some((title, segments)) = filter_bar {
        let focused = pane.focus() == PaneFocus::FilterSlot;
        render_slot_bar(frame, take(), &title, &segments, focused, &styles);
    }
    if let Some((title, segments)) = action_bar {
        let focused = pane.focus() == PaneFocus::ActionSlot;
        render_slot_bar(frame, take(), &title, &segments, focused, &styles);
    }

    let cursor = (pane.focus() == PaneFocus::Table).then_some(pane.cursor());
    frame.render_widget(
        TableWidget::new(table, &view).cursor(cursor).styles(styles),
        take(),
    );

    let status_area = take();
    let text = build_status_text(&view, overlay.status);
    frame.render_widget(
        Paragraph::new(Line::from(text)).style(styles.muted),
        status_area,
    );

    if let Some(scroll) = overlay.help {
        render_help_overlay(frame, scroll);
    }
}

fn render_slot_bar(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    segments: &[String],
    focused: bool,
    styles: &TableStyles,
) {
    let title_style = if focused {
        styles.focused_bar
    } else {
        styles.header
    };
    let mut spans = vec![Span::styled(format!(" {title}: "), title_style), Span::raw(" ")];
    spans.push(Span::raw(segments.join("  ")));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Status line: selection summary, page size, page position, then the
/// status message and a help hint.
pub fn build_status_text(view: &TableView, status: Option<&str>) -> String {
    let mut parts = vec![
        view.selection_label(),
        format!("Rows per page: {}", view.page_size),
        view.page_label(),
    ];
    if let Some(message) = status.filter(|m| !m.is_empty()) {
        parts.push(message.to_string());
    }
    parts.push("?: help".to_string());
    format!(" {}", parts.join(" | "))
}
