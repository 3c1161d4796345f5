//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay with all keyboard shortcuts grouped by category.
//! Triggered by '?' key, dismissed by 'Esc' or '?'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::helpers::empty_line;
use super::styles::TableStyles;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Shortcut groups as (category, [(keys, description)]).
const SHORTCUTS: &[(&str, &[(&str, &str)])] = &[
    (
        "Rows & Pages",
        &[
            ("j/↓", "Next row"),
            ("k/↑", "Previous row"),
            ("l/→/PgDn", "Next page"),
            ("h/←/PgUp", "Previous page"),
            ("g/Home", "First page"),
            ("G/End", "Last page"),
            ("p", "Cycle rows per page"),
        ],
    ),
    (
        "Columns",
        &[
            ("1-9", "Sort by column (asc, desc, off)"),
            ("0", "Clear sort"),
            ("Alt+1-9", "Show/hide column"),
        ],
    ),
    (
        "Selection",
        &[
            ("Space", "Toggle row"),
            ("a", "Select all on page"),
            ("x", "Clear selection"),
        ],
    ),
    (
        "Search",
        &[
            ("//Ctrl+f", "Start search"),
            ("Enter", "Keep query"),
            ("Esc", "Clear query"),
        ],
    ),
    (
        "Toolbar",
        &[
            ("f", "Focus filter bar"),
            ("b", "Focus bulk actions"),
            ("←/→", "Cycle option"),
            ("Enter", "Apply bulk action to selection"),
            ("Tab/Esc", "Back to table"),
        ],
    ),
    (
        "Rows",
        &[("Enter", "Open row"), ("d/Delete", "Delete row")],
    ),
    (
        "Application",
        &[
            ("r", "Reload records"),
            ("?", "Toggle help"),
            ("q/Ctrl+c", "Quit"),
        ],
    ),
];

/// Render the help overlay centered on the screen.
///
/// `scroll_offset` is the first content line shown.
pub fn render_help_overlay(frame: &mut Frame, scroll_offset: u16) {
    let area = frame.area();
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, area);

    frame.render_widget(Clear, popup_area);

    let styles = TableStyles::default();
    let help_paragraph = Paragraph::new(build_help_content(&styles))
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left)
        .scroll((scroll_offset, 0));

    frame.render_widget(help_paragraph, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: 1,
    };

    let hint = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc or ? to close ",
        styles.muted.add_modifier(Modifier::DIM),
    )]))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}

/// Calculate the centered rect for the help overlay.
///
/// Returns a Rect that is centered on the screen with the specified
/// percentage of width and height.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

fn build_help_content(styles: &TableStyles) -> Vec<Line<'static>> {
    let desc_style = Style::default();
    let mut lines = Vec::new();

    for (i, (category, entries)) in SHORTCUTS.iter().enumerate() {
        if i > 0 {
            lines.push(empty_line());
        }
        lines.push(Line::from(Span::styled(*category, styles.section)));
        for (keys, desc) in entries.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<12}"), styles.key),
                Span::styled(*desc, desc_style),
            ]));
        }
    }

    lines
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
