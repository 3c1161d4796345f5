//! Search input widget for rendering the search bar.

use super::styles::TableStyles;
use crate::state::SearchInput;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Search bar widget.
///
/// While typing, the cursor is drawn as an inverted cell. Otherwise the
/// committed query is shown, or the placeholder when there is none.
pub struct SearchBar<'a> {
    input: &'a SearchInput,
    query: &'a str,
    placeholder: &'a str,
    styles: TableStyles,
}

impl<'a> SearchBar<'a> {
    /// Search bar over the input state and the current query.
    pub fn new(input: &'a SearchInput, query: &'a str, placeholder: &'a str) -> Self {
        Self {
            input,
            query,
            placeholder,
            styles: TableStyles::default(),
        }
    }

    /// Override the default styles.
    pub fn styles(mut self, styles: TableStyles) -> Self {
        self.styles = styles;
        self
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (line, title) = match self.input {
            SearchInput::Typing { query, cursor } => {
                let before: String = query.chars().take(*cursor).collect();
                let mut after = query.chars().skip(*cursor);
                let cursor_char = after.next().map_or(" ".to_string(), String::from);
                let rest: String = after.collect();

                let line = Line::from(vec![
                    Span::raw(before),
                    Span::styled(
                        cursor_char,
                        Style::default()
                            .bg(Color::White)
                            .fg(Color::Black)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(rest),
                ]);
                (line, "Search")
            }
            SearchInput::Idle if self.query.is_empty() => (
                Line::from(Span::styled(self.placeholder.to_string(), self.styles.muted)),
                "Search (/)",
            ),
            SearchInput::Idle => (Line::from(self.query.to_string()), "Search (/)"),
        };

        Paragraph::new(line)
            .block(Block::default().borders(Borders::ALL).title(title))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::helpers::buffer_to_string;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(input: &SearchInput, query: &str) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();
        terminal
            .draw(|frame| {
                frame.render_widget(SearchBar::new(input, query, "Filter names..."), frame.area());
            })
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn idle_without_query_shows_placeholder() {
        let output = render(&SearchInput::Idle, "");

        assert!(output.contains("Filter names..."));
        assert!(output.contains("Search (/)"));
    }

    #[test]
    fn idle_with_query_shows_query() {
        let output = render(&SearchInput::Idle, "ada");

        assert!(output.contains("ada"));
        assert!(!output.contains("Filter names..."));
    }

    #[test]
    fn typing_shows_text_around_cursor() {
        let input = SearchInput::Typing {
            query: "grace".to_string(),
            cursor: 2,
        };

        let output = render(&input, "grace");

        assert!(output.contains("grace"));
        assert!(output.contains("Search"));
    }
}
