//! Table styling configuration.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Colors are disabled when the `NO_COLOR` environment variable is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Colors are on unless `NO_COLOR` is set.
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Whether styles may use color.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== TableStyles =====

/// Styles for the table, bars and overlays.
///
/// Without color, emphasis falls back to bold/reversed modifiers only.
#[derive(Debug, Clone, Copy)]
pub struct TableStyles {
    /// Header row.
    pub header: Style,
    /// Row under the cursor.
    pub cursor_row: Style,
    /// Selected rows.
    pub selected_row: Style,
    /// Placeholders and empty-state messages.
    pub muted: Style,
    /// Slot bar with focus.
    pub focused_bar: Style,
    /// Help section titles.
    pub section: Style,
    /// Key names in help.
    pub key: Style,
}

impl Default for TableStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env())
    }
}

impl TableStyles {
    /// Styles honouring the color setting.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                header: Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                cursor_row: Style::default().add_modifier(Modifier::REVERSED),
                selected_row: Style::default().fg(Color::Green),
                muted: Style::default().fg(Color::DarkGray),
                focused_bar: Style::default().fg(Color::Black).bg(Color::Yellow),
                section: Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                key: Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            }
        } else {
            Self {
                header: Style::default().add_modifier(Modifier::BOLD),
                cursor_row: Style::default().add_modifier(Modifier::REVERSED),
                selected_row: Style::default().add_modifier(Modifier::BOLD),
                muted: Style::default().add_modifier(Modifier::DIM),
                focused_bar: Style::default().add_modifier(Modifier::REVERSED),
                section: Style::default().add_modifier(Modifier::UNDERLINED),
                key: Style::default().add_modifier(Modifier::BOLD),
            }
        }
    }
}
