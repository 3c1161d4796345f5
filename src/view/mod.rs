//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod help;
pub mod helpers;
mod layout;
mod search_input;
mod styles;
mod table;

pub use help::render_help_overlay;
pub use helpers::{buffer_to_string, empty_line, truncate_to_width};
pub use layout::{build_status_text, render_layout, Overlay};
pub use search_input::SearchBar;
pub use styles::{ColorConfig, TableStyles};
pub use table::{header_cells, row_cells, TableWidget};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::console::{apply_bulk, build_pane};
use crate::model::{AppError, RecordId};
use crate::source::{JsonRecord, RecordSource};
use crate::state::{BulkRequest, PaneAction, TablePane};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Input source error
    #[error("Input error: {0}")]
    Input(#[from] crate::model::InputError),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    pane: TablePane<JsonRecord>,
    source: RecordSource,
    id_field: String,
    key_bindings: KeyBindings,
    /// Help overlay scroll offset; `None` when closed.
    help: Option<u16>,
    status: Option<String>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Enter raw mode and the alternate screen.
    pub fn new(
        pane: TablePane<JsonRecord>,
        source: RecordSource,
        id_field: String,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            pane,
            source,
            id_field,
            key_bindings: KeyBindings::default(),
            help: None,
            status: None,
        })
    }

    /// Main event loop
    pub fn run(&mut self) -> Result<(), TuiError> {
        const POLL_INTERVAL: Duration = Duration::from_millis(250);

        self.draw()?;

        loop {
            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                    self.draw()?;
                }
                Event::Resize(..) => self.draw()?,
                _ => {}
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn draw(&mut self) -> Result<(), TuiError> {
        let pane = &self.pane;
        let overlay = Overlay {
            status: self.status.as_deref(),
            help: self.help,
        };
        self.terminal.draw(|frame| render_layout(frame, pane, overlay))?;
        Ok(())
    }

    /// Handle one key. Returns true if the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if let Some(scroll) = self.help {
            self.help = match key.code {
                KeyCode::Esc | KeyCode::Char('?') => None,
                KeyCode::Down | KeyCode::Char('j') => Some(scroll.saturating_add(1)),
                KeyCode::Up | KeyCode::Char('k') => Some(scroll.saturating_sub(1)),
                _ => Some(scroll),
            };
            return false;
        }

        match self.pane.handle_key(key, &self.key_bindings) {
            PaneAction::Quit => return true,
            PaneAction::ToggleHelp => self.help = Some(0),
            PaneAction::Activated(id) => self.activate(&id),
            PaneAction::DeleteRequested(id) => self.delete(&id),
            PaneAction::Bulk(request) => self.apply_bulk(&request),
            PaneAction::Refresh => self.refresh(),
            PaneAction::Redraw | PaneAction::None => {}
        }
        false
    }

    fn activate(&mut self, id: &RecordId) {
        let Some(record) = self.pane.table().find(id) else {
            return;
        };
        let summary = self
            .pane
            .table()
            .visible_columns()
            .iter()
            .map(|c| format!("{}: {}", c.header(), c.render(record)))
            .collect::<Vec<_>>()
            .join(", ");
        info!(%id, "row opened");
        self.status = Some(format!("Opened {id} ({summary})"));
    }

    fn delete(&mut self, id: &RecordId) {
        if self.pane.record_removed(id) {
            self.status = Some(format!("Deleted {id}"));
        }
    }

    fn apply_bulk(&mut self, request: &BulkRequest) {
        let outcome = apply_bulk(self.pane.table().records(), request);
        self.pane.replace_records(outcome.records);
        self.pane.table_mut().clear_selection();
        self.status = Some(outcome.message);
    }

    /// Reload the snapshot from the source, keeping query, sort and page.
    fn refresh(&mut self) {
        self.pane.table_mut().set_loading(true);
        match self.source.load(&self.id_field) {
            Ok(records) => {
                let count = records.len();
                self.pane.replace_records(records);
                debug!(records = count, "refreshed");
                self.status = Some(format!("Reloaded {count} record(s)"));
            }
            Err(e) => {
                warn!(error = %e, "refresh failed");
                self.pane.table_mut().set_loading(false);
                self.status = Some(format!("Reload failed: {e}"));
            }
        }
    }

    /// Create TuiApp for testing with a provided terminal
    #[cfg(test)]
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        pane: TablePane<JsonRecord>,
        source: RecordSource,
        id_field: &str,
    ) -> Self {
        Self {
            terminal,
            pane,
            source,
            id_field: id_field.to_string(),
            key_bindings: KeyBindings::default(),
            help: None,
            status: None,
        }
    }

    /// Handle a single keyboard event (test-only accessor)
    ///
    /// Returns true if app should quit.
    #[cfg(test)]
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Render to the terminal (test-only accessor)
    #[cfg(test)]
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    #[cfg(test)]
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    #[cfg(test)]
    pub(crate) fn pane(&self) -> &TablePane<JsonRecord> {
        &self.pane
    }

    #[cfg(test)]
    pub(crate) fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn help_visible(&self) -> bool {
        self.help.is_some()
    }
}

/// Load the records, then run the console until the user quits.
///
/// Records load before the terminal switches to the alternate screen so
/// input errors print normally.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source(
    source: RecordSource,
    config: &ResolvedConfig,
    initial_query: Option<String>,
) -> Result<(), TuiError> {
    let records = source.load(&config.id_field)?;
    let mut pane = build_pane(config, records, &source.name()).map_err(AppError::from)?;
    if let Some(query) = initial_query {
        pane.table_mut().set_query(query);
    }
    info!(
        source = %source.name(),
        records = pane.table().records().len(),
        columns = pane.table().columns().len(),
        "console starting"
    );

    let mut app = TuiApp::new(pane, source, config.id_field.clone())?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tui_error_from_io_error() {
        let io_err = io::Error::other("test error");
        let tui_err: TuiError = io_err.into();
        assert!(matches!(tui_err, TuiError::Io(_)));
    }

    #[test]
    fn tui_error_from_app_error() {
        let app: AppError = crate::model::ConfigError::ZeroPageSize.into();
        let tui_err: TuiError = app.into();
        assert!(tui_err.to_string().contains("Page size"));
    }
}
