//! Acceptance Test Harness for TUI testing
//!
//! Provides a high-level API for acceptance testing user stories by wrapping
//! TuiApp<TestBackend> with convenient methods for simulating user interactions.

use crate::config::{ColumnSpec, ResolvedConfig, UnselectableRule};
use crate::console::build_pane;
use crate::model::{AppError, Record, RecordId};
use crate::source::{detect_record_source, JsonRecord};
use crate::state::TablePane;
use crate::view::{buffer_to_string, TuiApp, TuiError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::path::PathBuf;

/// Fixture with 25 users across three roles and three campuses.
pub const USERS_FIXTURE: &str = "tests/fixtures/users.json";

/// Console configuration used by the acceptance tests.
///
/// Narrow fixed columns so every column fits an 80-wide terminal; admins
/// cannot be selected; the filter bar cycles roles.
pub fn users_config() -> ResolvedConfig {
    let column = |id: &str, path: Option<&str>, header: &str, width: u16| ColumnSpec {
        path: path.map(String::from),
        header: Some(header.to_string()),
        width: Some(width),
        ..ColumnSpec::new(id)
    };
    ResolvedConfig {
        columns: vec![
            column("id", None, "ID", 4),
            column("name", None, "Name", 18),
            column("role", None, "Role", 8),
            column("campus", Some("college.campus.name"), "Campus", 8),
            column("score", None, "Score", 8),
        ],
        search_key: Some("name".to_string()),
        filter_field: Some("role".to_string()),
        unselectable: Some(UnselectableRule {
            field: "role".to_string(),
            value: "admin".to_string(),
        }),
        ..ResolvedConfig::default()
    }
}

/// Test harness for acceptance testing
///
/// Wraps TuiApp<TestBackend> to provide a clean API for simulating user
/// interactions in acceptance tests.
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    running: bool,
}

impl AcceptanceTestHarness {
    /// Load fixture with [`users_config`] and an 80x24 terminal.
    pub fn from_fixture(path: &str) -> Result<Self, TuiError> {
        Self::from_fixture_with_config(path, &users_config(), 80, 24)
    }

    /// Load fixture with a custom configuration and terminal size
    pub fn from_fixture_with_config(
        path: &str,
        config: &ResolvedConfig,
        width: u16,
        height: u16,
    ) -> Result<Self, TuiError> {
        let terminal = Terminal::new(TestBackend::new(width, height))?;

        let source = detect_record_source(Some(PathBuf::from(path)))?;
        let records = source.load(&config.id_field)?;
        let pane = build_pane(config, records, &source.name()).map_err(AppError::from)?;

        let app = TuiApp::new_for_test(terminal, pane, source, &config.id_field);

        Ok(Self { app, running: true })
    }

    /// Send a single key event
    ///
    /// Returns `true` if the app quit as a result of this key.
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        let mods = match key {
            KeyCode::Char(c) if c.is_ascii_uppercase() => KeyModifiers::SHIFT,
            _ => KeyModifiers::NONE,
        };
        self.send_key_with_mods(key, mods)
    }

    /// Send key with modifiers (e.g., Ctrl+C)
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true; // Already quit
        }

        let quit = self.app.handle_key_test(KeyEvent::new(key, mods));
        if quit {
            self.running = false;
        }
        quit
    }

    /// Send a sequence of keys
    pub fn send_keys(&mut self, keys: &[KeyCode]) {
        for &key in keys {
            if self.send_key(key) {
                break;
            }
        }
    }

    /// Type text character by character
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.send_key_with_mods(KeyCode::Char(ch), KeyModifiers::NONE);
        }
    }

    /// Render and return the screen as text
    pub fn render_to_string(&mut self) -> String {
        // TestBackend rendering does not fail
        self.app.render_test().ok();
        buffer_to_string(self.app.terminal().backend().buffer())
    }

    pub fn pane(&self) -> &TablePane<JsonRecord> {
        self.app.pane()
    }

    /// Identities on the visible page, in display order.
    pub fn visible_ids(&self) -> Vec<RecordId> {
        self.pane()
            .table()
            .visible_records()
            .iter()
            .map(|r| r.id())
            .collect()
    }

    pub fn status(&self) -> Option<&str> {
        self.app.status()
    }

    pub fn help_visible(&self) -> bool {
        self.app.help_visible()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Integer identities, for comparisons against [`AcceptanceTestHarness::visible_ids`].
pub fn ids(values: &[i64]) -> Vec<RecordId> {
    values.iter().map(|&v| RecordId::Int(v)).collect()
}
