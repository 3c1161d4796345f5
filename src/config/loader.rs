//! Configuration file loading with precedence handling.

use crate::state::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigFileError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/recgrid/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Rows per page.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Sizes offered by the page-size selector.
    #[serde(default)]
    pub page_size_options: Option<Vec<usize>>,

    /// Column id used for free-text search.
    #[serde(default)]
    pub search_key: Option<String>,

    /// Placeholder shown in the empty search box.
    #[serde(default)]
    pub search_placeholder: Option<String>,

    /// Dotted path to each record's identity field.
    #[serde(default)]
    pub id_field: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Dotted path the filter bar cycles through.
    #[serde(default)]
    pub filter_field: Option<String>,

    /// Records whose `unselectable_field` equals `unselectable_value` cannot be selected.
    #[serde(default)]
    pub unselectable_field: Option<String>,

    /// Value of `unselectable_field` that blocks selection.
    #[serde(default)]
    pub unselectable_value: Option<String>,

    /// Actions offered by the bulk-action bar.
    #[serde(default)]
    pub bulk_actions: Option<Vec<String>>,

    /// Explicit column layout. Inferred from the records when absent.
    #[serde(default)]
    pub columns: Option<Vec<ColumnSpec>>,
}

/// One `[[columns]]` entry.
///
/// ```toml
/// [[columns]]
/// id = "campus"
/// path = "college.campus.name"
/// header = "Campus"
/// width = 20
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ColumnSpec {
    /// Unique column id.
    pub id: String,

    /// Dotted field path. Defaults to `id`.
    #[serde(default)]
    pub path: Option<String>,

    /// Header label. Defaults to `id`.
    #[serde(default)]
    pub header: Option<String>,

    /// Render width in terminal cells.
    #[serde(default)]
    pub width: Option<u16>,

    /// Whether the column can be sorted. Defaults to true.
    #[serde(default)]
    pub sortable: Option<bool>,

    /// Start with the column hidden.
    #[serde(default)]
    pub hidden: Option<bool>,
}

impl ColumnSpec {
    /// A column reading field `id` with default settings.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: None,
            header: None,
            width: None,
            sortable: None,
            hidden: None,
        }
    }

    /// Dotted path read from each record.
    pub fn field_path(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.id)
    }

    /// Label shown in the header row.
    pub fn header_label(&self) -> &str {
        self.header.as_deref().unwrap_or(&self.id)
    }
}

/// Field value that marks a record as not selectable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnselectableRule {
    /// Dotted field path compared against `value`.
    pub field: String,
    /// Rendered value that blocks selection.
    pub value: String,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Rows per page.
    pub page_size: usize,
    /// Sizes offered by the page-size selector.
    pub page_size_options: Vec<usize>,
    /// Column the free-text query searches.
    pub search_key: Option<String>,
    /// Placeholder shown in an empty search bar.
    pub search_placeholder: Option<String>,
    /// Dotted path holding each record's identity.
    pub id_field: String,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Field the filter bar cycles through.
    pub filter_field: Option<String>,
    /// Rule marking records as not selectable.
    pub unselectable: Option<UnselectableRule>,
    /// Actions offered by the bulk-action bar.
    pub bulk_actions: Vec<String>,
    /// Empty means "infer from the records".
    pub columns: Vec<ColumnSpec>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            search_key: None,
            search_placeholder: None,
            id_field: "id".to_string(),
            log_file_path: default_log_path(),
            filter_field: None,
            unselectable: None,
            bulk_actions: default_bulk_actions(),
            columns: Vec::new(),
        }
    }
}

fn default_bulk_actions() -> Vec<String> {
    ["archive", "activate", "deactivate"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/recgrid/recgrid.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("recgrid").join("recgrid.log")
    } else {
        PathBuf::from("recgrid.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigFileError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigFileError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigFileError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/recgrid/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("recgrid").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `RECGRID_CONFIG` environment variable
/// 3. Default path `~/.config/recgrid/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigFileError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("RECGRID_CONFIG") {
        if env_path.is_empty() {
            return Err(ConfigFileError::InvalidPath(
                "RECGRID_CONFIG is set but empty".to_string(),
            ));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `RECGRID_PAGE_SIZE`: rows per page (ignored with a warning if not a number)
/// - `RECGRID_SEARCH_KEY`: search column id
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var("RECGRID_PAGE_SIZE") {
        match raw.trim().parse::<usize>() {
            Ok(size) => config.page_size = size,
            Err(e) => warn!(value = %raw, error = %e, "ignoring RECGRID_PAGE_SIZE"),
        }
    }

    if let Ok(key) = std::env::var("RECGRID_SEARCH_KEY") {
        config.search_key = Some(key);
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let unselectable = match (config.unselectable_field, config.unselectable_value) {
        (Some(field), Some(value)) => Some(UnselectableRule { field, value }),
        (Some(field), None) => {
            warn!(field = %field, "unselectable_field without unselectable_value is ignored");
            None
        }
        _ => None,
    };

    ResolvedConfig {
        page_size: config.page_size.unwrap_or(defaults.page_size),
        page_size_options: config
            .page_size_options
            .unwrap_or(defaults.page_size_options),
        search_key: config.search_key.or(defaults.search_key),
        search_placeholder: config.search_placeholder.or(defaults.search_placeholder),
        id_field: config.id_field.unwrap_or(defaults.id_field),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        filter_field: config.filter_field.or(defaults.filter_field),
        unselectable,
        bulk_actions: config.bulk_actions.unwrap_or(defaults.bulk_actions),
        columns: config.columns.unwrap_or(defaults.columns),
    }
}

/// Command-line values that override every other source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--page-size`.
    pub page_size: Option<usize>,
    /// `--search-key`.
    pub search_key: Option<String>,
    /// `--filter-field`.
    pub filter_field: Option<String>,
    /// `--id-field`.
    pub id_field: Option<String>,
}

/// Apply CLI argument overrides to resolved config.
///
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(size) = cli.page_size {
        config.page_size = size;
    }

    if let Some(key) = cli.search_key {
        config.search_key = Some(key);
    }

    if let Some(field) = cli.filter_field {
        config.filter_field = Some(field);
    }

    if let Some(field) = cli.id_field {
        config.id_field = field;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
