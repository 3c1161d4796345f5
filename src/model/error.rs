//! Error types for recgrid.
//!
//! Errors are split by when they can happen:
//!
//! - [`ConfigError`] - table misconfiguration, raised at construction time so a bad column
//!   set never reaches the screen
//! - [`TableError`] - an interaction named a column the table cannot act on
//! - [`InputError`] - loading the record snapshot from a file or stdin failed
//! - [`AppError`] - top-level wrapper for the console binary (also covers config file and
//!   logging setup)
//!
//! Data-shape problems (missing fields, nulls, mixed types) are deliberately absent from this
//! list: accessors yield [`crate::model::CellValue::Absent`] and the engine degrades instead of
//! failing.

use std::path::PathBuf;
use thiserror::Error;

/// Table configuration errors. Programming mistakes, surfaced at setup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A column was declared with an empty id.
    #[error("Column id must not be empty")]
    EmptyColumnId,

    /// Two columns share the same id.
    #[error("Duplicate column id: {0}")]
    DuplicateColumn(String),

    /// The search key does not name any column.
    #[error("Search key {0:?} does not name a column")]
    UnknownSearchKey(String),

    /// Page size must be positive.
    #[error("Page size must be greater than zero")]
    ZeroPageSize,
}

/// Errors for interactions that target a specific column.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    /// No column with this id.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// The column exists but was declared `sortable: false`.
    #[error("Column {0} is not sortable")]
    NotSortable(String),
}

/// Errors encountered when loading records from files or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified file does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
    },

    /// No file argument and stdin is a terminal.
    #[error("No input: provide a JSON file path or pipe records to stdin")]
    NoInput,

    /// Input is not valid JSON.
    #[error("Invalid JSON in {source_name}: {source}")]
    Json {
        /// File path or `<stdin>`.
        source_name: String,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// Top-level JSON value is not an array of objects.
    #[error("Expected a JSON array of objects in {0}")]
    NotAnArray(String),

    /// A record lacks the identity field.
    #[error("Record {index} has no usable {field:?} identity field")]
    MissingId {
        /// Position of the record in the input array.
        index: usize,
        /// Identity field path that was looked up.
        field: String,
    },

    /// Two records share an identity.
    #[error("Duplicate record identity: {0}")]
    DuplicateId(String),

    /// Generic I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level application error for the console binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to load records.
    #[error("Failed to load records: {0}")]
    Input(#[from] InputError),

    /// Table was misconfigured.
    #[error("Invalid table configuration: {0}")]
    Config(#[from] ConfigError),

    /// Config file could not be read or parsed.
    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] crate::config::ConfigFileError),

    /// Log subscriber setup failed.
    #[error("Logging setup failed: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal or rendering failure.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}
