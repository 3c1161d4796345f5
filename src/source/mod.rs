//! Record input sources.
//!
//! This module turns a JSON array of objects into a record snapshot:
//! - File loading, re-read on refresh
//! - Stdin for piped input, read once
//! - Unified RecordSource enum for both

use crate::model::error::InputError;
use crate::model::{Record, RecordId};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::info;

mod columns;
pub mod file;
mod record;
pub mod stdin;

pub use columns::{columns_from_specs, infer_column_specs};
pub use file::FileSource;
pub use record::{json_to_cell, lookup, JsonRecord};
pub use stdin::StdinSource;

/// Display name for piped input.
pub const STDIN_NAME: &str = "<stdin>";

/// Unified input source for record data.
///
/// Sum type enforces exactly one variant.
#[derive(Debug, Clone)]
pub enum RecordSource {
    /// Records read from a file, re-read on refresh.
    File(FileSource),
    /// Records piped on stdin, read once.
    Stdin(StdinSource),
}

impl RecordSource {
    /// Human-readable source identity (file path or `<stdin>`).
    pub fn name(&self) -> String {
        match self {
            RecordSource::File(f) => f.path().display().to_string(),
            RecordSource::Stdin(_) => STDIN_NAME.to_string(),
        }
    }

    /// Load a fresh snapshot.
    ///
    /// # Errors
    ///
    /// Any [`InputError`] from reading or parsing.
    pub fn load(&self, id_field: &str) -> Result<Vec<JsonRecord>, InputError> {
        let name = self.name();
        let records = match self {
            RecordSource::File(f) => parse_records(&f.read()?, &name, id_field)?,
            RecordSource::Stdin(s) => parse_records(s.contents(), &name, id_field)?,
        };
        info!(source = %name, records = records.len(), "records loaded");
        Ok(records)
    }
}

/// Detect and create appropriate input source.
///
/// # Logic:
/// 1. If file path is provided: FileSource
/// 2. Otherwise: StdinSource (fails if stdin is a terminal)
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided and stdin is not piped.
/// Returns `InputError::FileNotFound` if file does not exist.
pub fn detect_record_source(file: Option<PathBuf>) -> Result<RecordSource, InputError> {
    match file {
        Some(path) => Ok(RecordSource::File(FileSource::new(path)?)),
        None => Ok(RecordSource::Stdin(StdinSource::new()?)),
    }
}

/// Parse a JSON array of objects into records.
///
/// # Errors
///
/// - `InputError::Json` for malformed JSON
/// - `InputError::NotAnArray` if the top level is not an array of objects
/// - `InputError::MissingId` if a record has no usable identity
/// - `InputError::DuplicateId` if two records share an identity
pub fn parse_records(
    text: &str,
    source_name: &str,
    id_field: &str,
) -> Result<Vec<JsonRecord>, InputError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|source| InputError::Json {
            source_name: source_name.to_string(),
            source,
        })?;
    let serde_json::Value::Array(items) = value else {
        return Err(InputError::NotAnArray(source_name.to_string()));
    };

    let mut seen: HashSet<RecordId> = HashSet::with_capacity(items.len());
    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            return Err(InputError::NotAnArray(source_name.to_string()));
        }
        let record = JsonRecord::from_value(item, id_field).ok_or_else(|| InputError::MissingId {
            index,
            field: id_field.to_string(),
        })?;
        if !seen.insert(record.id()) {
            return Err(InputError::DuplicateId(record.id().to_string()));
        }
        records.push(record);
    }
    Ok(records)
}
