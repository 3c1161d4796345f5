//! Record identity.
//!
//! Records are opaque to the engine. The only thing it needs from them is a
//! stable identity, compared by value, so selections survive a wholesale
//! replacement of the record snapshot.

use std::fmt;

/// Identity of a record within a dataset.
///
/// Unique within one snapshot and never reused while the record exists.
/// Ordering is only used for deterministic iteration (integers before text).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordId {
    /// Numeric primary key.
    Int(i64),
    /// Textual key (UUIDs, slugs).
    Text(String),
}

impl RecordId {
    /// Textual form used in status lines and bulk requests.
    pub fn as_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Int(value)
    }
}

impl From<i32> for RecordId {
    fn from(value: i32) -> Self {
        RecordId::Int(i64::from(value))
    }
}

impl From<u32> for RecordId {
    fn from(value: u32) -> Self {
        RecordId::Int(i64::from(value))
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::Text(value)
    }
}

/// A caller-defined entity the table can display.
pub trait Record {
    /// Stable identity of this record.
    fn id(&self) -> RecordId;
}
