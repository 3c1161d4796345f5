//! Domain model: record identity, cell values, column descriptors, errors.

pub mod column;
pub mod error;
pub mod identity;
pub mod key_action;
pub mod value;

pub use column::{contains_ignore_case, Column, ColumnSet, DEFAULT_COLUMN_WIDTH};
pub use error::{AppError, ConfigError, InputError, TableError};
pub use identity::{Record, RecordId};
pub use key_action::KeyAction;
pub use value::CellValue;
