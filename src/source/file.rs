//! File-based record source.

use crate::model::error::InputError;
use std::path::{Path, PathBuf};

/// A JSON file that is re-read on every load.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Path of the JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file vanished since
    /// construction, `InputError::Io` for other I/O errors.
    pub fn read(&self) -> Result<String, InputError> {
        if !self.path.exists() {
            return Err(InputError::FileNotFound {
                path: self.path.clone(),
            });
        }
        Ok(std::fs::read_to_string(&self.path)?)
    }
}
