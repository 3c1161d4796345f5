//! Stdin-based record source for piped input.

use crate::model::error::InputError;
use std::io::{IsTerminal, Read};

/// Piped JSON read to EOF once and kept for later reloads.
///
/// Stdin cannot be rewound, so a refresh re-parses the same text.
#[derive(Debug, Clone)]
pub struct StdinSource {
    contents: String,
}

impl StdinSource {
    /// Read all of stdin.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoInput` if stdin is a TTY (interactive terminal).
    /// This prevents the console from blocking on input the user forgot to pipe.
    pub fn new() -> Result<Self, InputError> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(InputError::NoInput);
        }
        Self::from_reader(stdin.lock())
    }

    /// Read all of `reader`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for I/O errors.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, InputError> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        Ok(Self { contents })
    }

    /// Text read from stdin.
    pub fn contents(&self) -> &str {
        &self.contents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_reader_reads_to_eof() {
        let data = b"[{\"id\": 1}]\n";

        let source = StdinSource::from_reader(&data[..]).unwrap();

        assert_eq!(source.contents(), "[{\"id\": 1}]\n");
    }

    #[test]
    fn invalid_utf8_is_an_io_error() {
        let data: &[u8] = &[0xff, 0xfe];

        let result = StdinSource::from_reader(data);

        assert!(matches!(result, Err(InputError::Io(_))));
    }
}
