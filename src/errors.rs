// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MuxError {
    /// Malformed command line. `position` is the 1-based index of the
    /// offending argument, counting every argument after the program name.
    #[error("argument {position}: {message}")]
    Parse { position: usize, message: String },

    #[error("expected argument")]
    MissingArguments,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl MuxError {
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        MuxError::Parse {
            position,
            message: message.into(),
        }
    }

    /// True for errors that are the user's fault (bad command line).
    pub fn is_usage(&self) -> bool {
        matches!(self, MuxError::Parse { .. } | MuxError::MissingArguments)
    }
}

pub type Result<T> = std::result::Result<T, MuxError>;
