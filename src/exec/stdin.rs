// src/exec/stdin.rs

//! Standard input for children that never delivers data.

use std::io::{self, PipeWriter};
use std::process::Stdio;

/// Keeps the write end of a pipe open so that reads on the read end (the
/// child's stdin) block instead of returning end-of-file.
///
/// Nothing is ever written. Dropping the value closes the pipe, so it must
/// outlive the child it was handed to.
#[derive(Debug)]
pub struct BlockingStdin {
    _writer: PipeWriter,
}

impl BlockingStdin {
    /// Create the pipe, returning the holder and the child's side.
    pub fn open() -> io::Result<(Self, Stdio)> {
        let (reader, writer) = io::pipe()?;
        Ok((Self { _writer: writer }, Stdio::from(reader)))
    }
}
