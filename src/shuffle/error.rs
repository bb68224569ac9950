use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::common::io_error_msg;

/// Everything that can stop a sort run. All of these are fatal.
#[derive(Error, Debug)]
pub enum SortError {
    #[error("Usage: {program} <filename>")]
    Usage { program: String },

    #[error("{}: {}", .path.display(), io_error_msg(.source))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("too many lines: capacity is {max}, input has {found}")]
    CapacityExceeded { max: usize, found: usize },

    #[error("expected {expected} lines, input has {found}")]
    LineCountMismatch { expected: usize, found: usize },

    #[error(
        "line {line}, column {column}: byte '{}' is outside a-z (use --fallback to accept it)",
        .byte.escape_ascii()
    )]
    MalformedChar { line: usize, column: usize, byte: u8 },

    #[error("invalid rule: {0}")]
    InvalidRule(String),

    #[error("invalid algorithm '{0}' (expected one of: quick, merge, radix, prefix, std)")]
    InvalidAlgorithm(String),

    #[error("write error: {}", io_error_msg(.0))]
    Output(#[source] io::Error),
}

impl SortError {
    /// Process exit status for this error: 1 for usage, 2 for the rest.
    pub fn exit_code(&self) -> i32 {
        match self {
            SortError::Usage { .. } => 1,
            _ => 2,
        }
    }
}
