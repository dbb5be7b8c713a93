//! Code Parsing Error Types

use thiserror::Error;

/// Errors that can occur while parsing a trouble code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    /// Input contained nothing but whitespace
    #[error("code is empty")]
    Empty,

    /// First character is not one of the four system prefixes
    #[error("invalid system prefix {0:?}, expected P, C, B, or U")]
    InvalidPrefix(char),

    /// Fewer than four hex digits follow the system prefix
    #[error("expected at least 4 hex digits after the prefix, found {0}")]
    TooFewDigits(usize),
}
