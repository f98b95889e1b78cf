//! Error types for the file-transform layer.
//!
//! The codeword algebra in [`crate::secded`] never fails: per-unit
//! trouble is reported as an [`crate::secded::Outcome`] value. Errors
//! here cover the things that abort a whole transform, chiefly I/O.

use thiserror::Error;

/// Errors produced while transforming a file.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing one of the streams failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input path cannot be used as given.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, Error>;
