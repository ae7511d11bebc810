//! Error types for idmask library.
//!
//! The extraction pipeline itself never fails: every input degrades to a
//! (possibly empty) result. Errors only come from the entry points that
//! read files or decode JSON.

use std::io;
use thiserror::Error;

/// Result type alias for idmask operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around the extraction pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The OCR output could not be decoded.
    #[error("Invalid OCR input: {0}")]
    InvalidInput(String),

    /// Error during rendering (JSON, text report).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidInput(err.to_string())
    }
}
