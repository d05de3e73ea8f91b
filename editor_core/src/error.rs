//! Error types for core editor operations.

use std::io;
use thiserror::Error;

/// Errors returned by fallible editor operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("No file name set")]
    NoFileName,
}

pub type Result<T> = std::result::Result<T, Error>;
