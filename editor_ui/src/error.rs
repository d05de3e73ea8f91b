use std::io;

/// Errors that end the editor session.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("{call} failed: {source}")]
    Terminal {
        call: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("could not determine window size")]
    WindowSize,
    #[error("malformed cursor position report: {0:?}")]
    CursorPosition(String),
    #[error(transparent)]
    Core(#[from] termpad_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
