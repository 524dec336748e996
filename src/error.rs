//! Error types for the editor.

use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Editor error type.
#[derive(Error, Debug)]
pub enum Error {
    /// A buffer could not grow to the requested size.
    #[error("Allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// Reading or writing the document failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File the operation targeted.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// Querying or configuring the terminal failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),
}

impl Error {
    /// Whether the editor can keep running after this error.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

/// Result type for editor operations.
pub type Result<T> = std::result::Result<T, Error>;
