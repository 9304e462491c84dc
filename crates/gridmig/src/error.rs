//! Error handling for the gridmig binary.

use std::{io, path::PathBuf, result};

use thiserror::Error;

/// Convenient result type for gridmig operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading the input document failed.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Input path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Wrapper for other I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The document is not valid RON.
    #[error("invalid RON document: {0}")]
    RonParse(#[from] ron::error::SpannedError),
    /// Rendering a RON document failed.
    #[error("failed to write RON: {0}")]
    RonWrite(#[from] ron::Error),
    /// The document is not valid JSON, or could not be rendered.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The engine rejected the layout.
    #[error("migration failed: {0}")]
    Engine(#[from] grid_migration::Error),
}
