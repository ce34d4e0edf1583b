//! Error type shared by the loaders and the renderer.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading inputs or rendering a pileup.
#[derive(Error, Debug)]
pub enum PileupError {
    /// A renderer precondition was violated. Nothing has been written.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An input file could not be opened.
    #[error("Cannot open {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl PileupError {
    /// Shorthand for building an `InvalidInput` error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

pub type Result<T> = std::result::Result<T, PileupError>;

/// Open a file, reporting failure as `SourceUnavailable` with the path attached.
pub(crate) fn open_source(path: &std::path::Path) -> Result<std::fs::File> {
    std::fs::File::open(path).map_err(|source| PileupError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })
}
