//! Error types for the editing core.

use std::io;
use std::path::PathBuf;

/// Errors reported across the core's public boundary.
///
/// Conditions such as undo with an empty history or a search without
/// matches are not errors; those operations simply do nothing.
#[derive(thiserror::Error, Debug)]
pub enum EditorError {
    /// Reading or writing backing storage failed.
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file name contains characters that cannot be used in a name.
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    /// The configuration file could not be read or parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl EditorError {
    /// Wraps an I/O error together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        EditorError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
