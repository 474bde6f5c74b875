//! Library-specific error types
//!
//! Errors raised while preparing or scanning a media root. A missing numbered
//! bucket directory is not an error and never shows up here.

use std::path::PathBuf;
use thiserror::Error;

/// Library index errors
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The root or one of the category directories is not writable
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The selected root does not exist or is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Any other I/O failure while preparing or reading a directory
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LibraryError {
    /// Wrap an I/O error, promoting permission failures to `PermissionDenied`
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            Self::PermissionDenied(path)
        } else {
            Self::Io { path, source }
        }
    }
}

/// Library result type
pub type Result<T> = std::result::Result<T, LibraryError>;
