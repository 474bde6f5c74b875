//! Store-specific error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the file store
///
/// A relocate error always means the source file was left untouched.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Destination directory could not be created
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the destination file failed
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Removing a file failed
    #[error("Failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file with the same name already exists at the destination
    #[error("Destination already exists: {0}")]
    DestinationExists(PathBuf),

    /// Path has no file name component
    #[error("Invalid path: {0}")]
    InvalidPath(PathBuf),
}

/// Store result type
pub type Result<T> = std::result::Result<T, StoreError>;
