//! Engine-specific error types
//!
//! Every error here is local to one action. When an action fails the
//! in-memory model is exactly what it was before the action started.
//!
//! # Error Types
//!
//! - **`Library`**: the root could not be opened or rescanned
//! - **`RelocateFailed`**: the write step of a relocate failed
//! - **`CaptureFailed`**: a still frame could not be written
//! - **`NotFound`**, **`InvalidBucket`**, **`NotCategorized`**, **`NotAVideo`**:
//!   the action does not apply to the item

use crate::library::LibraryError;
use crate::store::StoreError;
use thiserror::Error;

/// Classification engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// Opening or rescanning the library failed
    #[error("Library error: {0}")]
    Library(#[from] LibraryError),

    /// Relocating an item failed, the item was not moved
    #[error("Failed to move {name}: {source}")]
    RelocateFailed {
        name: String,
        #[source]
        source: StoreError,
    },

    /// Writing a still frame failed
    #[error("Failed to capture still from {name}: {source}")]
    CaptureFailed {
        name: String,
        #[source]
        source: StoreError,
    },

    /// No item with this name in the library
    #[error("No media item named {0}")]
    NotFound(String),

    /// Sub-bucket outside 0-9
    #[error("Invalid bucket {0}, expected 0-9")]
    InvalidBucket(u8),

    /// Sub-bucket move on an unsorted item
    #[error("{0} is unsorted and has no buckets")]
    NotCategorized(String),

    /// Still capture on an image
    #[error("{0} is not a video")]
    NotAVideo(String),
}

/// Engine result type
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
