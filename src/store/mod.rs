//! File store - the only place that touches media files
//!
//! The engine never calls `std::fs` for item files directly; it goes through
//! a [`MediaStore`]. This keeps the relocate contract in one place and lets
//! tests inject write or delete failures.
//!
//! # Relocate contract
//!
//! 1. Create the destination directory if needed
//! 2. Refuse if a file with the same name is already there
//! 3. Write the file into the destination (atomic rename when possible,
//!    otherwise copy)
//! 4. Remove the source
//!
//! A failure in steps 1-3 leaves the source untouched and returns an error.
//! A failure in step 4 is not an error: the file now exists twice and the
//! stale source is reported in [`Relocation::stale_source`].
//!
//! Moving such an item back is [`MediaStore::restore_stale`]: the original
//! is still in place, so only the moved copy has to go.

pub mod error;

pub use error::{Result, StoreError};

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Result of a successful relocate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    /// Path the file now lives at
    pub destination: PathBuf,
    /// Source path that could not be removed after the write succeeded
    pub stale_source: Option<PathBuf>,
}

/// File operations the classification engine depends on
pub trait MediaStore {
    /// Move `source` into `dest_dir`, keeping its file name
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the destination could not be written. The
    /// source is untouched in that case.
    fn relocate(&self, source: &Path, dest_dir: &Path) -> Result<Relocation>;

    /// Write `contents` to `path`, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Write` if the file cannot be written.
    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// Delete a single file
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Remove` if the file cannot be removed.
    fn remove_file(&self, path: &Path) -> Result<()>;

    /// Move `moved` back onto `original`, a copy a failed relocate left behind
    ///
    /// If `original` is still there the write is already done and only
    /// `moved` is removed; a failed removal is reported as the stale source.
    /// If `original` is gone this is a plain relocate.
    ///
    /// # Errors
    ///
    /// Same as [`MediaStore::relocate`].
    fn restore_stale(&self, moved: &Path, original: &Path) -> Result<Relocation> {
        if !original.is_file() {
            let dir = original
                .parent()
                .ok_or_else(|| StoreError::InvalidPath(original.to_path_buf()))?;
            return self.relocate(moved, dir);
        }

        let stale_source = match self.remove_file(moved) {
            Ok(()) => None,
            Err(e) => {
                warn!("Original {} kept, moved copy left behind: {e}", original.display());
                Some(moved.to_path_buf())
            }
        };
        debug!("Restored {} from its stale copy", original.display());

        Ok(Relocation {
            destination: original.to_path_buf(),
            stale_source,
        })
    }
}

/// Store backed by the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl MediaStore for LocalStore {
    fn relocate(&self, source: &Path, dest_dir: &Path) -> Result<Relocation> {
        let destination = prepare_destination(source, dest_dir)?;

        match fs::rename(source, &destination) {
            Ok(()) => {
                return Ok(Relocation {
                    destination,
                    stale_source: None,
                });
            }
            Err(e) => debug!(
                "Rename {} -> {} failed ({e}), falling back to copy",
                source.display(),
                destination.display()
            ),
        }

        if let Err(source_err) = fs::copy(source, &destination) {
            // the destination did not exist before, so anything there is ours
            let _ = fs::remove_file(&destination);
            return Err(StoreError::Write {
                path: destination,
                source: source_err,
            });
        }

        let stale_source = match self.remove_file(source) {
            Ok(()) => None,
            Err(e) => {
                warn!(
                    "Copied {} but could not remove the original: {e}",
                    source.display()
                );
                Some(source.to_path_buf())
            }
        };

        Ok(Relocation {
            destination,
            stale_source,
        })
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<()> {
        fs::write(path, contents).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|source| StoreError::Remove {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Steps 1 and 2 of the relocate contract, shared by every store
///
/// # Errors
///
/// Returns `InvalidPath`, `CreateDir` or `DestinationExists`.
pub fn prepare_destination(source: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let file_name = source
        .file_name()
        .ok_or_else(|| StoreError::InvalidPath(source.to_path_buf()))?;

    fs::create_dir_all(dest_dir).map_err(|e| StoreError::CreateDir {
        path: dest_dir.to_path_buf(),
        source: e,
    })?;

    let destination = dest_dir.join(file_name);
    if destination.exists() {
        return Err(StoreError::DestinationExists(destination));
    }
    Ok(destination)
}
