//! Testing utilities for sortr
//!
//! This module provides a `TestTree` wrapper that builds a temporary media
//! root, and a `FaultyStore` that injects relocate failures.
//!
//! Only available when compiled with `cfg(test)`.

use crate::media::Layout;
use crate::store::{self, LocalStore, MediaStore, Relocation, StoreError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary media root that is removed on drop
///
/// # Examples
/// ```ignore
/// let tree = TestTree::new()
///     .with_file("a.mp4")
///     .with_file("liked/3/b.jpg");
/// let index = LibraryIndex::scan(&tree.layout()).unwrap();
/// ```
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create an empty root (no category directories yet)
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Add a file at a path relative to the root, creating parent directories
    ///
    /// The file content is its own file name, which makes moved files easy to
    /// identify.
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    #[must_use]
    pub fn with_file(self, relative: &str) -> Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        fs::write(&path, name.as_bytes()).expect("Failed to write test file");
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout::new(self.dir.path())
    }

    /// Whether a file exists at a path relative to the root
    #[must_use]
    pub fn exists(&self, relative: &str) -> bool {
        self.dir.path().join(relative).is_file()
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Which relocate step a `FaultyStore` breaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Writing the destination fails, nothing changes on disk
    Write,
    /// Destination is written but the source is never removed
    Delete,
    /// Every screenshot write fails, relocates work normally
    Capture,
}

/// Store that fails one step of every operation
#[derive(Debug, Clone, Copy)]
pub struct FaultyStore {
    pub fault: Fault,
}

impl FaultyStore {
    #[must_use]
    pub const fn new(fault: Fault) -> Self {
        Self { fault }
    }
}

impl MediaStore for FaultyStore {
    fn relocate(&self, source: &Path, dest_dir: &Path) -> store::Result<Relocation> {
        match self.fault {
            Fault::Write => Err(StoreError::Write {
                path: dest_dir.join(source.file_name().unwrap_or_default()),
                source: io::Error::other("injected write failure"),
            }),
            Fault::Delete => {
                let destination = store::prepare_destination(source, dest_dir)?;
                fs::copy(source, &destination).map_err(|e| StoreError::Write {
                    path: destination.clone(),
                    source: e,
                })?;
                Ok(Relocation {
                    destination,
                    stale_source: Some(source.to_path_buf()),
                })
            }
            Fault::Capture => LocalStore::new().relocate(source, dest_dir),
        }
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> store::Result<()> {
        match self.fault {
            Fault::Capture => Err(StoreError::Write {
                path: PathBuf::from(path),
                source: io::Error::other("injected capture failure"),
            }),
            _ => LocalStore::new().write_file(path, contents),
        }
    }

    fn remove_file(&self, path: &Path) -> store::Result<()> {
        match self.fault {
            Fault::Delete => Err(StoreError::Remove {
                path: PathBuf::from(path),
                source: io::Error::other("injected delete failure"),
            }),
            _ => LocalStore::new().remove_file(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_cleanup() {
        let root;
        {
            let tree = TestTree::new().with_file("a.mp4");
            root = tree.root().to_path_buf();
            assert!(tree.exists("a.mp4"));
        }
        assert!(!root.exists());
    }

    #[test]
    fn test_tree_nested_file() {
        let tree = TestTree::new().with_file("liked/3/b.jpg");
        assert!(tree.exists("liked/3/b.jpg"));
        assert_eq!(fs::read(tree.root().join("liked/3/b.jpg")).unwrap(), b"b.jpg");
    }

    #[test]
    fn test_faulty_write_leaves_source() {
        let tree = TestTree::new().with_file("a.mp4");
        let source = tree.root().join("a.mp4");

        let result = FaultyStore::new(Fault::Write).relocate(&source, &tree.root().join("liked"));

        assert!(result.is_err());
        assert!(tree.exists("a.mp4"));
        assert!(!tree.exists("liked/a.mp4"));
    }

    #[test]
    fn test_faulty_delete_duplicates_file() {
        let tree = TestTree::new().with_file("a.mp4");
        let source = tree.root().join("a.mp4");

        let relocation = FaultyStore::new(Fault::Delete)
            .relocate(&source, &tree.root().join("liked"))
            .unwrap();

        assert_eq!(relocation.stale_source, Some(source));
        assert!(tree.exists("a.mp4"));
        assert!(tree.exists("liked/a.mp4"));
    }
}
