//! Single-slot undo record

use crate::media::{Classification, MediaItem};
use std::path::{Path, PathBuf};

/// Pre-transition state of the last item that was moved
///
/// At most one exists at a time: every successful transition overwrites it
/// and a successful undo clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    name: String,
    previous: Classification,
    previous_dir: PathBuf,
    stale_source: Option<PathBuf>,
}

impl ActionRecord {
    /// Remember where an item is right now
    #[must_use]
    pub fn capture(item: &MediaItem) -> Self {
        Self {
            name: item.name().to_string(),
            previous: item.classification(),
            previous_dir: item.dir().to_path_buf(),
            stale_source: None,
        }
    }

    /// Note the copy a failed source removal left at the previous location
    #[must_use]
    pub fn with_stale_source(mut self, stale_source: Option<PathBuf>) -> Self {
        self.stale_source = stale_source;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn previous(&self) -> Classification {
        self.previous
    }

    #[must_use]
    pub fn previous_dir(&self) -> &Path {
        &self.previous_dir
    }

    /// Path the item was restored to, if the original never left it
    #[must_use]
    pub fn stale_source(&self) -> Option<&Path> {
        self.stale_source.as_deref()
    }

    /// Where undo puts the file back
    #[must_use]
    pub fn previous_path(&self) -> PathBuf {
        self.previous_dir.join(&self.name)
    }
}
