//! Media model and on-disk layout
//!
//! This module defines the media item model and the fixed directory layout
//! that backs every classification:
//!
//! ```text
//! <root>/              unsorted loose files
//! <root>/liked/        liked, no bucket
//! <root>/liked/1..9/   liked, bucket n
//! <root>/disliked/     ...
//! <root>/super/        ...
//! ```
//!
//! No deeper nesting is recognized.

pub mod types;

pub use types::{
    Category, Classification, IMAGE_EXTENSIONS, MediaItem, MediaType, SubBucket,
    VIDEO_EXTENSIONS, compare_names,
};

use std::path::{Path, PathBuf};

/// Directory layout of an opened media root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory owning loose files of a category (the root for `Unsorted`)
    #[must_use]
    pub fn category_dir(&self, category: Category) -> PathBuf {
        match category.dir_name() {
            Some(name) => self.root.join(name),
            None => self.root.clone(),
        }
    }

    /// Numbered bucket directory below a category directory
    #[must_use]
    pub fn bucket_dir(&self, category: Category, bucket: SubBucket) -> PathBuf {
        self.category_dir(category).join(bucket.dir_name())
    }

    /// Directory a file with the given classification lives in
    #[must_use]
    pub fn dir_for(&self, classification: Classification) -> PathBuf {
        match classification.sub_bucket() {
            Some(bucket) => self.bucket_dir(classification.category(), bucket),
            None => self.category_dir(classification.category()),
        }
    }
}
