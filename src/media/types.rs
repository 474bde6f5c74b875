//! Core media types
//!
//! Pure data types describing a media file and where it is classified.
//! Classification state can only be changed through [`crate::engine::Engine`];
//! everything here is read-only from outside the crate.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

/// Recognized video extensions (lowercase, with leading dot)
pub const VIDEO_EXTENSIONS: [&str; 4] = [".mp4", ".webm", ".mov", ".m4v"];

/// Recognized image extensions (lowercase, with leading dot)
pub const IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp"];

// ============================================================================
// Category
// ============================================================================

/// Classification state of a media item, each backed by a directory
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Loose files in the root directory
    #[default]
    Unsorted,
    /// Files under `liked/`
    Liked,
    /// Files under `disliked/`
    Disliked,
    /// Files under `super/`
    Super,
}

/// Directory names of the categories that own a directory below the root
const CATEGORY_DIRS: [(Category, &str); 3] = [
    (Category::Liked, "liked"),
    (Category::Disliked, "disliked"),
    (Category::Super, "super"),
];

impl Category {
    /// All categories in display order
    pub const ALL: [Self; 4] = [Self::Unsorted, Self::Liked, Self::Disliked, Self::Super];

    /// Categories that own a directory (everything but `Unsorted`)
    pub const SORTED: [Self; 3] = [Self::Liked, Self::Disliked, Self::Super];

    /// Directory name below the root, `None` for `Unsorted` (the root itself)
    #[must_use]
    pub fn dir_name(self) -> Option<&'static str> {
        CATEGORY_DIRS
            .iter()
            .find(|(category, _)| *category == self)
            .map(|(_, name)| *name)
    }

    /// Lowercase name used in output and config files
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unsorted => "unsorted",
            Self::Liked => "liked",
            Self::Disliked => "disliked",
            Self::Super => "super",
        }
    }

    /// Parse a category name or its one-letter shorthand
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "unsorted" | "u" | "x" => Some(Self::Unsorted),
            "liked" | "like" | "l" => Some(Self::Liked),
            "disliked" | "dislike" | "d" => Some(Self::Disliked),
            "super" | "s" => Some(Self::Super),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Media type
// ============================================================================

/// Kind of media, derived from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Video,
    Image,
}

impl MediaType {
    /// Detect the media type from a file name (case-insensitive suffix match)
    ///
    /// Returns `None` for files that are not recognized media.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        if VIDEO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            Some(Self::Video)
        } else if IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            Some(Self::Image)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Sub-bucket and classification
// ============================================================================

/// Numbered sub-bucket (1-9) nested under a category directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SubBucket(u8);

impl SubBucket {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 9;

    /// Create a sub-bucket, `None` if `n` is outside 1-9
    #[must_use]
    pub const fn new(n: u8) -> Option<Self> {
        if n >= Self::MIN && n <= Self::MAX {
            Some(Self(n))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Iterate over every bucket in ascending order
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Directory name of the bucket (`"1"`..`"9"`)
    #[must_use]
    pub fn dir_name(self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for SubBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category plus optional sub-bucket
///
/// Invariant: an `Unsorted` classification never carries a sub-bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Classification {
    category: Category,
    sub_bucket: Option<SubBucket>,
}

impl Classification {
    /// Loose file in the root directory
    #[must_use]
    pub const fn unsorted() -> Self {
        Self {
            category: Category::Unsorted,
            sub_bucket: None,
        }
    }

    /// Loose file directly in the category directory
    #[must_use]
    pub const fn root(category: Category) -> Self {
        Self {
            category,
            sub_bucket: None,
        }
    }

    /// Classification with an optional bucket, `None` if the pair is invalid
    #[must_use]
    pub const fn with_bucket(category: Category, sub_bucket: Option<SubBucket>) -> Option<Self> {
        match (category, sub_bucket) {
            (Category::Unsorted, Some(_)) => None,
            _ => Some(Self {
                category,
                sub_bucket,
            }),
        }
    }

    #[must_use]
    pub const fn category(self) -> Category {
        self.category
    }

    #[must_use]
    pub const fn sub_bucket(self) -> Option<SubBucket> {
        self.sub_bucket
    }

    /// Bucket number where 0 stands for the category root
    #[must_use]
    pub const fn bucket_number(self) -> u8 {
        match self.sub_bucket {
            Some(bucket) => bucket.0,
            None => 0,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub_bucket {
            Some(bucket) => write!(f, "{}/{}", self.category, bucket),
            None => write!(f, "{}", self.category),
        }
    }
}

// ============================================================================
// Media item
// ============================================================================

/// A media file known to the library index
///
/// The name is the file name and acts as the item's key. The directory is the
/// item's current physical location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaItem {
    name: String,
    kind: MediaType,
    #[serde(flatten)]
    classification: Classification,
    dir: PathBuf,
}

impl MediaItem {
    /// Build an item for a file found on disk, `None` if it is not media
    #[must_use]
    pub(crate) fn from_file(name: String, classification: Classification, dir: PathBuf) -> Option<Self> {
        let kind = MediaType::from_name(&name)?;
        Some(Self {
            name,
            kind,
            classification,
            dir,
        })
    }

    /// Same item at a new location
    #[must_use]
    pub(crate) fn relocated(&self, classification: Classification, dir: PathBuf) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            classification,
            dir,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> MediaType {
        self.kind
    }

    #[must_use]
    pub const fn classification(&self) -> Classification {
        self.classification
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.classification.category
    }

    #[must_use]
    pub const fn sub_bucket(&self) -> Option<SubBucket> {
        self.classification.sub_bucket
    }

    /// Directory currently holding the file
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the backing file
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }
}

/// Name ordering used for every sorted listing
///
/// Case-insensitive first so `B.mp4` sorts next to `b.mp4`, then by raw bytes
/// to keep the order total.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
