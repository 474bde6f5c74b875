//! Library index - the authoritative collection of media items
//!
//! The index is produced by scanning a [`Layout`]:
//!
//! - the root directory (unsorted items)
//! - each category directory (items without a bucket)
//! - numbered buckets `1`..`9` inside each category directory
//!
//! Files are included when their name ends in a known video or image
//! extension; everything else is ignored. Items are kept sorted by name.
//!
//! Names are the item key. If the same name shows up in more than one place
//! (for example after an interrupted relocate) the index keeps every copy,
//! reports the name through [`LibraryIndex::duplicates`], and name lookups
//! resolve to the first copy in scan order.

pub mod error;

pub use error::{LibraryError, Result};

use crate::media::{Category, Classification, Layout, MediaItem, MediaType, SubBucket, compare_names};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

/// In-memory collection of every media item below a root
#[derive(Debug, Clone, Default)]
pub struct LibraryIndex {
    items: Vec<MediaItem>,
    duplicates: Vec<String>,
}

impl LibraryIndex {
    /// Make sure the root is usable and the three category directories exist
    ///
    /// Idempotent; existing directories are left alone.
    ///
    /// # Errors
    ///
    /// Returns `NotADirectory` if the root is missing, `PermissionDenied` if
    /// the tree is not writable, or `Io` for other failures.
    pub fn prepare(layout: &Layout) -> Result<()> {
        let root = layout.root();
        let metadata = fs::metadata(root).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LibraryError::NotADirectory(root.to_path_buf()),
            _ => LibraryError::from_io(root, e),
        })?;
        if !metadata.is_dir() {
            return Err(LibraryError::NotADirectory(root.to_path_buf()));
        }
        ensure_writable(root)?;

        for category in Category::SORTED {
            let dir = layout.category_dir(category);
            if !dir.is_dir() {
                fs::create_dir_all(&dir).map_err(|e| LibraryError::from_io(&dir, e))?;
                info!("Created category directory {}", dir.display());
            }
            ensure_writable(&dir)?;
        }

        Ok(())
    }

    /// Prepare the layout and scan it into a fresh index
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` if the layout cannot be prepared or a required
    /// directory cannot be read. Missing bucket directories count as empty.
    pub fn scan(layout: &Layout) -> Result<Self> {
        Self::prepare(layout)?;

        let mut items = scan_dir(layout.root(), Classification::unsorted(), true)?;
        for category in Category::SORTED {
            items.extend(scan_dir(
                &layout.category_dir(category),
                Classification::root(category),
                true,
            )?);
            for bucket in SubBucket::all() {
                let Some(classification) = Classification::with_bucket(category, Some(bucket)) else {
                    continue;
                };
                items.extend(scan_dir(
                    &layout.bucket_dir(category, bucket),
                    classification,
                    false,
                )?);
            }
        }

        let index = Self::from_items(items);
        info!(
            "Scanned {}: {} item(s), {} duplicate name(s)",
            layout.root().display(),
            index.len(),
            index.duplicates.len()
        );
        for name in &index.duplicates {
            warn!("Duplicate media name in library: {name}");
        }
        Ok(index)
    }

    /// Build an index from items in scan order
    ///
    /// Sorting is stable, so duplicates keep their scan order.
    #[must_use]
    pub(crate) fn from_items(mut items: Vec<MediaItem>) -> Self {
        items.sort_by(|a, b| compare_names(a.name(), b.name()));

        let mut duplicates: Vec<String> = Vec::new();
        for pair in items.windows(2) {
            if pair[0].name() == pair[1].name()
                && duplicates.last().map(String::as_str) != Some(pair[0].name())
            {
                duplicates.push(pair[0].name().to_string());
            }
        }

        Self { items, duplicates }
    }

    /// All items, sorted by name
    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolve the live item for a name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MediaItem> {
        self.position(name).map(|idx| &self.items[idx])
    }

    /// Names that appear more than once in the tree
    #[must_use]
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name() == name)
    }

    /// Swap in the new state of an item as a single assignment
    pub(crate) fn replace(&mut self, idx: usize, item: MediaItem) {
        if let Some(slot) = self.items.get_mut(idx) {
            *slot = item;
        }
    }

    /// Counts per category, bucket and media type
    #[must_use]
    pub fn summary(&self) -> LibrarySummary {
        let mut summary = LibrarySummary::default();
        for item in &self.items {
            *summary.by_category.entry(item.category()).or_default() += 1;
            if let Some(bucket) = item.sub_bucket() {
                *summary
                    .by_bucket
                    .entry((item.category(), bucket.get()))
                    .or_default() += 1;
            }
            match item.kind() {
                MediaType::Video => summary.videos += 1,
                MediaType::Image => summary.images += 1,
            }
        }
        summary
    }
}

/// Aggregate counts over a library index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibrarySummary {
    pub by_category: BTreeMap<Category, usize>,
    pub by_bucket: BTreeMap<(Category, u8), usize>,
    pub videos: usize,
    pub images: usize,
}

impl LibrarySummary {
    #[must_use]
    pub fn total(&self) -> usize {
        self.videos + self.images
    }

    #[must_use]
    pub fn count(&self, category: Category) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }
}

/// Create and drop a hidden file in `dir`; mode bits alone miss ownership
fn ensure_writable(dir: &Path) -> Result<()> {
    tempfile::Builder::new()
        .prefix(".sortr-")
        .tempfile_in(dir)
        .map(drop)
        .map_err(|e| LibraryError::from_io(dir, e))
}

/// Collect the media files directly inside `dir`
///
/// When `required` is false a missing directory is treated as empty.
fn scan_dir(dir: &Path, classification: Classification, required: bool) -> Result<Vec<MediaItem>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if !required && e.kind() == io::ErrorKind::NotFound => {
            debug!("No bucket directory at {}, treating as empty", dir.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(LibraryError::from_io(dir, e)),
    };

    let mut items = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LibraryError::from_io(dir, e))?;
        if !entry.path().is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            debug!("Skipping non UTF-8 file name in {}", dir.display());
            continue;
        };
        if let Some(item) = MediaItem::from_file(name, classification, dir.to_path_buf()) {
            items.push(item);
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestTree;

    #[test]
    fn test_prepare_creates_category_dirs() {
        let tree = TestTree::new();
        let layout = tree.layout();

        LibraryIndex::prepare(&layout).unwrap();

        assert!(tree.root().join("liked").is_dir());
        assert!(tree.root().join("disliked").is_dir());
        assert!(tree.root().join("super").is_dir());

        // second call is a no-op
        LibraryIndex::prepare(&layout).unwrap();
    }

    #[test]
    fn test_prepare_missing_root() {
        let tree = TestTree::new();
        let layout = Layout::new(tree.root().join("nope"));

        let result = LibraryIndex::prepare(&layout);
        assert!(matches!(result, Err(LibraryError::NotADirectory(_))));
    }

    #[test]
    fn test_prepare_leaves_no_check_files() {
        let tree = TestTree::new().with_file("a.mp4");
        LibraryIndex::prepare(&tree.layout()).unwrap();

        let leftovers = fs::read_dir(tree.root())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(".sortr-"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_prepare_read_only_category_dir() {
        use std::os::unix::fs::PermissionsExt;

        let tree = TestTree::new().with_file("liked/a.mp4");
        for name in ["disliked", "super"] {
            fs::create_dir_all(tree.root().join(name)).unwrap();
        }
        let liked = tree.root().join("liked");
        fs::set_permissions(&liked, fs::Permissions::from_mode(0o555)).unwrap();

        // permission bits do not bind root
        let bypassed = fs::write(liked.join("check"), b"").is_ok();
        let result = LibraryIndex::prepare(&tree.layout());
        fs::set_permissions(&liked, fs::Permissions::from_mode(0o755)).unwrap();
        if bypassed {
            return;
        }

        assert!(matches!(result, Err(LibraryError::PermissionDenied(ref p)) if p == &liked));
    }

    #[test]
    fn test_scan_assigns_categories_and_buckets() {
        let tree = TestTree::new()
            .with_file("a.mp4")
            .with_file("liked/b.jpg")
            .with_file("liked/3/c.webm")
            .with_file("super/9/d.gif")
            .with_file("disliked/e.mov");

        let index = LibraryIndex::scan(&tree.layout()).unwrap();
        assert_eq!(index.len(), 5);

        let a = index.get("a.mp4").unwrap();
        assert_eq!(a.category(), Category::Unsorted);
        assert!(a.sub_bucket().is_none());

        let b = index.get("b.jpg").unwrap();
        assert_eq!(b.category(), Category::Liked);
        assert_eq!(b.kind(), MediaType::Image);

        let c = index.get("c.webm").unwrap();
        assert_eq!(c.category(), Category::Liked);
        assert_eq!(c.sub_bucket().map(SubBucket::get), Some(3));
        assert_eq!(c.dir(), tree.root().join("liked").join("3"));

        let d = index.get("d.gif").unwrap();
        assert_eq!(d.category(), Category::Super);
        assert_eq!(d.sub_bucket().map(SubBucket::get), Some(9));
    }

    #[test]
    fn test_scan_filters_extensions() {
        let tree = TestTree::new()
            .with_file("clip.MP4")
            .with_file("photo.PNG")
            .with_file("notes.txt")
            .with_file("liked/readme.md");

        let index = LibraryIndex::scan(&tree.layout()).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("clip.MP4").unwrap().kind(), MediaType::Video);
        assert_eq!(index.get("photo.PNG").unwrap().kind(), MediaType::Image);
        assert!(index.get("notes.txt").is_none());
    }

    #[test]
    fn test_scan_ignores_deeper_nesting_and_unknown_dirs() {
        let tree = TestTree::new()
            .with_file("liked/3/deep/x.mp4")
            .with_file("liked/10/y.mp4")
            .with_file("other/z.mp4");

        let index = LibraryIndex::scan(&tree.layout()).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_scan_sorts_by_name() {
        let tree = TestTree::new()
            .with_file("c.mp4")
            .with_file("super/A.png")
            .with_file("liked/b.mp4");

        let index = LibraryIndex::scan(&tree.layout()).unwrap();
        let names: Vec<_> = index.items().iter().map(MediaItem::name).collect();
        assert_eq!(names, vec!["A.png", "b.mp4", "c.mp4"]);
    }

    #[test]
    fn test_duplicates_are_reported_not_resolved() {
        let tree = TestTree::new()
            .with_file("same.mp4")
            .with_file("liked/same.mp4")
            .with_file("other.mp4");

        let index = LibraryIndex::scan(&tree.layout()).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.duplicates(), &["same.mp4".to_string()]);
        // first copy in scan order (root before liked)
        assert_eq!(index.get("same.mp4").unwrap().category(), Category::Unsorted);
    }

    #[test]
    fn test_summary_counts() {
        let tree = TestTree::new()
            .with_file("a.mp4")
            .with_file("liked/b.jpg")
            .with_file("liked/2/c.mp4")
            .with_file("liked/2/d.mp4");

        let summary = LibraryIndex::scan(&tree.layout()).unwrap().summary();
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.videos, 3);
        assert_eq!(summary.images, 1);
        assert_eq!(summary.count(Category::Liked), 3);
        assert_eq!(summary.count(Category::Super), 0);
        assert_eq!(summary.by_bucket.get(&(Category::Liked, 2)), Some(&2));
    }
}
