//! Classification engine
//!
//! One [`Engine`] is opened per media root. It owns everything the review
//! workflow mutates:
//!
//! - the [`LibraryIndex`] (authoritative item collection)
//! - the active [`Filter`] and the [`FilteredView`] derived from it
//! - the single-item [`Cursor`]
//! - the single [`ActionRecord`] used for undo
//! - the [`GridState`] of batch review mode
//!
//! # Transitions
//!
//! `classify`, `move_to_sub_bucket` and `undo` all go through the same path:
//! relocate the file through the [`MediaStore`], and only after the store
//! reports success replace the item in the index with a single assignment.
//! If the store fails, nothing in the engine changes.
//!
//! # Undo
//!
//! Depth one. Each successful transition overwrites the record; a successful
//! undo consumes it, switches the category filter to the restored category
//! and focuses the restored item.

mod batch;
pub mod error;
pub mod history;
pub mod outcome;

pub use error::{EngineError, Result};
pub use history::ActionRecord;
pub use outcome::{ActionOutcome, NoOp};

use crate::cursor::Cursor;
use crate::filter::{Filter, FilteredView, MediaFilter};
use crate::grid::GridState;
use crate::library::LibraryIndex;
use crate::media::{Category, Classification, Layout, MediaItem, MediaType, SubBucket};
use crate::store::{LocalStore, MediaStore};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Review session over one media root
#[derive(Debug)]
pub struct Engine<S: MediaStore = LocalStore> {
    layout: Layout,
    store: S,
    index: LibraryIndex,
    filter: Filter,
    view: FilteredView,
    cursor: Cursor,
    last_action: Option<ActionRecord>,
    grid: GridState,
    advance_to_unsorted: bool,
}

impl Engine<LocalStore> {
    /// Open a root on the local filesystem
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Library` if the root is missing, not writable,
    /// or cannot be scanned.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_store(root, LocalStore::new())
    }
}

impl<S: MediaStore> Engine<S> {
    /// Open a root with a custom store
    ///
    /// Creates the category directories if needed and scans the tree.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Library` if the layout cannot be prepared or
    /// scanned.
    pub fn open_with_store(root: impl Into<PathBuf>, store: S) -> Result<Self> {
        let layout = Layout::new(root);
        let index = LibraryIndex::scan(&layout)?;
        let filter = Filter::default();
        let view = filter.apply(&index);

        Ok(Self {
            layout,
            store,
            index,
            filter,
            view,
            cursor: Cursor::default(),
            last_action: None,
            grid: GridState::Inactive,
            advance_to_unsorted: true,
        })
    }

    /// Start with a specific filter
    #[must_use]
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.set_filter(filter);
        self
    }

    /// Whether a cursor classify jumps to the next unsorted item
    #[must_use]
    pub const fn with_advance_to_unsorted(mut self, enabled: bool) -> Self {
        self.advance_to_unsorted = enabled;
        self
    }

    // ========================================================================
    // Read access
    // ========================================================================

    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub const fn index(&self) -> &LibraryIndex {
        &self.index
    }

    #[must_use]
    pub const fn filter(&self) -> Filter {
        self.filter
    }

    #[must_use]
    pub const fn view(&self) -> &FilteredView {
        &self.view
    }

    #[must_use]
    pub const fn last_action(&self) -> Option<&ActionRecord> {
        self.last_action.as_ref()
    }

    #[must_use]
    pub const fn grid(&self) -> &GridState {
        &self.grid
    }

    /// Item under the single-item cursor
    #[must_use]
    pub fn current(&self) -> Option<&MediaItem> {
        self.cursor.current(&self.view)
    }

    /// One-based cursor position and view length
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        self.cursor.position(self.view.len())
    }

    // ========================================================================
    // Filter and navigation
    // ========================================================================

    /// Replace the active filter
    ///
    /// Recomputes the view and, in grid mode, rebuilds the grid snapshot.
    pub fn set_filter(&mut self, filter: Filter) {
        if filter == self.filter {
            return;
        }
        debug!("Filter changed to {filter}");
        self.filter = filter;
        self.on_filter_change();
    }

    pub fn set_category(&mut self, category: Category) {
        self.set_filter(Filter::new(category, self.filter.media));
    }

    pub fn set_media_filter(&mut self, media: MediaFilter) {
        self.set_filter(Filter::new(self.filter.category, media));
    }

    pub fn next(&mut self) {
        self.cursor.next(self.view.len());
    }

    pub fn prev(&mut self) {
        self.cursor.prev(self.view.len());
    }

    /// Move the cursor to a named item in the current view
    pub fn focus(&mut self, name: &str) -> bool {
        self.cursor.focus(&self.view, name)
    }

    /// Reload the index from disk
    ///
    /// The undo record is dropped because the directories it remembers may
    /// no longer match the tree.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Library` if scanning fails; the engine keeps its
    /// previous index in that case.
    pub fn rescan(&mut self) -> Result<()> {
        self.index = LibraryIndex::scan(&self.layout)?;
        self.last_action = None;
        self.on_filter_change();
        Ok(())
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Move an item to the root of another category
    ///
    /// Clears the sub-bucket. Classifying into the current category is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown names and `RelocateFailed` if the file
    /// could not be written to its new place.
    pub fn classify(&mut self, name: &str, target: Category) -> Result<ActionOutcome> {
        let (idx, item) = self.locate(name)?;
        if item.category() == target {
            return Ok(ActionOutcome::NoOp(NoOp::AlreadyInCategory));
        }
        self.transition(idx, Classification::root(target))
    }

    /// Move an item into bucket `n` of its category, `0` meaning the
    /// category root
    ///
    /// # Errors
    ///
    /// Returns `InvalidBucket` for `n > 9`, `NotCategorized` for unsorted
    /// items, `NotFound` for unknown names and `RelocateFailed` if the file
    /// could not be written to its new place.
    pub fn move_to_sub_bucket(&mut self, name: &str, n: u8) -> Result<ActionOutcome> {
        let bucket = match n {
            0 => None,
            _ => Some(SubBucket::new(n).ok_or(EngineError::InvalidBucket(n))?),
        };

        let (idx, item) = self.locate(name)?;
        if item.sub_bucket() == bucket {
            return Ok(ActionOutcome::NoOp(NoOp::AlreadyInBucket));
        }
        let target = Classification::with_bucket(item.category(), bucket)
            .ok_or_else(|| EngineError::NotCategorized(name.to_string()))?;
        self.transition(idx, target)
    }

    /// Revert the last successful transition
    ///
    /// On success the record is cleared, the category filter switches to the
    /// restored category and the cursor focuses the restored item, which is
    /// also returned in the outcome.
    ///
    /// # Errors
    ///
    /// Returns `RelocateFailed` if the file could not be moved back. The
    /// record is kept so the undo can be retried.
    pub fn undo(&mut self) -> Result<ActionOutcome> {
        let Some(record) = self.last_action.clone() else {
            return Ok(ActionOutcome::NoOp(NoOp::NothingToUndo));
        };
        let (idx, item) = self.locate(record.name())?;

        let previous_path = record.previous_path();
        let relocation = if record.stale_source() == Some(previous_path.as_path()) {
            self.store.restore_stale(&item.path(), &previous_path)
        } else {
            self.store.relocate(&item.path(), record.previous_dir())
        }
        .map_err(|source| EngineError::RelocateFailed {
            name: record.name().to_string(),
            source,
        })?;
        let restored = item.relocated(record.previous(), record.previous_dir().to_path_buf());
        info!(
            "Undo: {} back from {} to {}",
            restored.name(),
            item.classification(),
            restored.classification()
        );
        report_stale(relocation.stale_source.as_deref());

        self.index.replace(idx, restored.clone());
        self.last_action = None;

        if restored.category() == self.filter.category {
            self.refresh_view();
            if let Some(session) = self.grid.session_mut()
                && !session.restore(restored.name())
            {
                session.rebuild(&self.view);
            }
        } else {
            self.set_category(restored.category());
        }
        self.cursor.focus(&self.view, restored.name());

        Ok(ActionOutcome::Applied {
            item: restored,
            stale_source: relocation.stale_source,
        })
    }

    /// Classify the item under the cursor
    ///
    /// On success the cursor jumps to the next unsorted item after it (in
    /// name order, wrapping) when that item is visible.
    ///
    /// # Errors
    ///
    /// Same as [`Engine::classify`].
    pub fn classify_current(&mut self, target: Category) -> Result<ActionOutcome> {
        let Some(name) = self.current().map(|item| item.name().to_string()) else {
            return Ok(ActionOutcome::NoOp(NoOp::NoCurrentItem));
        };
        let next = self.next_unsorted_after(&name);
        let outcome = self.classify(&name, target)?;
        if outcome.is_applied() {
            self.advance_to(next.as_deref());
        }
        Ok(outcome)
    }

    /// Move the item under the cursor into a bucket
    ///
    /// # Errors
    ///
    /// Same as [`Engine::move_to_sub_bucket`].
    pub fn move_current_to_sub_bucket(&mut self, n: u8) -> Result<ActionOutcome> {
        let Some(name) = self.current().map(|item| item.name().to_string()) else {
            return Ok(ActionOutcome::NoOp(NoOp::NoCurrentItem));
        };
        let next = self.next_unsorted_after(&name);
        let outcome = self.move_to_sub_bucket(&name, n)?;
        if outcome.is_applied() {
            self.advance_to(next.as_deref());
        }
        Ok(outcome)
    }

    /// Write a pre-encoded PNG frame next to a video
    ///
    /// The file is named `<basename>_screenshot.png` and lands in the
    /// directory the video currently lives in. The index is not updated; the
    /// screenshot shows up on the next scan.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `NotAVideo`, or `CaptureFailed` if the write fails.
    pub fn capture_still(&self, name: &str, frame_png: &[u8]) -> Result<PathBuf> {
        let (_, item) = self.locate(name)?;
        if item.kind() != MediaType::Video {
            return Err(EngineError::NotAVideo(name.to_string()));
        }

        let stem = Path::new(item.name())
            .file_stem()
            .map(|stem| stem.to_string_lossy())
            .unwrap_or_default();
        let path = item.dir().join(format!("{stem}_screenshot.png"));

        self.store
            .write_file(&path, frame_png)
            .map_err(|source| EngineError::CaptureFailed {
                name: name.to_string(),
                source,
            })?;
        info!("Captured still {}", path.display());
        Ok(path)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn locate(&self, name: &str) -> Result<(usize, &MediaItem)> {
        let idx = self
            .index
            .position(name)
            .ok_or_else(|| EngineError::NotFound(name.to_string()))?;
        Ok((idx, &self.index.items()[idx]))
    }

    fn transition(&mut self, idx: usize, target: Classification) -> Result<ActionOutcome> {
        let item = &self.index.items()[idx];
        let dest_dir = self.layout.dir_for(target);

        let relocation = self
            .store
            .relocate(&item.path(), &dest_dir)
            .map_err(|source| EngineError::RelocateFailed {
                name: item.name().to_string(),
                source,
            })?;

        let record = ActionRecord::capture(item).with_stale_source(relocation.stale_source.clone());
        let moved = item.relocated(target, dest_dir);
        info!(
            "Moved {} from {} to {}",
            moved.name(),
            item.classification(),
            target
        );
        report_stale(relocation.stale_source.as_deref());

        self.index.replace(idx, moved.clone());
        self.last_action = Some(record);
        self.refresh_view();

        Ok(ActionOutcome::Applied {
            item: moved,
            stale_source: relocation.stale_source,
        })
    }

    fn next_unsorted_after(&self, name: &str) -> Option<String> {
        let items = self.index.items();
        let start = items.iter().position(|item| item.name() == name)?;
        (1..items.len())
            .map(|offset| &items[(start + offset) % items.len()])
            .find(|item| item.category() == Category::Unsorted)
            .map(|item| item.name().to_string())
    }

    fn advance_to(&mut self, next: Option<&str>) {
        if !self.advance_to_unsorted {
            return;
        }
        if let Some(name) = next
            && !self.cursor.focus(&self.view, name)
        {
            self.cursor.reset();
        }
    }

    fn refresh_view(&mut self) {
        self.view = self.filter.apply(&self.index);
        self.cursor.clamp(self.view.len());
    }

    fn on_filter_change(&mut self) {
        self.refresh_view();
        if let Some(session) = self.grid.session_mut() {
            session.rebuild(&self.view);
            debug!("Grid snapshot rebuilt with {} item(s)", session.entries().len());
        }
    }
}

fn report_stale(stale_source: Option<&Path>) {
    if let Some(path) = stale_source {
        warn!(
            "Original file could not be removed and now exists twice: {}",
            path.display()
        );
    }
}
