//! Grid session manager - positionally stable batch review
//!
//! A grid session is a snapshot of a [`FilteredView`] taken when grid mode is
//! entered (or the filter changes while it is active), split into pages of
//! nine slots. The library keeps changing underneath it, but the snapshot does
//! not: classifying the item in a slot marks that entry consumed and the slot
//! renders empty. Nothing is removed and nothing reflows.
//!
//! # State machine
//!
//! ```text
//! Inactive ──enter──▶ Active ──exit──▶ Inactive
//!                      │  ▲
//!                      └──┘ filter change: rebuild snapshot, clamp page
//! ```
//!
//! # Slot resolution
//!
//! The snapshot only stores names. Before rendering, every non-consumed entry
//! is resolved to the live item in the [`LibraryIndex`] so the caller always
//! sees the current location of the file. Entries that no longer resolve
//! render empty.

use crate::filter::FilteredView;
use crate::library::LibraryIndex;
use crate::media::MediaItem;

/// Number of slots on a grid page (3x3)
pub const PAGE_SIZE: usize = 9;

/// One snapshot entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridEntry {
    name: String,
    consumed: bool,
}

impl GridEntry {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True once the item was classified away during this session
    #[must_use]
    pub const fn consumed(&self) -> bool {
        self.consumed
    }
}

/// Grid mode state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GridState {
    #[default]
    Inactive,
    Active(GridSession),
}

impl GridState {
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    #[must_use]
    pub const fn session(&self) -> Option<&GridSession> {
        match self {
            Self::Active(session) => Some(session),
            Self::Inactive => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut GridSession> {
        match self {
            Self::Active(session) => Some(session),
            Self::Inactive => None,
        }
    }
}

/// Paginated snapshot of a filtered view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSession {
    entries: Vec<GridEntry>,
    page: usize,
    target: Option<usize>,
}

impl GridSession {
    /// Snapshot a view, every entry starts unconsumed
    #[must_use]
    pub fn new(view: &FilteredView) -> Self {
        Self {
            entries: snapshot(view),
            page: 0,
            target: None,
        }
    }

    /// Replace the snapshot after a filter change, keeping the page if it
    /// still exists
    pub fn rebuild(&mut self, view: &FilteredView) {
        self.entries = snapshot(view);
        self.page = self.page.min(self.page_count().saturating_sub(1));
        self.target = None;
    }

    #[must_use]
    pub fn entries(&self) -> &[GridEntry] {
        &self.entries
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Number of pages, 0 for an empty snapshot
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.entries.len().div_ceil(PAGE_SIZE)
    }

    /// Number of entries not yet consumed
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.consumed).count()
    }

    /// True when there is nothing left to review
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Entry behind a slot (0-8) of the current page
    #[must_use]
    pub fn entry(&self, slot: usize) -> Option<&GridEntry> {
        if slot >= PAGE_SIZE {
            return None;
        }
        self.entries.get(self.page * PAGE_SIZE + slot)
    }

    /// Slot currently under focus
    #[must_use]
    pub const fn targeted(&self) -> Option<usize> {
        self.target
    }

    /// Focus a slot, returns false for slots outside the page
    pub fn target(&mut self, slot: usize) -> bool {
        if slot < PAGE_SIZE {
            self.target = Some(slot);
            true
        } else {
            false
        }
    }

    /// Go to the next page, wrapping to the first
    pub fn next_page(&mut self) {
        self.step(true);
    }

    /// Go to the previous page, wrapping to the last
    pub fn prev_page(&mut self) {
        self.step(false);
    }

    /// Mark the entry behind a slot consumed
    ///
    /// If that empties the page, moves on to the next page that still has
    /// items. Returns false if the slot has no entry.
    pub fn consume(&mut self, slot: usize) -> bool {
        if slot >= PAGE_SIZE {
            return false;
        }
        let Some(entry) = self.entries.get_mut(self.page * PAGE_SIZE + slot) else {
            return false;
        };
        entry.consumed = true;
        self.settle();
        true
    }

    /// Clear the consumed flag of a named entry (used after an undo)
    ///
    /// Returns false if the name is not part of the snapshot.
    pub fn restore(&mut self, name: &str) -> bool {
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => {
                entry.consumed = false;
                true
            }
            None => false,
        }
    }

    /// Resolve the current page into live items
    ///
    /// Consumed entries, entries past the end of the snapshot and entries
    /// that no longer resolve by name are `None`.
    #[must_use]
    pub fn slots<'a>(&self, index: &'a LibraryIndex) -> [Option<&'a MediaItem>; PAGE_SIZE] {
        std::array::from_fn(|slot| self.resolve(slot, index))
    }

    /// Resolve a single slot into its live item
    #[must_use]
    pub fn resolve<'a>(&self, slot: usize, index: &'a LibraryIndex) -> Option<&'a MediaItem> {
        self.entry(slot)
            .filter(|entry| !entry.consumed)
            .and_then(|entry| index.get(&entry.name))
    }

    fn page_consumed(&self, page: usize) -> bool {
        self.entries
            .iter()
            .skip(page * PAGE_SIZE)
            .take(PAGE_SIZE)
            .all(|entry| entry.consumed)
    }

    fn step(&mut self, forward: bool) {
        let count = self.page_count();
        if count == 0 {
            return;
        }
        self.target = None;

        let advance = |page: usize| {
            if forward {
                (page + 1) % count
            } else {
                (page + count - 1) % count
            }
        };

        let mut page = advance(self.page);
        if !self.is_exhausted() {
            // skip pages that only hold consumed entries
            while self.page_consumed(page) {
                page = advance(page);
            }
        }
        self.page = page;
    }

    fn settle(&mut self) {
        if self.page_count() > 0 && self.page_consumed(self.page) && !self.is_exhausted() {
            self.step(true);
        }
    }
}

fn snapshot(view: &FilteredView) -> Vec<GridEntry> {
    view.names()
        .map(|name| GridEntry {
            name: name.to_string(),
            consumed: false,
        })
        .collect()
}
