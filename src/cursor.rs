//! Single-item cursor over a filtered view
//!
//! The cursor is a plain index. It wraps around at both ends and is clamped
//! every time the view is recomputed, so it always points at a valid item
//! unless the view is empty.

use crate::filter::FilteredView;
use crate::media::MediaItem;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
}

impl Cursor {
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Item under the cursor
    #[must_use]
    pub fn current<'a>(&self, view: &'a FilteredView) -> Option<&'a MediaItem> {
        view.get(self.index)
    }

    /// Move forward, wrapping to the first item
    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.index = (self.index + 1) % len;
        }
    }

    /// Move back, wrapping to the last item
    pub fn prev(&mut self, len: usize) {
        if len > 0 {
            self.index = (self.index + len - 1) % len;
        }
    }

    /// Keep the index inside a view of `len` items
    pub fn clamp(&mut self, len: usize) {
        if self.index >= len {
            self.index = len.saturating_sub(1);
        }
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Point at the named item, returns false if it is not in the view
    pub fn focus(&mut self, view: &FilteredView, name: &str) -> bool {
        match view.position(name) {
            Some(idx) => {
                self.index = idx;
                true
            }
            None => false,
        }
    }

    /// One-based position and total, `None` for an empty view
    #[must_use]
    pub fn position(&self, len: usize) -> Option<(usize, usize)> {
        (len > 0).then(|| (self.index.min(len - 1) + 1, len))
    }
}
