//! Action outcomes
//!
//! Pure data about what an action did, so the presentation layer can decide
//! how to report it.

use crate::media::MediaItem;
use std::fmt;
use std::path::PathBuf;

/// Result of a classify, bucket move or undo
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The file was relocated and the model updated
    Applied {
        /// New state of the item (the item to focus after an undo)
        item: MediaItem,
        /// Original file left behind because its removal failed
        stale_source: Option<PathBuf>,
    },

    /// Nothing happened
    NoOp(NoOp),
}

impl ActionOutcome {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// Item affected by an applied action
    #[must_use]
    pub const fn item(&self) -> Option<&MediaItem> {
        match self {
            Self::Applied { item, .. } => Some(item),
            Self::NoOp(_) => None,
        }
    }
}

/// Reason an action did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOp {
    AlreadyInCategory,
    AlreadyInBucket,
    NothingToUndo,
    NoCurrentItem,
    EmptySlot,
    GridInactive,
}

impl fmt::Display for NoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::AlreadyInCategory => "already in that category",
            Self::AlreadyInBucket => "already in that bucket",
            Self::NothingToUndo => "nothing to undo",
            Self::NoCurrentItem => "no item selected",
            Self::EmptySlot => "slot is empty",
            Self::GridInactive => "grid mode is off",
        };
        f.write_str(msg)
    }
}
