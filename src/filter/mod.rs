//! Filter engine - category and media type projection
//!
//! A [`Filter`] selects exactly one category plus a media type filter. Applying
//! it to a [`LibraryIndex`] produces a [`FilteredView`]: a name-sorted copy of
//! the matching items. Views are recomputed whenever the index or the filter
//! changes, never patched in place, and applying a filter never touches item
//! state.

use crate::library::LibraryIndex;
use crate::media::{Category, MediaItem, MediaType, compare_names};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Media type selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MediaFilter {
    /// Videos and images
    #[default]
    All,
    /// Videos only
    Video,
    /// Images only
    Image,
}

impl MediaFilter {
    #[must_use]
    pub const fn matches(self, kind: MediaType) -> bool {
        matches!(
            (self, kind),
            (Self::All, _) | (Self::Video, MediaType::Video) | (Self::Image, MediaType::Image)
        )
    }

    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "all" | "a" => Some(Self::All),
            "video" | "videos" | "v" => Some(Self::Video),
            "image" | "images" | "i" => Some(Self::Image),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Video => "video",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for MediaFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Active filter selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Filter {
    pub category: Category,
    pub media: MediaFilter,
}

impl Filter {
    #[must_use]
    pub const fn new(category: Category, media: MediaFilter) -> Self {
        Self { category, media }
    }

    #[must_use]
    pub fn matches(&self, item: &MediaItem) -> bool {
        item.category() == self.category && self.media.matches(item.kind())
    }

    /// Project the index through this filter
    #[must_use]
    pub fn apply(&self, index: &LibraryIndex) -> FilteredView {
        let mut items: Vec<MediaItem> = index
            .items()
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect();
        items.sort_by(|a, b| compare_names(a.name(), b.name()));

        FilteredView {
            filter: *self,
            items,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.category, self.media)
    }
}

/// Name-sorted snapshot of the items matching a filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    filter: Filter,
    items: Vec<MediaItem>,
}

impl FilteredView {
    #[must_use]
    pub const fn filter(&self) -> Filter {
        self.filter
    }

    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&MediaItem> {
        self.items.get(idx)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the item with the given name
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name() == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(MediaItem::name)
    }
}
