//! Output formatting for CLI display
//!
//! Formatting helpers shared by the one-shot commands and the triage session.
//! Everything here returns `String`s; printing is left to the caller.

use crate::engine::ActionOutcome;
use crate::filter::Filter;
use crate::grid::PAGE_SIZE;
use crate::media::{Category, Classification, MediaItem};
use colored::Colorize;

/// Width of one grid cell, in characters
const CELL_WIDTH: usize = 24;

/// Feedback symbol shown when an item lands in a category
#[must_use]
pub const fn category_symbol(category: Category) -> &'static str {
    match category {
        Category::Unsorted => "·",
        Category::Liked => "♥",
        Category::Disliked => "✗",
        Category::Super => "★",
    }
}

/// Colored category name
#[must_use]
pub fn category_label(category: Category) -> String {
    let name = category.as_str();
    match category {
        Category::Unsorted => name.dimmed().to_string(),
        Category::Liked => name.green().to_string(),
        Category::Disliked => name.red().to_string(),
        Category::Super => name.yellow().bold().to_string(),
    }
}

/// Colored classification, e.g. `liked/3`
#[must_use]
pub fn classification_label(classification: Classification) -> String {
    match classification.sub_bucket() {
        Some(bucket) => format!("{}/{bucket}", category_label(classification.category())),
        None => category_label(classification.category()),
    }
}

/// One item per line for `list`
#[must_use]
pub fn item_line(item: &MediaItem, quiet: bool) -> String {
    if quiet {
        item.name().to_string()
    } else {
        format!(
            "  {} [{}] {}",
            item.name(),
            classification_label(item.classification()),
            item.kind().to_string().dimmed()
        )
    }
}

/// Status line of the single-item view: counter, filter and current item
#[must_use]
pub fn status_line(position: Option<(usize, usize)>, filter: Filter, item: Option<&MediaItem>) -> String {
    let counter = match position {
        Some((index, len)) => format!("{index} of {len}"),
        None => "0 of 0".to_string(),
    };
    let filter = format!("[{filter}]").dimmed();

    match item {
        Some(item) => format!(
            "{} {filter} {} ({}, {})",
            counter.bold(),
            item.name().blue().bold(),
            classification_label(item.classification()),
            item.kind()
        ),
        None => format!("{} {filter} {}", counter.bold(), "no items".dimmed()),
    }
}

/// Render one grid page as three rows of three cells
///
/// Empty slots render as blank cells; the targeted slot is highlighted.
#[must_use]
pub fn grid_lines(
    slots: &[Option<&MediaItem>; PAGE_SIZE],
    targeted: Option<usize>,
    page: usize,
    page_count: usize,
) -> Vec<String> {
    let mut lines = vec![format!("Page {} of {}", page + 1, page_count.max(1)).bold().to_string()];

    lines.extend(slots.chunks(3).enumerate().map(|(row, chunk)| {
        chunk
            .iter()
            .enumerate()
            .map(|(col, slot)| grid_cell(row * 3 + col, *slot, targeted))
            .collect::<Vec<_>>()
            .join(" ")
    }));

    lines
}

fn grid_cell(slot: usize, item: Option<&MediaItem>, targeted: Option<usize>) -> String {
    let Some(item) = item else {
        return " ".repeat(CELL_WIDTH);
    };

    let name = truncate(item.name(), CELL_WIDTH - 4);
    let cell = format!("{}) {name:<width$}", slot + 1, width = CELL_WIDTH - 3);
    if targeted == Some(slot) {
        cell.reversed().to_string()
    } else {
        cell
    }
}

fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let mut short: String = name.chars().take(max.saturating_sub(1)).collect();
    short.push('…');
    short
}

/// Human readable report of an action
#[must_use]
pub fn outcome_message(outcome: &ActionOutcome) -> String {
    match outcome {
        ActionOutcome::Applied { item, stale_source } => {
            let mut message = format!(
                "{} {} -> {}",
                category_symbol(item.category()),
                item.name(),
                classification_label(item.classification())
            );
            if let Some(stale) = stale_source {
                message.push_str(&format!(
                    "\n{} original still at {}",
                    "Warning:".yellow().bold(),
                    stale.display()
                ));
            }
            message
        }
        ActionOutcome::NoOp(reason) => format!("({reason})").dimmed().to_string(),
    }
}

/// Byte count with a binary unit, e.g. `1.5 MiB`
#[must_use]
pub fn format_size(bytes: u64) -> String {
    use byte_unit::{Byte, UnitType};

    format!("{:.1}", Byte::from_u64(bytes).get_appropriate_unit(UnitType::Binary))
}
