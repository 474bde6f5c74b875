//! Scan command - summarize the media root

use crate::{
    library::LibraryIndex,
    media::{Category, Layout},
    output,
    SortrError,
};
use colored::Colorize;
use std::fs;
use std::path::Path;

type Result<T> = std::result::Result<T, SortrError>;

/// Execute the scan command
///
/// # Errors
/// Returns an error if the root cannot be prepared or scanned
pub fn execute(root: &Path, quiet: bool) -> Result<()> {
    let index = LibraryIndex::scan(&Layout::new(root))?;
    let summary = index.summary();

    if quiet {
        println!("{}", summary.total());
        return Ok(());
    }

    let bytes: u64 = index
        .items()
        .iter()
        .filter_map(|item| fs::metadata(item.path()).ok())
        .map(|metadata| metadata.len())
        .sum();

    println!("{} {}", "Media root:".bold(), root.display());
    println!(
        "  {} item(s), {} video(s), {} image(s), {}",
        summary.total(),
        summary.videos,
        summary.images,
        output::format_size(bytes)
    );

    for category in Category::ALL {
        println!(
            "  {} {:>6}",
            output::category_label(category),
            summary.count(category)
        );
        for ((_, bucket), count) in summary
            .by_bucket
            .iter()
            .filter(|((owner, _), _)| *owner == category)
        {
            println!("    {}/{bucket} {count:>4}", category.as_str().dimmed());
        }
    }

    if !index.duplicates().is_empty() {
        println!(
            "{}",
            "Warning: the same name exists in more than one place:".yellow().bold()
        );
        for name in index.duplicates() {
            let places: Vec<String> = index
                .items()
                .iter()
                .filter(|item| item.name() == name)
                .map(|item| item.classification().to_string())
                .collect();
            println!("  {name} ({})", places.join(", "));
        }
    }

    Ok(())
}

