//! List command - print the items matching a filter

use crate::{
    cli::OutputFormat,
    filter::Filter,
    library::LibraryIndex,
    media::Layout,
    output,
    SortrError,
};
use std::path::Path;

type Result<T> = std::result::Result<T, SortrError>;

/// Execute the list command
///
/// # Errors
/// Returns an error if the root cannot be scanned or JSON encoding fails
pub fn execute(root: &Path, filter: Filter, format: OutputFormat, quiet: bool) -> Result<()> {
    let index = LibraryIndex::scan(&Layout::new(root))?;
    let view = filter.apply(&index);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(view.items())?);
        }
        OutputFormat::Text => {
            if view.is_empty() {
                if !quiet {
                    println!("No items match [{filter}].");
                }
                return Ok(());
            }
            if !quiet {
                println!("Items in [{filter}]:");
            }
            for item in view.items() {
                println!("{}", output::item_line(item, quiet));
            }
        }
    }
    Ok(())
}
