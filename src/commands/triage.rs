//! Triage command - start an interactive session

use crate::{
    config::SortrConfig,
    engine::Engine,
    filter::{Filter, MediaFilter},
    media::Category,
    triage::Session,
    SortrError,
};
use std::path::Path;

type Result<T> = std::result::Result<T, SortrError>;

/// Execute the triage command
///
/// Flags override the starting filter from the config.
///
/// # Errors
/// Returns an error if the root cannot be opened or the terminal cannot be read
pub fn execute(
    root: &Path,
    config: &SortrConfig,
    category: Option<Category>,
    media: Option<MediaFilter>,
    quiet: bool,
) -> Result<()> {
    let filter = Filter::new(
        category.unwrap_or(config.start_category),
        media.unwrap_or(config.media_filter),
    );
    let engine = Engine::open(root)?
        .with_filter(filter)
        .with_advance_to_unsorted(config.advance_to_unsorted);

    for name in engine.index().duplicates() {
        eprintln!("Warning: '{name}' exists in more than one place; the first copy is used");
    }

    Session::new(engine, quiet).run()
}
