//! Capture command - save a still frame next to a video

use crate::{engine::Engine, SortrError};
use colored::Colorize;
use std::fs;
use std::path::Path;

type Result<T> = std::result::Result<T, SortrError>;

/// Execute the capture command
///
/// `frame` holds an already encoded PNG; its bytes are written unchanged.
///
/// # Errors
/// Returns an error if the frame cannot be read, the item is not a video,
/// or the screenshot cannot be written
pub fn execute(root: &Path, name: &str, frame: &Path, quiet: bool) -> Result<()> {
    let bytes = fs::read(frame).map_err(|e| {
        SortrError::InvalidInput(format!("Cannot read frame '{}': {e}", frame.display()))
    })?;

    let engine = Engine::open(root)?;
    let path = engine.capture_still(name, &bytes)?;

    if quiet {
        println!("{}", path.display());
    } else {
        println!("{} {}", "Saved".green(), path.display());
    }
    Ok(())
}
