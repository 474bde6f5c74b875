//! Classify and bucket commands - one-shot transitions

use crate::{
    engine::{ActionOutcome, Engine},
    media::Category,
    output,
    SortrError,
};
use std::path::Path;

type Result<T> = std::result::Result<T, SortrError>;

/// Execute the classify command - move an item to the root of a category
///
/// # Errors
/// Returns an error if the item is unknown or the file cannot be moved
pub fn execute(root: &Path, name: &str, category: Category, quiet: bool) -> Result<()> {
    let mut engine = Engine::open(root)?;
    let outcome = engine.classify(name, category)?;
    report(&outcome, quiet);
    Ok(())
}

/// Execute the bucket command - move an item into a numbered bucket
///
/// # Errors
/// Returns an error if the item is unknown, unsorted, or cannot be moved
pub fn bucket(root: &Path, name: &str, n: u8, quiet: bool) -> Result<()> {
    let mut engine = Engine::open(root)?;
    let outcome = engine.move_to_sub_bucket(name, n)?;
    report(&outcome, quiet);
    Ok(())
}

fn report(outcome: &ActionOutcome, quiet: bool) {
    match outcome {
        ActionOutcome::Applied { item, .. } if quiet => println!("{}", item.path().display()),
        _ if quiet => {}
        _ => println!("{}", output::outcome_message(outcome)),
    }
}
