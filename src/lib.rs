//! Sortr - a keyboard-driven media triage tool
//!
//! This library scans a media root, keeps an in-memory index of every video
//! and image in it, and classifies items by physically moving them between
//! category directories (`liked/`, `disliked/`, `super/`) and numbered
//! sub-buckets (`liked/1` .. `liked/9`).
//!
//! The [`engine::Engine`] is the entry point: it owns the index, the active
//! filter, the single-item cursor, the undo record and the batch grid.

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod cursor;
pub mod engine;
pub mod filter;
pub mod grid;
pub mod library;
pub mod logging;
pub mod media;
pub mod output;
pub mod store;
pub mod triage;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum SortrError {
    /// Scanning or preparing the media root failed
    #[error("Library error: {0}")]
    Library(#[from] library::LibraryError),
    /// A classification action failed
    #[error("Engine error: {0}")]
    Engine(#[from] engine::EngineError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Interactive prompt failed
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, SortrError>;
