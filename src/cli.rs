//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for sortr using the `clap` crate.
//!
//! # Commands
//!
//! - **triage**: Interactive review session (default)
//! - **scan**: Summarize the media root
//! - **list**: Print the items matching a filter
//! - **classify** / **bucket**: One-shot transitions
//! - **capture**: Save a still frame next to a video
//! - **config**: Show or change persisted settings
//!
//! Global flags (`--root`, `--quiet`, `--verbose`) are accepted before or
//! after the subcommand.

use crate::filter::{Filter, MediaFilter};
use crate::media::Category;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for the list command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One item per line
    #[default]
    Text,
    /// A JSON array of items
    Json,
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "sortr")]
#[command(about = "Keyboard-driven triage for folders of videos and images", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Media root (overrides config, defaults to the current directory)
    #[arg(short = 'r', long = "root", value_name = "DIR", global = true)]
    pub root: Option<PathBuf>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Review items interactively (default)
    #[command(visible_alias = "t")]
    Triage {
        /// Category to start in (overrides config)
        #[arg(short = 'c', long = "category", value_enum)]
        category: Option<Category>,

        /// Media type to start with (overrides config)
        #[arg(short = 't', long = "type", value_enum)]
        media: Option<MediaFilter>,
    },

    /// Count items per category, bucket and media type
    #[command(visible_alias = "s")]
    Scan,

    /// List items matching a filter, in name order
    #[command(visible_alias = "ls")]
    List {
        /// Category to list
        #[arg(short = 'c', long = "category", value_enum, default_value_t = Category::Unsorted)]
        category: Category,

        /// Media type to list
        #[arg(short = 't', long = "type", value_enum, default_value_t = MediaFilter::All)]
        media: MediaFilter,

        /// Output format
        #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Move an item to the root of a category
    #[command(visible_alias = "c")]
    Classify {
        /// File name of the item
        name: String,

        /// Target category
        #[arg(value_enum)]
        category: Category,
    },

    /// Move an item into a numbered bucket of its category (0 = category root)
    #[command(visible_alias = "b")]
    Bucket {
        /// File name of the item
        name: String,

        /// Bucket number, 0-9
        #[arg(value_parser = clap::value_parser!(u8).range(0..=9))]
        bucket: u8,
    },

    /// Save a pre-encoded PNG frame as `<name>_screenshot.png` next to a video
    Capture {
        /// File name of the video
        name: String,

        /// PNG file holding the frame
        #[arg(short = 'f', long = "frame", value_name = "FILE")]
        frame: PathBuf,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the current configuration
    Show,

    /// Set the default media root
    #[command(name = "set-root")]
    SetRoot {
        /// Directory to use when --root is not given
        dir: PathBuf,
    },
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command to execute, defaulting to triage
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Triage {
            category: None,
            media: None,
        })
    }
}

impl Commands {
    /// Filter described by the list command's flags
    #[must_use]
    pub const fn list_filter(&self) -> Option<Filter> {
        match self {
            Self::List { category, media, .. } => Some(Filter::new(*category, *media)),
            _ => None,
        }
    }
}
