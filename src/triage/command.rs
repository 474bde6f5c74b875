//! Triage line commands
//!
//! [`parse`] turns one line of user input into a [`Command`]. It is pure so
//! the whole key map can be tested without a terminal.

use crate::filter::MediaFilter;
use crate::grid::PAGE_SIZE;
use crate::media::Category;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from parsing a command line
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}' (type ? for help)")]
    Unknown(String),
    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("Invalid argument '{value}' for '{command}'")]
    InvalidArgument { command: &'static str, value: String },
}

/// Action applied to a grid slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAction {
    Classify(Category),
    Bucket(u8),
    /// Open the slot in single-item mode
    Select,
}

/// One parsed triage command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    Classify(Category),
    Bucket(u8),
    Undo,
    SetCategory(Category),
    SetMedia(MediaFilter),
    ToggleGrid,
    NextPage,
    PrevPage,
    /// Target slot `slot` (0-based) and apply `action` to it
    Slot { slot: usize, action: SlotAction },
    Capture(PathBuf),
    Open,
    Rescan,
    Help,
    Quit,
}

/// Help text listing every command
pub const HELP: &str = "\
  n / p            next / previous item
  l d s x          classify: liked, disliked, super, unsorted
  0-9              move into sub-bucket (0 = category root)
  u                undo last action
  c <category>     show a category (unsorted, liked, disliked, super)
  t <type>         show a media type (all, video, image)
  g                toggle grid mode
  ] / [            next / previous grid page
  <1-9> <action>   grid: apply l|d|s|x|0-9|enter to a slot
  shot <png>       save a PNG frame next to the current video
  o                open the current item
  r                rescan the media root
  ?                this help
  q                quit";

/// Parse one line of input
///
/// # Errors
///
/// Returns `ParseError` for empty input, unknown commands, or bad arguments.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let mut words = line.split_whitespace();
    let head = words.next().ok_or(ParseError::Empty)?;
    let rest: Vec<&str> = words.collect();

    if let Some(digit) = single_digit(head) {
        return match rest.as_slice() {
            [] => Ok(Command::Bucket(digit)),
            [action] => parse_slot(digit, action),
            _ => Err(ParseError::InvalidArgument {
                command: "slot",
                value: rest.join(" "),
            }),
        };
    }

    let command = match head.to_ascii_lowercase().as_str() {
        "n" | "next" => Command::Next,
        "p" | "prev" => Command::Prev,
        "l" => Command::Classify(Category::Liked),
        "d" => Command::Classify(Category::Disliked),
        "s" => Command::Classify(Category::Super),
        "x" => Command::Classify(Category::Unsorted),
        "u" | "undo" => Command::Undo,
        "g" | "grid" => Command::ToggleGrid,
        "]" => Command::NextPage,
        "[" => Command::PrevPage,
        "o" | "open" => Command::Open,
        "r" | "rescan" => Command::Rescan,
        "?" | "h" | "help" => Command::Help,
        "q" | "quit" => Command::Quit,
        "c" => {
            let value = argument(&rest, "c", "a category")?;
            Command::SetCategory(Category::parse(value).ok_or_else(|| ParseError::InvalidArgument {
                command: "c",
                value: value.to_string(),
            })?)
        }
        "t" => {
            let value = argument(&rest, "t", "all, video or image")?;
            Command::SetMedia(MediaFilter::parse(value).ok_or_else(|| ParseError::InvalidArgument {
                command: "t",
                value: value.to_string(),
            })?)
        }
        "shot" => Command::Capture(PathBuf::from(argument(&rest, "shot", "a PNG file")?)),
        _ => return Err(ParseError::Unknown(head.to_string())),
    };

    Ok(command)
}

fn single_digit(word: &str) -> Option<u8> {
    match word.as_bytes() {
        [b @ b'0'..=b'9'] => Some(b - b'0'),
        _ => None,
    }
}

fn argument<'a>(rest: &[&'a str], command: &'static str, expected: &'static str) -> Result<&'a str, ParseError> {
    rest.first()
        .copied()
        .ok_or(ParseError::MissingArgument { command, expected })
}

fn parse_slot(slot: u8, action: &str) -> Result<Command, ParseError> {
    let slot = usize::from(slot);
    if slot == 0 || slot > PAGE_SIZE {
        return Err(ParseError::InvalidArgument {
            command: "slot",
            value: slot.to_string(),
        });
    }

    let action = match action.to_ascii_lowercase().as_str() {
        "l" => SlotAction::Classify(Category::Liked),
        "d" => SlotAction::Classify(Category::Disliked),
        "s" => SlotAction::Classify(Category::Super),
        "x" => SlotAction::Classify(Category::Unsorted),
        "enter" | "e" | "v" => SlotAction::Select,
        other => match single_digit(other) {
            Some(n) => SlotAction::Bucket(n),
            None => {
                return Err(ParseError::InvalidArgument {
                    command: "slot",
                    value: other.to_string(),
                });
            }
        },
    };

    Ok(Command::Slot {
        slot: slot - 1,
        action,
    })
}
