//! Interactive triage session
//!
//! A line-oriented front end over [`Engine`]: render the current state, read
//! one command with `dialoguer`, apply it, repeat. Errors from a single action
//! are printed and the session carries on.
//!
//! # Architecture
//!
//! - [`command`] parses a line into a [`Command`] (pure, no terminal)
//! - [`Session::apply`] maps a command onto engine calls
//! - [`Session::run`] owns the prompt loop and all printing of state

pub mod command;

pub use command::{Command, ParseError, SlotAction};

use crate::engine::{ActionOutcome, Engine, NoOp};
use crate::store::{LocalStore, MediaStore};
use crate::{SortrError, output};
use colored::Colorize;
use dialoguer::Input;
use std::fs;
use tracing::debug;

type Result<T> = std::result::Result<T, SortrError>;

/// Whether the loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One interactive session over an engine
#[derive(Debug)]
pub struct Session<S: MediaStore = LocalStore> {
    engine: Engine<S>,
    quiet: bool,
}

impl<S: MediaStore> Session<S> {
    #[must_use]
    pub const fn new(engine: Engine<S>, quiet: bool) -> Self {
        Self { engine, quiet }
    }

    #[must_use]
    pub const fn engine(&self) -> &Engine<S> {
        &self.engine
    }

    /// Run the prompt loop until the user quits
    ///
    /// # Errors
    ///
    /// Returns `SortrError::Prompt` if the terminal cannot be read.
    pub fn run(&mut self) -> Result<()> {
        if !self.quiet {
            println!(
                "{} {} ({} item(s), ? for help)",
                "Triage".bold(),
                self.engine.layout().root().display(),
                self.engine.index().len()
            );
        }

        loop {
            self.render();

            let line: String = Input::new()
                .with_prompt(">")
                .allow_empty(true)
                .interact_text()?;

            let command = match command::parse(&line) {
                Ok(command) => command,
                Err(ParseError::Empty) => continue,
                Err(e) => {
                    eprintln!("{} {e}", "Error:".red().bold());
                    continue;
                }
            };

            debug!("Triage command: {command:?}");
            match self.apply(command) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => eprintln!("{} {e}", "Error:".red().bold()),
            }
        }

        Ok(())
    }

    /// Apply one command to the engine
    ///
    /// # Errors
    ///
    /// Returns the engine or I/O error of the failed action. The engine is
    /// left unchanged in that case.
    pub fn apply(&mut self, command: Command) -> Result<Flow> {
        let grid = self.engine.grid().is_active();

        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => println!("{}", command::HELP),
            Command::Next if grid => self.engine.grid_next_page(),
            Command::Prev if grid => self.engine.grid_prev_page(),
            Command::Next => self.engine.next(),
            Command::Prev => self.engine.prev(),
            Command::NextPage => self.engine.grid_next_page(),
            Command::PrevPage => self.engine.grid_prev_page(),
            Command::Classify(category) => {
                let outcome = if grid {
                    self.engine.grid_classify(category)?
                } else {
                    self.engine.classify_current(category)?
                };
                self.report(&outcome);
            }
            Command::Bucket(n) => {
                let outcome = if grid {
                    self.engine.grid_move_to_sub_bucket(n)?
                } else {
                    self.engine.move_current_to_sub_bucket(n)?
                };
                self.report(&outcome);
            }
            Command::Undo => {
                let outcome = self.engine.undo()?;
                self.report(&outcome);
            }
            Command::SetCategory(category) => self.engine.set_category(category),
            Command::SetMedia(media) => self.engine.set_media_filter(media),
            Command::ToggleGrid => {
                self.engine.toggle_grid();
            }
            Command::Slot { slot, action } => self.apply_slot(slot, action)?,
            Command::Capture(frame) => {
                let name = self.focused_name()?;
                let bytes = fs::read(&frame)?;
                let path = self.engine.capture_still(&name, &bytes)?;
                self.say(&format!("{} {}", "Saved".green(), path.display()));
            }
            Command::Open => {
                let path = self
                    .engine
                    .focused()
                    .map(|item| item.path())
                    .ok_or_else(|| SortrError::InvalidInput(NoOp::NoCurrentItem.to_string()))?;
                open::that(&path)?;
            }
            Command::Rescan => {
                self.engine.rescan()?;
                self.say(&format!("Rescanned: {} item(s)", self.engine.index().len()));
            }
        }

        Ok(Flow::Continue)
    }

    fn apply_slot(&mut self, slot: usize, action: SlotAction) -> Result<()> {
        if !self.engine.grid().is_active() {
            self.report(&ActionOutcome::NoOp(NoOp::GridInactive));
            return Ok(());
        }
        self.engine.grid_target(slot);

        let outcome = match action {
            SlotAction::Classify(category) => self.engine.grid_classify(category)?,
            SlotAction::Bucket(n) => self.engine.grid_move_to_sub_bucket(n)?,
            SlotAction::Select => {
                if self.engine.grid_select().is_none() {
                    self.report(&ActionOutcome::NoOp(NoOp::EmptySlot));
                }
                return Ok(());
            }
        };
        self.report(&outcome);
        Ok(())
    }

    fn focused_name(&self) -> Result<String> {
        self.engine
            .focused()
            .map(|item| item.name().to_string())
            .ok_or_else(|| SortrError::InvalidInput(NoOp::NoCurrentItem.to_string()))
    }

    fn render(&self) {
        match (self.engine.grid().session(), self.engine.grid_slots()) {
            (Some(session), Some(slots)) => {
                for line in output::grid_lines(&slots, session.targeted(), session.page(), session.page_count()) {
                    println!("{line}");
                }
            }
            _ => println!(
                "{}",
                output::status_line(self.engine.position(), self.engine.filter(), self.engine.current())
            ),
        }
    }

    fn report(&self, outcome: &ActionOutcome) {
        self.say(&output::outcome_message(outcome));
    }

    fn say(&self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
    }
}
