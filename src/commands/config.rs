//! Config command - show or change persisted settings

use crate::{cli::ConfigCommands, config::SortrConfig, SortrError};
use colored::Colorize;

type Result<T> = std::result::Result<T, SortrError>;

/// Execute a config subcommand
///
/// # Errors
/// Returns an error if the config cannot be serialized or saved
pub fn execute(mut config: SortrConfig, command: &ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let path = SortrConfig::config_path()?;
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| SortrError::InvalidInput(format!("Cannot render config: {e}")))?;
            if !quiet {
                println!("{} {}", "Config file:".bold(), path.display());
            }
            print!("{rendered}");
        }
        ConfigCommands::SetRoot { dir } => {
            let root = dir.canonicalize().map_err(|e| {
                SortrError::InvalidInput(format!("Cannot access path '{}': {e}", dir.display()))
            })?;
            config.set_default_root(root.clone())?;
            if !quiet {
                println!("{} default root set to {}", "✓".green(), root.display());
            }
        }
    }
    Ok(())
}
