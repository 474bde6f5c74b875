//! Sortr CLI application entry point
//!
//! Triage a folder of videos and images by moving each file into `liked/`,
//! `disliked/` or `super/`, and optionally into numbered buckets inside those.
//!
//! # Usage
//!
//! ```bash
//! # Review the current directory interactively (default command)
//! sortr
//! sortr triage --root ~/Downloads/clips
//!
//! # Summaries and listings
//! sortr scan
//! sortr ls -c liked -t video --format json
//!
//! # One-shot moves
//! sortr classify clip.mp4 super
//! sortr bucket clip.mp4 3
//!
//! # Save a frame next to a video
//! sortr capture clip.mp4 --frame frame.png
//!
//! # Remember a media root
//! sortr config set-root ~/Downloads/clips
//! ```
//!
//! # Configuration
//!
//! Settings live in the user's config directory
//! (`~/.config/sortr/config.toml` on Linux) and are created on first run.
//! Set `SORTR_LOG` (e.g. `SORTR_LOG=sortr=debug`) to control log output.

use sortr::{
    cli::{Cli, Commands},
    commands,
    config::SortrConfig,
    logging,
    SortrError,
};
use tracing::warn;

type Result<T> = std::result::Result<T, SortrError>;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let (config, config_error) = match SortrConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (SortrConfig::default(), Some(e)),
    };
    let quiet = cli.quiet || config.quiet;
    logging::init(cli.verbose, quiet);
    if let Some(e) = config_error {
        warn!("Could not load config, using defaults: {e}");
    }

    let command = cli.get_command();
    if let Commands::Config { command } = &command {
        return commands::config(config, command, quiet);
    }

    let root = config.resolve_root(cli.root.clone())?;

    match &command {
        Commands::Triage { category, media } => {
            commands::triage(&root, &config, *category, *media, quiet)?;
        }
        Commands::Scan => commands::scan(&root, quiet)?,
        Commands::List { format, .. } => {
            let filter = command.list_filter().unwrap_or_default();
            commands::list(&root, filter, *format, quiet)?;
        }
        Commands::Classify { name, category } => commands::classify(&root, name, *category, quiet)?,
        Commands::Bucket { name, bucket } => commands::bucket(&root, name, *bucket, quiet)?,
        Commands::Capture { name, frame } => commands::capture(&root, name, frame, quiet)?,
        Commands::Config { .. } => unreachable!(),
    }

    Ok(())
}
