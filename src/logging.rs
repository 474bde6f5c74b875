//! Logging setup
//!
//! Library code logs through `tracing`; the binary installs a `fmt`
//! subscriber writing to stderr so stdout stays clean for scripting.
//!
//! The `SORTR_LOG` environment variable takes an `EnvFilter` directive
//! (e.g. `SORTR_LOG=sortr=debug`) and overrides the command line verbosity.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive
pub const LOG_ENV: &str = "SORTR_LOG";

/// Level used when `SORTR_LOG` is not set
#[must_use]
pub const fn level_for(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbosity: u8, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("sortr={}", level_for(verbosity, quiet))));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
