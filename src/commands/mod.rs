//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and runs the operation against the media root.

pub mod capture;
pub mod classify;
pub mod config;
pub mod list;
pub mod scan;
pub mod triage;

// Re-export execute functions for convenience
pub use capture::execute as capture;
pub use classify::execute as classify;
pub use classify::bucket;
pub use config::execute as config;
pub use list::execute as list;
pub use scan::execute as scan;
pub use triage::execute as triage;
