//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Drives the runtime context (or the path layer) to do the work
//! 3. Formats and displays output
//!
//! Handlers do NOT touch store or latch state directly; everything goes
//! through [`crate::runtime::App`] operations.

mod demo;
mod path_cmd;
mod run;

// Re-export command functions for testing and direct invocation
pub use demo::demo;
pub use path_cmd::path;
pub use run::run;

use anyhow::Result;

use crate::cli::args::Command;
use crate::core::config::Config;
use crate::ui::output::Verbosity;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, config: &Config, verbosity: Verbosity) -> Result<()> {
    match command {
        Command::Demo => demo::demo(config, verbosity),
        Command::Path { expr } => path_cmd::path(&expr),
        Command::Run { file } => run::run(config, &file),
    }
}
