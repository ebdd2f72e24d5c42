//! cli
//!
//! Command-line interface layer for Readyroom.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Resolve configuration (defaults, file, environment, flags)
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, layers CLI flags
//! on top of the loaded configuration, and dispatches to handlers that
//! drive [`crate::runtime::App`]. All store and latch state changes flow
//! through the context's operations.

pub mod args;
pub mod commands;

pub use args::Cli;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::core::config::Config;
use crate::core::types::Namespace;
use crate::ui::output::{self, Verbosity};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);

    let loaded = Config::load()?;
    for warning in &loaded.warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            verbosity,
        );
    }

    // CLI flags have the last word over file and environment values.
    let mut config = loaded.config;
    if let Some(name) = &cli.namespace {
        config.namespace = Namespace::new(name.as_str())?;
    }
    if cli.debug {
        config.debug = true;
    }

    commands::dispatch(cli.command, &config, verbosity)
}

fn init_tracing(debug: bool) {
    let env_filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
