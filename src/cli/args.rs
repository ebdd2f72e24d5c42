//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--namespace <NAME>`: Override the context namespace
//! - `--debug`: Enable debug logging and the propagate failure policy
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};

/// Readyroom - a deferred-boot application context with a path-addressed store
#[derive(Parser, Debug)]
#[command(name = "rdy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Override the context namespace
    #[arg(long, global = true, value_name = "NAME")]
    pub namespace: Option<String>,

    /// Enable debug logging; failures propagate instead of being absorbed
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Walk through a full context lifecycle
    #[command(
        name = "demo",
        long_about = "Walk through a full context lifecycle.\n\n\
            Records a few calls on a boot queue, bootstraps a context (replaying \
            the queue), performs live reads and writes, then signals readiness \
            and pumps the deferred continuations. Each step prints what happened.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Run the demo with default settings
    rdy demo

    # Run with failure propagation and debug logging
    rdy demo --debug

    # See the structured log events behind each step
    RUST_LOG=debug rdy demo"
    )]
    Demo,

    /// Normalize a path expression and print its canonical form
    #[command(
        name = "path",
        long_about = "Normalize a path expression and print its canonical form.\n\n\
            Bracket groups become dotted segments, one leading dot is dropped, \
            and every segment is lower-cased. Invalid expressions (empty, or \
            containing empty segments) are reported as errors.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bracket syntax is equivalent to dots
    rdy path 'user.roles[0]'     # -> user.roles.0

    # Keys are case-insensitive
    rdy path 'User.Name'         # -> user.name

    # Empty segments are rejected
    rdy path 'a..b'              # error"
    )]
    Path {
        /// Path expression to normalize
        expr: String,
    },

    /// Execute a JSON op script against a fresh context
    #[command(
        name = "run",
        long_about = "Execute a JSON op script against a fresh context.\n\n\
            The script is a JSON array of operations. Each op prints one JSON \
            result line to stdout. Supported ops: set, get, on-ready-set, \
            signal-ready, snapshot. Pass '-' to read the script from stdin.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Run a script file
    rdy run script.json

    # Pipe a script on stdin
    echo '[{\"op\":\"set\",\"path\":\"a.b\",\"value\":1},
           {\"op\":\"get\",\"path\":\"a\"}]' | rdy run -

SCRIPT OPS:
    {\"op\": \"set\", \"path\": \"user.name\", \"value\": \"Ada\"}
    {\"op\": \"get\", \"path\": \"user.age\", \"default\": 0}
    {\"op\": \"on-ready-set\", \"path\": \"boot.finished\", \"value\": true}
    {\"op\": \"signal-ready\"}
    {\"op\": \"snapshot\"}"
    )]
    Run {
        /// Script file to execute, or '-' for stdin
        file: String,
    },
}
