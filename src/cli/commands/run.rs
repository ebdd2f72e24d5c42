//! run command - Execute a JSON op script against a fresh context

use std::io::Read;

use anyhow::{Context as _, Result};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::core::config::Config;
use crate::runtime::App;
use crate::ui::output;

/// One operation in a script.
///
/// Scripts are JSON arrays of tagged objects, e.g.
/// `[{"op": "set", "path": "a.b", "value": 1}, {"op": "get", "path": "a"}]`.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case", deny_unknown_fields)]
enum ScriptOp {
    /// Write a value.
    Set { path: String, value: Value },
    /// Read a value, with an optional default for misses.
    Get {
        path: String,
        #[serde(default)]
        default: Option<Value>,
    },
    /// Register a deferred write that runs once readiness is signalled.
    OnReadySet { path: String, value: Value },
    /// Fire the ready latch and pump the deferred queue.
    SignalReady,
    /// Print the whole store as one JSON object.
    Snapshot,
}

/// Execute a JSON op script against a fresh context.
///
/// Each op prints one JSON result line to stdout.
///
/// # Arguments
///
/// * `config` - Resolved configuration
/// * `file` - Script path, or `-` to read from stdin
pub fn run(config: &Config, file: &str) -> Result<()> {
    let script = read_script(file)?;
    let ops: Vec<ScriptOp> = serde_json::from_str(&script)
        .with_context(|| format!("failed to parse op script '{}'", file))?;

    let app = App::boot(config.clone(), None)?;
    for op in ops {
        let result = execute(&app, op)?;
        output::result(&result);
    }
    Ok(())
}

fn read_script(file: &str) -> Result<String> {
    if file == "-" {
        let mut script = String::new();
        std::io::stdin()
            .read_to_string(&mut script)
            .context("failed to read op script from stdin")?;
        Ok(script)
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("failed to read op script '{}'", file))
    }
}

fn execute(app: &App, op: ScriptOp) -> Result<Value> {
    let result = match op {
        ScriptOp::Set { path, value } => {
            app.set(&path, value)?;
            json!({ "op": "set", "path": path })
        }
        ScriptOp::Get { path, default } => {
            let value = match app.get(&path)? {
                Some(value) => value,
                None => default.unwrap_or(Value::Null),
            };
            json!({ "op": "get", "path": path, "value": value })
        }
        ScriptOp::OnReadySet { path, value } => {
            let target = path.clone();
            app.on_ready(move |app| {
                if let Err(err) = app.set(&target, value) {
                    output::error(format!("deferred set '{}' failed: {}", target, err));
                }
            });
            json!({ "op": "on-ready-set", "path": path, "deferred": true })
        }
        ScriptOp::SignalReady => {
            let fired = app.signal_ready();
            let dispatched = app.dispatch_deferred();
            json!({ "op": "signal-ready", "fired": fired, "dispatched": dispatched })
        }
        ScriptOp::Snapshot => {
            json!({ "op": "snapshot", "value": app.snapshot() })
        }
    };
    Ok(result)
}
