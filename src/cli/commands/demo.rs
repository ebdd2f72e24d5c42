//! demo command - Walk through a full context lifecycle

use anyhow::Result;
use serde_json::json;

use crate::core::config::Config;
use crate::runtime::{App, BootQueue};
use crate::ui::output::{self, Verbosity};

/// Walk through a full context lifecycle.
///
/// Records a few pre-boot calls, bootstraps a context, performs live
/// operations, then signals readiness and pumps the deferred queue.
///
/// # Arguments
///
/// * `config` - Resolved configuration
/// * `verbosity` - Output verbosity
pub fn demo(config: &Config, verbosity: Verbosity) -> Result<()> {
    output::print(
        format!("booting context '{}'", config.namespace),
        verbosity,
    );

    // Calls issued before the context exists land on the boot queue.
    let mut queue = BootQueue::new();
    queue.record_set("user.name", json!("Ada"));
    queue.record_set("User.Roles[0]", json!("admin"));
    queue.record_ready(|app: &App| {
        let _ = app.set("boot.finished", json!(true));
    });

    let app = App::new(config.clone());
    let outcome = app.bootstrap(Some(queue))?;
    if let Some(report) = outcome.report() {
        output::print(
            format!(
                "replayed {} queued call(s) ({} set, {} ready, {} skipped)",
                report.replayed, report.sets, report.readies, report.skipped
            ),
            verbosity,
        );
    }

    // Live operations against the booted context.
    app.set("server.port", json!(8080))?;
    output::print(
        format!(
            "user.roles.0 = {}   (recorded as 'User.Roles[0]')",
            app.get_or("user.roles.0", json!(null))?
        ),
        verbosity,
    );
    output::print(
        format!(
            "user.age     = {}   (missing, default applied)",
            app.get_or("user.age", json!(0))?
        ),
        verbosity,
    );

    output::print(
        format!("ready latch fired: {}", app.signal_ready()),
        verbosity,
    );
    let ran = app.dispatch_deferred();
    output::print(format!("deferred continuations run: {}", ran), verbosity);

    output::success(
        format!(
            "final state:\n{}",
            serde_json::to_string_pretty(&app.snapshot())?
        ),
        verbosity,
    );
    Ok(())
}
