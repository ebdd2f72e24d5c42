//! Integration tests for the boot lifecycle.
//!
//! These tests exercise the full flow: queue calls before the context
//! exists, replay them exactly once at bootstrap, then fire the ready
//! latch and pump the deferred continuations.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use serde_json::json;

use readyroom::core::config::Config;
use readyroom::runtime::{App, BootOutcome, BootQueue, WaitOutcome};

// =============================================================================
// Full Lifecycle
// =============================================================================

#[test]
fn queue_boot_signal_pump() {
    let mut queue = BootQueue::new();
    queue.record_set("user.name", json!("Ada"));
    queue.record_set("user.roles[0]", json!("admin"));
    queue.record_ready(|app: &App| {
        app.set("boot.finished", json!(true)).unwrap();
    });

    let app = App::boot(Config::default(), Some(queue)).expect("boot failed");

    // Replayed writes are visible immediately after boot
    assert_eq!(app.get("user.name").unwrap(), Some(json!("Ada")));
    assert_eq!(app.get("user.roles.0").unwrap(), Some(json!("admin")));

    // The ready continuation has not run: not at boot, not at signal
    assert_eq!(app.get("boot.finished").unwrap(), None);
    assert!(app.signal_ready());
    assert_eq!(app.get("boot.finished").unwrap(), None);

    // Only the pump runs it
    assert_eq!(app.dispatch_deferred(), 1);
    assert_eq!(app.get("boot.finished").unwrap(), Some(json!(true)));
}

#[test]
fn boot_report_counts_the_replay() {
    let mut queue = BootQueue::new();
    queue.record_set("a", json!(1));
    queue.record_set("b", json!(2));
    queue.record_ready(|_app: &App| {});

    let app = App::new(Config::default());
    let outcome = app.bootstrap(Some(queue)).unwrap();

    let report = outcome.report().expect("first bootstrap");
    assert_eq!(report.replayed, 3);
    assert_eq!(report.sets, 2);
    assert_eq!(report.readies, 1);
    assert_eq!(report.skipped, 0);
    assert!(report.queue_age_ms >= 0);
}

// =============================================================================
// Replay Determinism
// =============================================================================

#[test]
fn identical_queues_produce_identical_state() {
    let build = || {
        let mut queue = BootQueue::new();
        queue.record_set("counter", json!(1));
        queue.record_set("counter", json!(2));
        queue.record_set("user.tags", json!({"kind": "trial"}));
        queue
    };

    let first = App::boot(Config::default(), Some(build())).unwrap();
    let second = App::boot(Config::default(), Some(build())).unwrap();

    assert_eq!(first.snapshot(), second.snapshot());
    // Later writes to the same path win
    assert_eq!(first.get("counter").unwrap(), Some(json!(2)));
}

#[test]
fn replayed_continuations_keep_queue_order() {
    let order = Arc::new(Mutex::new(Vec::new()));

    let mut queue = BootQueue::new();
    for label in ["first", "second", "third"] {
        let tag = Arc::clone(&order);
        queue.record_ready(move |_app: &App| {
            tag.lock().unwrap().push(label);
        });
    }

    let app = App::boot(Config::default(), Some(queue)).unwrap();
    app.signal_ready();
    app.dispatch_deferred();

    assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
}

// =============================================================================
// Idempotent Initialization
// =============================================================================

#[test]
fn bootstrap_runs_exactly_once() {
    let mut queue = BootQueue::new();
    queue.record_set("seeded", json!(true));
    let app = App::boot(Config::default(), Some(queue)).unwrap();

    // A second bootstrap is a guarded no-op, even with a fresh queue
    let mut second = BootQueue::new();
    second.record_set("seeded", json!(false));
    second.record_set("extra", json!(1));
    let outcome = app.bootstrap(Some(second)).unwrap();

    assert_eq!(outcome, BootOutcome::AlreadyInitialized);
    assert_eq!(app.get("seeded").unwrap(), Some(json!(true)));
    assert_eq!(app.get("extra").unwrap(), None);
}

#[test]
fn replayed_continuations_never_run_twice() {
    let runs = Arc::new(AtomicUsize::new(0));

    let mut queue = BootQueue::new();
    let counter = Arc::clone(&runs);
    queue.record_ready(move |_app: &App| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let app = App::boot(Config::default(), Some(queue)).unwrap();
    app.bootstrap(None).unwrap();
    app.signal_ready();
    app.signal_ready();
    app.dispatch_deferred();
    app.dispatch_deferred();

    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Deferred-Only Execution
// =============================================================================

#[test]
fn post_ready_registration_still_defers() {
    let app = App::boot(Config::default(), None).unwrap();
    app.signal_ready();
    app.dispatch_deferred();

    let ran = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&ran);
    app.on_ready(move |_app| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    // Registration after the latch fired never runs inline
    assert_eq!(ran.load(Ordering::SeqCst), 0);
    assert_eq!(app.pending_deferred(), 1);

    app.dispatch_deferred();
    assert_eq!(ran.load(Ordering::SeqCst), 1);
}

#[test]
fn continuations_scheduled_mid_pump_drain_in_the_same_pump() {
    let app = App::boot(Config::default(), None).unwrap();

    app.on_ready(|app| {
        app.on_ready(|app| {
            app.set("depth", json!(2)).unwrap();
        });
        app.set("depth", json!(1)).unwrap();
    });
    app.signal_ready();

    assert_eq!(app.dispatch_deferred(), 2);
    assert_eq!(app.get("depth").unwrap(), Some(json!(2)));
    assert_eq!(app.pending_deferred(), 0);
}

// =============================================================================
// Cross-Thread Readiness
// =============================================================================

#[test]
fn waiters_see_a_signal_from_another_thread() {
    let app = Arc::new(App::boot(Config::default(), None).unwrap());

    let signaller = Arc::clone(&app);
    let handle = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        signaller.set("handoff", json!("done")).unwrap();
        signaller.signal_ready();
    });

    assert_eq!(app.wait_ready(Duration::from_secs(5)), WaitOutcome::Ready);
    handle.join().unwrap();

    assert_eq!(app.get("handoff").unwrap(), Some(json!("done")));
}

#[test]
fn wait_times_out_when_nobody_signals() {
    let app = App::boot(Config::default(), None).unwrap();
    assert_eq!(
        app.wait_ready(Duration::from_millis(10)),
        WaitOutcome::TimedOut
    );
    assert!(!app.is_ready());
}
