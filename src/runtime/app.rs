//! runtime::app
//!
//! The application context: boot lifecycle, store access, and the ready
//! latch.
//!
//! # Lifecycle
//!
//! ```text
//! BootQueue (pre-boot calls) -> bootstrap (replay, once) -> live calls
//!                                                  |
//!                               signal_ready -> dispatch_deferred (pump)
//! ```
//!
//! A context is constructed un-booted. [`App::bootstrap`] flips the
//! initialized flag exactly once and replays the boot queue in order,
//! synchronously, before returning; later calls are guarded no-ops. Ready
//! continuations, whether replayed or registered live, park behind the
//! one-shot latch and only ever run when the host pumps the deferred
//! queue. Nothing runs a continuation inside `on_ready` or
//! `signal_ready`.
//!
//! # Concurrency
//!
//! The context is `Send + Sync`; share it with `Arc` to call it from
//! several threads. The store sits behind an `RwLock`, the latch behind a
//! mutex and condvar, and the deferred queue behind a mutex that is never
//! held while a continuation runs.
//!
//! # Failure Policy
//!
//! Every failure funnels through [`App::report_error`]: with
//! [`FailurePolicy::Propagate`] (debug) errors return to the caller and
//! continuation panics resume; with [`FailurePolicy::Suppress`]
//! (production) failures are logged and operations degrade to no-ops or
//! defaults.
//!
//! # Example
//!
//! ```
//! use readyroom::core::config::Config;
//! use readyroom::runtime::App;
//! use serde_json::json;
//!
//! let app = App::boot(Config::default(), None).unwrap();
//! app.set("server.port", json!(8080)).unwrap();
//!
//! assert_eq!(app.get("server.port").unwrap(), Some(json!(8080)));
//! assert_eq!(app.get_or("server.host", json!("localhost")).unwrap(), json!("localhost"));
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock};
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info};

use super::boot::{BootQueue, Call, CallRecord};
use super::latch::{ReadyLatch, WaitOutcome};
use super::policy::FailurePolicy;
use super::scheduler::{Continuation, Scheduler};
use crate::core::config::Config;
use crate::core::path::{KeyPath, PathError};
use crate::core::store::{Store, StoreError};
use crate::core::types::{CallId, Namespace, UtcTimestamp};

/// Errors from context operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Path failed to parse.
    #[error("path error: {0}")]
    Path(#[from] PathError),

    /// Store rejected a write.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A replayed boot record failed to apply.
    #[error("boot replay failed for call {id}: {source}")]
    Replay {
        /// Id of the failing record.
        id: CallId,
        /// The underlying failure.
        #[source]
        source: Box<AppError>,
    },
}

/// Replay statistics from a successful first bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootReport {
    /// Records applied from the queue.
    pub replayed: usize,
    /// Set calls among them.
    pub sets: usize,
    /// Ready calls among them.
    pub readies: usize,
    /// Records dropped under the suppress policy.
    pub skipped: usize,
    /// Age of the queue at boot, in milliseconds.
    pub queue_age_ms: i64,
}

/// Outcome of a bootstrap call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootOutcome {
    /// First bootstrap: the queue (if any) was replayed.
    Booted(BootReport),

    /// The context was already initialized; nothing was done.
    AlreadyInitialized,
}

impl BootOutcome {
    /// Check if this was the first bootstrap.
    pub fn is_first(&self) -> bool {
        matches!(self, Self::Booted(_))
    }

    /// Get the replay report, if this was the first bootstrap.
    pub fn report(&self) -> Option<&BootReport> {
        match self {
            Self::Booted(report) => Some(report),
            Self::AlreadyInitialized => None,
        }
    }
}

/// The shared application context.
///
/// Owns the store tree, the ready latch, and the deferred continuation
/// queue. `Send + Sync`: wrap in `Arc` to share across threads.
pub struct App {
    config: Config,
    policy: FailurePolicy,
    store: RwLock<Store>,
    latch: ReadyLatch<Continuation>,
    deferred: Scheduler,
    initialized: AtomicBool,
    booted_at: Mutex<Option<UtcTimestamp>>,
}

impl App {
    /// Create an un-booted context.
    pub fn new(config: Config) -> Self {
        let policy = FailurePolicy::from_debug(config.debug);
        Self {
            config,
            policy,
            store: RwLock::new(Store::new()),
            latch: ReadyLatch::new(),
            deferred: Scheduler::new(),
            initialized: AtomicBool::new(false),
            booted_at: Mutex::new(None),
        }
    }

    /// Create and bootstrap a context in one step.
    ///
    /// # Errors
    ///
    /// Propagates bootstrap errors (debug policy only).
    pub fn boot(config: Config, queue: Option<BootQueue>) -> Result<Self, AppError> {
        let app = Self::new(config);
        app.bootstrap(queue)?;
        Ok(app)
    }

    /// Bootstrap the context, replaying the boot queue.
    ///
    /// The first call flips the initialized flag, stamps the boot time,
    /// and replays every queued record in issue order, synchronously,
    /// before returning. Any later call does nothing and reports
    /// [`BootOutcome::AlreadyInitialized`]; the queue passed to it (if
    /// any) is dropped unreplayed.
    ///
    /// # Errors
    ///
    /// Under the debug policy, the first record that fails to apply
    /// aborts the replay and surfaces as [`AppError::Replay`]; the
    /// context stays initialized and replay does not resume. Under the
    /// production policy failing records are logged, counted as skipped,
    /// and replay continues.
    pub fn bootstrap(&self, queue: Option<BootQueue>) -> Result<BootOutcome, AppError> {
        if self
            .initialized
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!(namespace = %self.config.namespace, "bootstrap called again; ignoring");
            return Ok(BootOutcome::AlreadyInitialized);
        }

        *self.booted_at.lock().unwrap() = Some(UtcTimestamp::now());

        let (queue_age_ms, records) = match queue {
            Some(queue) => {
                let (created_at, records) = queue.into_parts();
                (created_at.elapsed_ms(), records)
            }
            None => (0, Vec::new()),
        };

        debug!(
            namespace = %self.config.namespace,
            queued = records.len(),
            "replaying boot queue"
        );

        let mut report = BootReport {
            replayed: 0,
            sets: 0,
            readies: 0,
            skipped: 0,
            queue_age_ms,
        };
        for record in records {
            let CallRecord { id, call, .. } = record;
            let is_set = call.is_set();
            debug!(call_id = %id, kind = call.kind(), "replaying boot call");

            match self.apply(call) {
                Ok(()) => {
                    report.replayed += 1;
                    if is_set {
                        report.sets += 1;
                    } else {
                        report.readies += 1;
                    }
                }
                Err(source) => {
                    self.report_error(AppError::Replay {
                        id,
                        source: Box::new(source),
                    })?;
                    report.skipped += 1;
                }
            }
        }

        info!(
            namespace = %self.config.namespace,
            replayed = report.replayed,
            skipped = report.skipped,
            queue_age_ms = report.queue_age_ms,
            "context initialized"
        );
        Ok(BootOutcome::Booted(report))
    }

    /// Check whether bootstrap has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Apply one call through the live operations.
    fn apply(&self, call: Call) -> Result<(), AppError> {
        match call {
            Call::Set { path, value } => {
                let path = KeyPath::parse(&path)?;
                self.store.write().unwrap().set(&path, value)?;
                Ok(())
            }
            Call::Ready { continuation } => {
                self.enqueue_ready(continuation);
                Ok(())
            }
        }
    }

    // =========================================================================
    // Store operations
    // =========================================================================

    /// Read the value at a raw path expression.
    ///
    /// Misses return `Ok(None)`; reads never create.
    ///
    /// # Errors
    ///
    /// A path that fails to parse is an error under the debug policy and
    /// degrades to `Ok(None)` under the production policy.
    pub fn get(&self, path: &str) -> Result<Option<Value>, AppError> {
        let path = match KeyPath::parse(path) {
            Ok(path) => path,
            Err(err) => {
                self.report_error(err.into())?;
                return Ok(None);
            }
        };
        Ok(self.get_path(&path))
    }

    /// Read the value at a raw path expression, or `default` on a miss.
    ///
    /// # Errors
    ///
    /// Same policy behavior as [`App::get`]; under the production policy
    /// an unparsable path degrades to the default.
    pub fn get_or(&self, path: &str, default: Value) -> Result<Value, AppError> {
        Ok(self.get(path)?.unwrap_or(default))
    }

    /// Read the value at a pre-built path.
    pub fn get_path(&self, path: &KeyPath) -> Option<Value> {
        self.store.read().unwrap().get(path)
    }

    /// Write `value` at a raw path expression, creating intermediate
    /// branches as needed.
    ///
    /// # Errors
    ///
    /// A path that fails to parse or a write obstructed by an existing
    /// leaf is an error under the debug policy; under the production
    /// policy the failure is logged and the write becomes a no-op.
    pub fn set(&self, path: &str, value: Value) -> Result<(), AppError> {
        let path = match KeyPath::parse(path) {
            Ok(path) => path,
            Err(err) => return self.report_error(err.into()),
        };
        self.set_path(&path, value)
    }

    /// Write `value` at a pre-built path.
    ///
    /// # Errors
    ///
    /// Same policy behavior as [`App::set`].
    pub fn set_path(&self, path: &KeyPath, value: Value) -> Result<(), AppError> {
        let result = self.store.write().unwrap().set(path, value);
        match result {
            Ok(()) => Ok(()),
            Err(err) => self.report_error(err.into()),
        }
    }

    /// Check whether a node exists at a pre-built path.
    pub fn contains_path(&self, path: &KeyPath) -> bool {
        self.store.read().unwrap().contains(path)
    }

    /// Rebuild the whole store as a JSON object.
    pub fn snapshot(&self) -> Value {
        self.store.read().unwrap().snapshot()
    }

    // =========================================================================
    // Ready latch
    // =========================================================================

    /// Register a continuation to run once the host is ready.
    ///
    /// The continuation never runs inside this call. Before the latch
    /// fires it parks behind the latch; afterwards it joins the deferred
    /// queue directly. Either way it runs on the next pump.
    pub fn on_ready<F>(&self, continuation: F)
    where
        F: FnOnce(&App) + Send + 'static,
    {
        self.enqueue_ready(Box::new(continuation));
    }

    fn enqueue_ready(&self, continuation: Continuation) {
        if let Some(continuation) = self.latch.register(continuation) {
            self.deferred.push(continuation);
        }
    }

    /// Check whether the host has signalled readiness.
    pub fn is_ready(&self) -> bool {
        self.latch.is_fired()
    }

    /// Fire the ready latch.
    ///
    /// The first call moves all parked continuations, in registration
    /// order, onto the deferred queue and returns `true`; later calls are
    /// no-ops returning `false`. Continuations never run inside this
    /// call.
    pub fn signal_ready(&self) -> bool {
        match self.latch.fire() {
            Some(waiters) => {
                let waiting = waiters.len();
                for continuation in waiters {
                    self.deferred.push(continuation);
                }
                let elapsed_ms = self
                    .booted_at
                    .lock()
                    .unwrap()
                    .as_ref()
                    .map(UtcTimestamp::elapsed_ms);
                info!(
                    namespace = %self.config.namespace,
                    waiting,
                    elapsed_ms,
                    "ready latch fired"
                );
                true
            }
            None => false,
        }
    }

    /// Block until the ready latch fires or `timeout` elapses.
    ///
    /// Waiting does not pump the deferred queue.
    pub fn wait_ready(&self, timeout: Duration) -> WaitOutcome {
        self.latch.wait(timeout)
    }

    /// Pump the deferred queue on the calling thread.
    ///
    /// Pops and runs continuations one at a time until the queue is
    /// empty; continuations queued during the pump run in the same pump.
    /// Returns the number run. A panicking continuation resumes its panic
    /// under the debug policy and is logged and dropped under the
    /// production policy, after which the pump continues.
    pub fn dispatch_deferred(&self) -> usize {
        let mut ran = 0;
        while let Some(continuation) = self.deferred.pop() {
            self.run_contained(continuation);
            ran += 1;
        }
        if ran > 0 {
            debug!(namespace = %self.config.namespace, ran, "deferred queue drained");
        }
        ran
    }

    /// Number of continuations waiting on the deferred queue.
    pub fn pending_deferred(&self) -> usize {
        self.deferred.pending()
    }

    fn run_contained(&self, continuation: Continuation) {
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| continuation(self))) {
            if self.policy.propagates() {
                panic::resume_unwind(payload);
            }
            error!(
                namespace = %self.config.namespace,
                reason = panic_message(&payload),
                "deferred continuation panicked"
            );
        }
    }

    // =========================================================================
    // Failure policy
    // =========================================================================

    /// Route a failure through the policy switch.
    ///
    /// # Errors
    ///
    /// Returns the error under [`FailurePolicy::Propagate`]; logs it and
    /// returns `Ok` under [`FailurePolicy::Suppress`].
    pub fn report_error(&self, err: AppError) -> Result<(), AppError> {
        if self.policy.propagates() {
            return Err(err);
        }
        error!(namespace = %self.config.namespace, error = %err, "failure suppressed");
        Ok(())
    }

    /// The resolved configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The context namespace.
    pub fn namespace(&self) -> &Namespace {
        &self.config.namespace
    }

    /// The active failure policy.
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }
}

/// Render a panic payload for the log.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use std::thread;

    fn production() -> Config {
        Config::default()
    }

    fn debug_mode() -> Config {
        let mut config = Config::default();
        config.debug = true;
        config
    }

    mod boot {
        use super::*;

        #[test]
        fn boot_without_queue() {
            let app = App::boot(production(), None).unwrap();
            assert!(app.is_initialized());
            assert_eq!(app.snapshot(), json!({}));
        }

        #[test]
        fn bootstrap_reports_replay_counts() {
            let mut queue = BootQueue::new();
            queue.record_set("a", json!(1));
            queue.record_set("b.c", json!(2));
            queue.record_ready(|_app: &App| {});

            let app = App::new(production());
            let outcome = app.bootstrap(Some(queue)).unwrap();
            let report = outcome.report().unwrap();

            assert_eq!(report.replayed, 3);
            assert_eq!(report.sets, 2);
            assert_eq!(report.readies, 1);
            assert_eq!(report.skipped, 0);
            assert!(report.queue_age_ms >= 0);
        }

        #[test]
        fn replay_applies_in_issue_order() {
            let mut queue = BootQueue::new();
            queue.record_set("n", json!("first"));
            queue.record_set("n", json!("second"));

            let app = App::boot(production(), Some(queue)).unwrap();
            assert_eq!(app.get("n").unwrap(), Some(json!("second")));
        }

        #[test]
        fn replay_normalizes_raw_paths() {
            let mut queue = BootQueue::new();
            queue.record_set("User.Roles[0]", json!("admin"));

            let app = App::boot(production(), Some(queue)).unwrap();
            assert_eq!(app.get("user.roles.0").unwrap(), Some(json!("admin")));
        }

        #[test]
        fn second_bootstrap_is_ignored() {
            let mut queue = BootQueue::new();
            queue.record_set("a", json!(1));
            let app = App::boot(production(), Some(queue)).unwrap();

            let mut late = BootQueue::new();
            late.record_set("late", json!(true));
            let outcome = app.bootstrap(Some(late)).unwrap();

            assert_eq!(outcome, BootOutcome::AlreadyInitialized);
            assert!(!outcome.is_first());
            // The late queue was dropped, not replayed
            assert_eq!(app.get("late").unwrap(), None);
            assert_eq!(app.get("a").unwrap(), Some(json!(1)));
        }

        #[test]
        fn replay_failure_propagates_in_debug() {
            let mut queue = BootQueue::new();
            queue.record_set("a..b", json!(1));

            let app = App::new(debug_mode());
            let err = app.bootstrap(Some(queue)).unwrap_err();
            assert!(matches!(err, AppError::Replay { .. }));
            // The guard stays flipped; replay does not resume
            assert!(app.is_initialized());
        }

        #[test]
        fn replay_failure_skipped_in_production() {
            let mut queue = BootQueue::new();
            queue.record_set("a..b", json!(1));
            queue.record_set("ok", json!(2));

            let app = App::new(production());
            let outcome = app.bootstrap(Some(queue)).unwrap();
            let report = outcome.report().unwrap();

            assert_eq!(report.skipped, 1);
            assert_eq!(report.replayed, 1);
            assert_eq!(app.get("ok").unwrap(), Some(json!(2)));
        }

        #[test]
        fn replayed_ready_calls_park_behind_latch() {
            let ran = Arc::new(AtomicBool::new(false));
            let flag = Arc::clone(&ran);

            let mut queue = BootQueue::new();
            queue.record_ready(move |_app: &App| {
                flag.store(true, Ordering::SeqCst);
            });

            let app = App::boot(production(), Some(queue)).unwrap();
            assert!(!ran.load(Ordering::SeqCst));

            app.signal_ready();
            assert!(!ran.load(Ordering::SeqCst));

            app.dispatch_deferred();
            assert!(ran.load(Ordering::SeqCst));
        }
    }

    mod ops {
        use super::*;

        #[test]
        fn set_then_get_roundtrip() {
            let app = App::boot(production(), None).unwrap();
            app.set("user.name", json!("Ada")).unwrap();
            assert_eq!(app.get("user.name").unwrap(), Some(json!("Ada")));
        }

        #[test]
        fn get_or_default_on_missing() {
            let app = App::boot(production(), None).unwrap();
            assert_eq!(app.get_or("user.age", json!(0)).unwrap(), json!(0));
            // The miss did not create anything
            assert_eq!(app.get("user").unwrap(), None);
        }

        #[test]
        fn parent_of_written_leaf_reads_as_object() {
            let app = App::boot(production(), None).unwrap();
            app.set("a.b", json!(1)).unwrap();
            assert_eq!(app.get("a").unwrap(), Some(json!({"b": 1})));
        }

        #[test]
        fn typed_path_forms_match_string_forms() {
            let app = App::boot(production(), None).unwrap();
            let path = KeyPath::parse("cfg.retries").unwrap();

            app.set_path(&path, json!(3)).unwrap();
            assert_eq!(app.get_path(&path), Some(json!(3)));
            assert_eq!(app.get("cfg.retries").unwrap(), Some(json!(3)));
            assert!(app.contains_path(&path));
        }

        #[test]
        fn bad_path_errors_in_debug() {
            let app = App::boot(debug_mode(), None).unwrap();
            assert!(matches!(app.get("a..b"), Err(AppError::Path(_))));
            assert!(matches!(app.set("", json!(1)), Err(AppError::Path(_))));
        }

        #[test]
        fn bad_path_degrades_in_production() {
            let app = App::boot(production(), None).unwrap();
            assert_eq!(app.get("a..b").unwrap(), None);
            assert_eq!(app.get_or("a..b", json!(9)).unwrap(), json!(9));
            app.set("", json!(1)).unwrap();
            assert_eq!(app.snapshot(), json!({}));
        }

        #[test]
        fn obstructed_write_errors_in_debug() {
            let app = App::boot(debug_mode(), None).unwrap();
            app.set("a", json!(1)).unwrap();
            assert!(matches!(
                app.set("a.b", json!(2)),
                Err(AppError::Store(StoreError::LeafObstruction { .. }))
            ));
        }

        #[test]
        fn obstructed_write_is_noop_in_production() {
            let app = App::boot(production(), None).unwrap();
            app.set("a", json!(1)).unwrap();
            app.set("a.b", json!(2)).unwrap();

            assert_eq!(app.get("a").unwrap(), Some(json!(1)));
            assert_eq!(app.get("a.b").unwrap(), None);
        }
    }

    mod ready {
        use super::*;

        #[test]
        fn continuations_run_only_on_pump() {
            let app = App::boot(production(), None).unwrap();
            let ran = Arc::new(AtomicBool::new(false));

            let flag = Arc::clone(&ran);
            app.on_ready(move |_app| {
                flag.store(true, Ordering::SeqCst);
            });
            assert!(!ran.load(Ordering::SeqCst));

            app.signal_ready();
            assert!(!ran.load(Ordering::SeqCst));

            assert_eq!(app.dispatch_deferred(), 1);
            assert!(ran.load(Ordering::SeqCst));
        }

        #[test]
        fn registration_order_is_preserved() {
            let order = Arc::new(Mutex::new(Vec::new()));

            let mut queue = BootQueue::new();
            let tag = Arc::clone(&order);
            queue.record_ready(move |_app: &App| {
                tag.lock().unwrap().push("queued");
            });

            let app = App::boot(production(), Some(queue)).unwrap();

            let tag = Arc::clone(&order);
            app.on_ready(move |_app| {
                tag.lock().unwrap().push("pre_fire");
            });

            app.signal_ready();

            let tag = Arc::clone(&order);
            app.on_ready(move |_app| {
                tag.lock().unwrap().push("post_fire");
            });

            app.dispatch_deferred();
            assert_eq!(
                *order.lock().unwrap(),
                vec!["queued", "pre_fire", "post_fire"]
            );
        }

        #[test]
        fn post_fire_registration_waits_for_next_pump() {
            let app = App::boot(production(), None).unwrap();
            app.signal_ready();
            app.dispatch_deferred();

            let ran = Arc::new(AtomicBool::new(false));
            let flag = Arc::clone(&ran);
            app.on_ready(move |_app| {
                flag.store(true, Ordering::SeqCst);
            });

            // Still parked: registration never runs inline
            assert!(!ran.load(Ordering::SeqCst));
            assert_eq!(app.pending_deferred(), 1);

            assert_eq!(app.dispatch_deferred(), 1);
            assert!(ran.load(Ordering::SeqCst));
        }

        #[test]
        fn signal_ready_fires_once() {
            let app = App::boot(production(), None).unwrap();
            let runs = Arc::new(AtomicUsize::new(0));

            let counter = Arc::clone(&runs);
            app.on_ready(move |_app| {
                counter.fetch_add(1, Ordering::SeqCst);
            });

            assert!(!app.is_ready());
            assert!(app.signal_ready());
            assert!(app.is_ready());
            assert!(!app.signal_ready());

            app.dispatch_deferred();
            app.dispatch_deferred();
            assert_eq!(runs.load(Ordering::SeqCst), 1);
        }

        #[test]
        fn continuations_may_reenter_the_context() {
            let app = App::boot(production(), None).unwrap();

            app.on_ready(|app| {
                app.set("outer", json!(true)).unwrap();
                app.on_ready(|app| {
                    app.set("inner", json!(true)).unwrap();
                });
            });
            app.signal_ready();

            // The nested registration lands in the same pump
            assert_eq!(app.dispatch_deferred(), 2);
            assert_eq!(app.get("outer").unwrap(), Some(json!(true)));
            assert_eq!(app.get("inner").unwrap(), Some(json!(true)));
        }

        #[test]
        fn early_fire_before_bootstrap_is_legal() {
            let ran = Arc::new(AtomicBool::new(false));
            let flag = Arc::clone(&ran);

            let mut queue = BootQueue::new();
            queue.record_ready(move |_app: &App| {
                flag.store(true, Ordering::SeqCst);
            });

            let app = App::new(production());
            app.signal_ready();
            app.bootstrap(Some(queue)).unwrap();

            assert!(!ran.load(Ordering::SeqCst));
            assert_eq!(app.dispatch_deferred(), 1);
            assert!(ran.load(Ordering::SeqCst));
        }

        #[test]
        fn wait_ready_times_out_without_signal() {
            let app = App::boot(production(), None).unwrap();
            assert_eq!(
                app.wait_ready(Duration::from_millis(10)),
                WaitOutcome::TimedOut
            );
        }

        #[test]
        fn wait_ready_sees_signal_from_another_thread() {
            let app = Arc::new(App::boot(production(), None).unwrap());
            let signaller = Arc::clone(&app);

            let handle = thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                signaller.signal_ready();
            });

            assert_eq!(app.wait_ready(Duration::from_secs(5)), WaitOutcome::Ready);
            handle.join().unwrap();
        }
    }

    mod panics {
        use super::*;

        #[test]
        fn panicking_continuation_is_contained_in_production() {
            let app = App::boot(production(), None).unwrap();
            let ran = Arc::new(AtomicBool::new(false));

            app.on_ready(|_app| {
                panic!("continuation exploded");
            });
            let flag = Arc::clone(&ran);
            app.on_ready(move |_app| {
                flag.store(true, Ordering::SeqCst);
            });

            app.signal_ready();
            // Both continuations count; the pump survives the panic
            assert_eq!(app.dispatch_deferred(), 2);
            assert!(ran.load(Ordering::SeqCst));
        }

        #[test]
        #[should_panic(expected = "continuation exploded")]
        fn panicking_continuation_resumes_in_debug() {
            let app = App::boot(debug_mode(), None).unwrap();
            app.on_ready(|_app| {
                panic!("continuation exploded");
            });
            app.signal_ready();
            app.dispatch_deferred();
        }
    }

    mod report_error {
        use super::*;

        #[test]
        fn propagate_returns_the_error() {
            let app = App::boot(debug_mode(), None).unwrap();
            let err = AppError::Path(PathError::Empty);
            assert!(app.report_error(err).is_err());
        }

        #[test]
        fn suppress_absorbs_the_error() {
            let app = App::boot(production(), None).unwrap();
            let err = AppError::Path(PathError::Empty);
            assert!(app.report_error(err).is_ok());
        }

        #[test]
        fn policy_follows_config() {
            assert_eq!(
                App::new(production()).policy(),
                FailurePolicy::Suppress
            );
            assert_eq!(App::new(debug_mode()).policy(), FailurePolicy::Propagate);
        }
    }
}
