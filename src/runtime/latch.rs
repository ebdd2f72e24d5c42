//! runtime::latch
//!
//! One-shot broadcast latch with ordered waiters.
//!
//! # Architecture
//!
//! The latch pairs a boolean that transitions false to true exactly once
//! with a list of waiting values. [`ReadyLatch::fire`] hands the waiters
//! back to the caller, in registration order, on the first call only;
//! registration after the latch has fired hands the value straight back
//! so the caller can route it down its post-fire path. The latch itself
//! never runs anything.
//!
//! Blocking consumers can park on [`ReadyLatch::wait`], which returns
//! once the latch fires or the timeout elapses.
//!
//! # Example
//!
//! ```
//! use readyroom::runtime::latch::ReadyLatch;
//!
//! let latch: ReadyLatch<&str> = ReadyLatch::new();
//! assert!(latch.register("first").is_none());
//! assert!(latch.register("second").is_none());
//!
//! // First fire hands the waiters back, in order
//! assert_eq!(latch.fire(), Some(vec!["first", "second"]));
//!
//! // The latch stays fired; late registrations bounce back
//! assert_eq!(latch.fire(), None);
//! assert_eq!(latch.register("late"), Some("late"));
//! ```

use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// Outcome of a blocking latch wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The latch fired before the timeout.
    Ready,
    /// The timeout elapsed first.
    TimedOut,
}

struct LatchState<T> {
    fired: bool,
    waiters: Vec<T>,
}

/// One-shot broadcast latch holding waiters of type `T`.
pub struct ReadyLatch<T> {
    state: Mutex<LatchState<T>>,
    condvar: Condvar,
}

impl<T> ReadyLatch<T> {
    /// Create an unfired latch with no waiters.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LatchState {
                fired: false,
                waiters: Vec::new(),
            }),
            condvar: Condvar::new(),
        }
    }

    /// Check whether the latch has fired.
    pub fn is_fired(&self) -> bool {
        self.state.lock().unwrap().fired
    }

    /// Register a waiter.
    ///
    /// Returns `None` if the waiter was parked behind the latch, or hands
    /// the waiter back as `Some` if the latch has already fired.
    pub fn register(&self, waiter: T) -> Option<T> {
        let mut state = self.state.lock().unwrap();
        if state.fired {
            return Some(waiter);
        }
        state.waiters.push(waiter);
        None
    }

    /// Fire the latch.
    ///
    /// The first call marks the latch fired, wakes blocked waits, and
    /// returns the parked waiters in registration order. Every later call
    /// returns `None`.
    pub fn fire(&self) -> Option<Vec<T>> {
        let mut state = self.state.lock().unwrap();
        if state.fired {
            return None;
        }
        state.fired = true;
        let waiters = std::mem::take(&mut state.waiters);
        self.condvar.notify_all();
        Some(waiters)
    }

    /// Block until the latch fires or `timeout` elapses.
    pub fn wait(&self, timeout: Duration) -> WaitOutcome {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock().unwrap();
        while !state.fired {
            let now = Instant::now();
            if now >= deadline {
                return WaitOutcome::TimedOut;
            }
            let (next, result) = self.condvar.wait_timeout(state, deadline - now).unwrap();
            state = next;
            if result.timed_out() && !state.fired {
                return WaitOutcome::TimedOut;
            }
        }
        WaitOutcome::Ready
    }
}

impl<T> Default for ReadyLatch<T> {
    fn default() -> Self {
        Self::new()
    }
}
