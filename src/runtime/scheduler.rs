//! runtime::scheduler
//!
//! FIFO queue of deferred continuations.
//!
//! # Architecture
//!
//! Continuations land here from two directions: the latch hands its
//! waiters over when it fires, and post-fire registrations append
//! directly. The pump pops one continuation at a time; the lock is never
//! held while a continuation runs, so continuations are free to read,
//! write, and register more continuations.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::app::App;

/// A deferred continuation: runs at most once and receives the context.
pub type Continuation = Box<dyn FnOnce(&App) + Send + 'static>;

/// Deferred continuation queue.
#[derive(Default)]
pub struct Scheduler {
    queue: Mutex<VecDeque<Continuation>>,
}

impl Scheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a continuation to the back of the queue.
    pub fn push(&self, continuation: Continuation) {
        self.queue.lock().unwrap().push_back(continuation);
    }

    /// Pop the next continuation, if any.
    pub fn pop(&self) -> Option<Continuation> {
        self.queue.lock().unwrap().pop_front()
    }

    /// Number of continuations currently queued.
    pub fn pending(&self) -> usize {
        self.queue.lock().unwrap().len()
    }
}
