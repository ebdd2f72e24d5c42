//! runtime::boot
//!
//! The boot queue: calls recorded against the context before it exists.
//!
//! # Architecture
//!
//! Components that load before the context is constructed record their
//! calls into a [`BootQueue`] instead of losing them. The queue is an
//! ordered list of [`CallRecord`] entries; each carries a unique id and a
//! timestamp for replay diagnostics, and the queue remembers when it was
//! created so boot can report its age.
//!
//! `App::bootstrap` consumes the queue by value. Ownership makes a second
//! replay of the same queue unrepresentable.
//!
//! # Example
//!
//! ```
//! use readyroom::runtime::{App, BootQueue};
//! use serde_json::json;
//!
//! let mut queue = BootQueue::new();
//! queue.record_set("user.name", json!("Ada"));
//! queue.record_ready(|app: &App| {
//!     app.set("boot.finished", json!(true)).unwrap();
//! });
//!
//! assert_eq!(queue.len(), 2);
//! ```

use serde_json::Value;

use super::app::App;
use super::scheduler::Continuation;
use crate::core::types::{CallId, UtcTimestamp};

/// A call recorded before the context was constructed.
pub enum Call {
    /// Write `value` at the location named by the raw path string.
    ///
    /// The path is kept raw; normalization happens at replay, through the
    /// same parsing as live calls.
    Set {
        /// Raw, un-normalized path expression.
        path: String,
        /// The value to write.
        value: Value,
    },

    /// Park a continuation behind the ready latch.
    Ready {
        /// The continuation to run once the host is ready.
        continuation: Continuation,
    },
}

impl Call {
    /// Create a set call.
    pub fn set(path: impl Into<String>, value: Value) -> Self {
        Self::Set {
            path: path.into(),
            value,
        }
    }

    /// Create a ready call.
    pub fn ready<F>(continuation: F) -> Self
    where
        F: FnOnce(&App) + Send + 'static,
    {
        Self::Ready {
            continuation: Box::new(continuation),
        }
    }

    /// Short kind tag for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Set { .. } => "set",
            Self::Ready { .. } => "ready",
        }
    }

    /// Check if this is a set call.
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set { .. })
    }

    /// Check if this is a ready call.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

impl std::fmt::Debug for Call {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Set { path, value } => f
                .debug_struct("Set")
                .field("path", path)
                .field("value", value)
                .finish(),
            Self::Ready { .. } => f.debug_struct("Ready").finish_non_exhaustive(),
        }
    }
}

/// A single queue entry: the call plus replay bookkeeping.
#[derive(Debug)]
pub struct CallRecord {
    /// Unique id, for correlating replay logs.
    pub id: CallId,
    /// When the call was recorded.
    pub recorded_at: UtcTimestamp,
    /// The recorded call.
    pub call: Call,
}

/// Ordered queue of pre-boot calls, consumed exactly once at boot.
#[derive(Debug)]
pub struct BootQueue {
    created_at: UtcTimestamp,
    records: Vec<CallRecord>,
}

impl BootQueue {
    /// Create an empty queue stamped with the current time.
    pub fn new() -> Self {
        Self {
            created_at: UtcTimestamp::now(),
            records: Vec::new(),
        }
    }

    /// Record a set call. Returns the record's id.
    pub fn record_set(&mut self, path: impl Into<String>, value: Value) -> CallId {
        self.push(Call::set(path, value))
    }

    /// Record a ready continuation. Returns the record's id.
    pub fn record_ready<F>(&mut self, continuation: F) -> CallId
    where
        F: FnOnce(&App) + Send + 'static,
    {
        self.push(Call::ready(continuation))
    }

    fn push(&mut self, call: Call) -> CallId {
        let id = CallId::new();
        self.records.push(CallRecord {
            id: id.clone(),
            recorded_at: UtcTimestamp::now(),
            call,
        });
        id
    }

    /// Number of recorded calls.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// When the queue was created.
    pub fn created_at(&self) -> &UtcTimestamp {
        &self.created_at
    }

    /// Consume the queue for replay.
    pub(crate) fn into_parts(self) -> (UtcTimestamp, Vec<CallRecord>) {
        (self.created_at, self.records)
    }
}

impl Default for BootQueue {
    fn default() -> Self {
        Self::new()
    }
}
