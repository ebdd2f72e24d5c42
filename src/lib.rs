//! Readyroom - A deferred-boot application context with a path-addressed store
//!
//! Readyroom gives a host application and its independently loaded components
//! a shared context: calls made before the context boots are queued and
//! replayed exactly once at boot, values live in a path-addressed tree store,
//! and "run this once the host is ready" callbacks wait behind a one-shot
//! latch and only ever run when the host pumps the deferred queue.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to runtime)
//! - [`runtime`] - The context: boot queue replay, ready latch, deferred dispatch
//! - [`core`] - Domain types, key paths, the store tree, and configuration
//! - [`ui`] - User interaction utilities
//!
//! # Correctness Invariants
//!
//! Readyroom maintains the following invariants:
//!
//! 1. A boot queue is replayed in order, exactly once
//! 2. Ready callbacks never run inside registration or signalling calls
//! 3. Reads never mutate the store; rejected writes leave it unchanged
//! 4. Every failure funnels through one policy switch: propagate or absorb
//!
//! # Example
//!
//! ```
//! use readyroom::core::config::Config;
//! use readyroom::runtime::{App, BootQueue};
//! use serde_json::json;
//!
//! // Calls recorded before the context exists...
//! let mut queue = BootQueue::new();
//! queue.record_set("user.name", json!("Ada"));
//! queue.record_ready(|app: &App| {
//!     app.set("boot.finished", json!(true)).unwrap();
//! });
//!
//! // ...are replayed exactly once at boot.
//! let app = App::boot(Config::default(), Some(queue)).unwrap();
//! assert_eq!(app.get("user.name").unwrap(), Some(json!("Ada")));
//!
//! // Ready callbacks run only when the host pumps the deferred queue.
//! app.signal_ready();
//! assert_eq!(app.get("boot.finished").unwrap(), None);
//! app.dispatch_deferred();
//! assert_eq!(app.get("boot.finished").unwrap(), Some(json!(true)));
//! ```

pub mod cli;
pub mod core;
pub mod runtime;
pub mod ui;
