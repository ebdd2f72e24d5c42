//! runtime
//!
//! The live half of the crate: the [`App`] context and the machinery it
//! is built from.
//!
//! # Architecture
//!
//! - [`app`] - the shared context: boot lifecycle, store access, latch
//! - [`boot`] - the pre-boot call queue replayed at bootstrap
//! - [`latch`] - the generic one-shot ready latch
//! - [`scheduler`] - the deferred continuation queue
//! - [`policy`] - the propagate/suppress failure switch
//!
//! Everything callers normally need is re-exported here.

pub mod app;
pub mod boot;
pub mod latch;
pub mod policy;
pub mod scheduler;

pub use app::{App, AppError, BootOutcome, BootReport};
pub use boot::{BootQueue, Call, CallRecord};
pub use latch::{ReadyLatch, WaitOutcome};
pub use policy::FailurePolicy;
pub use scheduler::{Continuation, Scheduler};
