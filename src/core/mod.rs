//! core
//!
//! Core domain types, the store tree, and configuration.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Namespace, CallId, UtcTimestamp
//! - [`path`] - Key path parsing and normalization
//! - [`store`] - In-memory tree store addressed by key paths
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Paths are normalized once, at the boundary
//! - Reads never mutate; writes fail loudly rather than guess

pub mod config;
pub mod path;
pub mod store;
pub mod types;
