//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All CLI output goes through this module to ensure consistent
//! formatting and proper handling of the quiet and debug flags.

pub mod output;
