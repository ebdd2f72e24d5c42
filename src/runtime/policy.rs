//! runtime::policy
//!
//! Failure policy for context operations.
//!
//! # Architecture
//!
//! Every internal failure (a bad path, an obstructed write, a record that
//! fails to replay, a panicking continuation) funnels through one switch.
//! Debug deployments want failures loud and early; production deployments
//! want the application to keep running. The policy models those two
//! stances so no call site decides for itself.

/// How the context treats internal failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Return errors to the caller and resume continuation panics.
    Propagate,

    /// Log failures and keep going; operations degrade to no-ops or
    /// defaults.
    Suppress,
}

impl FailurePolicy {
    /// Resolve the policy from the debug flag.
    ///
    /// # Example
    ///
    /// ```
    /// use readyroom::runtime::policy::FailurePolicy;
    ///
    /// assert_eq!(FailurePolicy::from_debug(true), FailurePolicy::Propagate);
    /// assert_eq!(FailurePolicy::from_debug(false), FailurePolicy::Suppress);
    /// ```
    pub fn from_debug(debug: bool) -> Self {
        if debug {
            Self::Propagate
        } else {
            Self::Suppress
        }
    }

    /// Check if failures surface to the caller.
    pub fn propagates(&self) -> bool {
        matches!(self, Self::Propagate)
    }
}
