//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Namespace`] - Validated context namespace identifier
//! - [`CallId`] - Unique identifier for recorded boot calls
//! - [`UtcTimestamp`] - RFC3339 timestamp
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use readyroom::core::types::{Namespace, UtcTimestamp};
//!
//! // Valid constructions
//! let ns = Namespace::new("app").unwrap();
//! assert_eq!(ns.as_str(), "app");
//!
//! // Invalid constructions fail at creation time
//! assert!(Namespace::new("my app").is_err());
//! assert!(Namespace::new("").is_err());
//!
//! let ts = UtcTimestamp::now();
//! assert!(ts.to_string().contains('T'));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid namespace: {0}")]
    InvalidNamespace(String),
}

/// A validated context namespace identifier.
///
/// The namespace is the name under which a context introduces itself in
/// logs and CLI output. It must be usable as a plain identifier:
/// - Cannot be empty
/// - Must start with an ASCII letter or `_`
/// - May only contain ASCII letters, digits, and `_`
///
/// # Example
///
/// ```
/// use readyroom::core::types::Namespace;
///
/// // Valid namespaces
/// let ns = Namespace::new("app").unwrap();
/// assert_eq!(ns.as_str(), "app");
///
/// let underscored = Namespace::new("_staging2").unwrap();
/// assert_eq!(underscored.as_str(), "_staging2");
///
/// // Invalid namespaces
/// assert!(Namespace::new("").is_err());
/// assert!(Namespace::new("9lives").is_err());
/// assert!(Namespace::new("has space").is_err());
/// assert!(Namespace::new("dot.ted").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Namespace(String);

impl Namespace {
    /// Create a new validated namespace.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidNamespace` if the name is not a plain
    /// identifier.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    /// Validate a namespace against the identifier rules.
    fn validate(name: &str) -> Result<(), TypeError> {
        // Cannot be empty
        if name.is_empty() {
            return Err(TypeError::InvalidNamespace(
                "namespace cannot be empty".into(),
            ));
        }

        // Must start with a letter or underscore
        let first = name.chars().next().unwrap();
        if !(first.is_ascii_alphabetic() || first == '_') {
            return Err(TypeError::InvalidNamespace(
                "namespace must start with a letter or '_'".into(),
            ));
        }

        // Remaining characters must be letters, digits, or underscores
        for c in name.chars() {
            if !(c.is_ascii_alphanumeric() || c == '_') {
                return Err(TypeError::InvalidNamespace(format!(
                    "namespace cannot contain '{c}'"
                )));
            }
        }

        Ok(())
    }

    /// Get the namespace as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Namespace {
    /// The default namespace, `app`.
    fn default() -> Self {
        Self("app".to_string())
    }
}

impl TryFrom<String> for Namespace {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Namespace> for String {
    fn from(ns: Namespace) -> Self {
        ns.0
    }
}

impl AsRef<str> for Namespace {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a recorded boot call.
///
/// # Example
///
/// ```
/// use readyroom::core::types::CallId;
///
/// let id = CallId::new();
/// let other = CallId::new();
/// assert_ne!(id, other);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(String);

impl CallId {
    /// Generate a new unique call id.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create a CallId from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CallId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A UTC timestamp in RFC3339 format.
///
/// # Example
///
/// ```
/// use readyroom::core::types::UtcTimestamp;
///
/// let now = UtcTimestamp::now();
/// println!("Current time: {}", now);
/// assert!(now.elapsed_ms() >= 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtcTimestamp(chrono::DateTime<chrono::Utc>);

impl UtcTimestamp {
    /// Create a timestamp for the current moment.
    pub fn now() -> Self {
        Self(chrono::Utc::now())
    }

    /// Create a timestamp from a chrono DateTime.
    pub fn from_datetime(dt: chrono::DateTime<chrono::Utc>) -> Self {
        Self(dt)
    }

    /// Get the underlying datetime.
    pub fn as_datetime(&self) -> &chrono::DateTime<chrono::Utc> {
        &self.0
    }

    /// Milliseconds elapsed between this timestamp and now.
    ///
    /// Negative if the timestamp lies in the future (clock skew between
    /// processes that exchanged a serialized timestamp).
    pub fn elapsed_ms(&self) -> i64 {
        chrono::Utc::now().signed_duration_since(self.0).num_milliseconds()
    }
}

impl std::fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod namespace {
        use super::*;

        #[test]
        fn valid_namespaces() {
            assert!(Namespace::new("app").is_ok());
            assert!(Namespace::new("App").is_ok());
            assert!(Namespace::new("_private").is_ok());
            assert!(Namespace::new("app2").is_ok());
            assert!(Namespace::new("my_context").is_ok());
        }

        #[test]
        fn empty_rejected() {
            assert!(Namespace::new("").is_err());
        }

        #[test]
        fn leading_digit_rejected() {
            assert!(Namespace::new("9lives").is_err());
        }

        #[test]
        fn special_chars_rejected() {
            assert!(Namespace::new("has space").is_err());
            assert!(Namespace::new("dot.ted").is_err());
            assert!(Namespace::new("dash-ed").is_err());
            assert!(Namespace::new("slash/ed").is_err());
        }

        #[test]
        fn control_chars_rejected() {
            assert!(Namespace::new("has\ttab").is_err());
            assert!(Namespace::new("has\nnewline").is_err());
        }

        #[test]
        fn default_is_app() {
            assert_eq!(Namespace::default().as_str(), "app");
        }

        #[test]
        fn serde_roundtrip() {
            let ns = Namespace::new("staging").unwrap();
            let json = serde_json::to_string(&ns).unwrap();
            let parsed: Namespace = serde_json::from_str(&json).unwrap();
            assert_eq!(ns, parsed);
        }

        #[test]
        fn serde_rejects_invalid() {
            let result: Result<Namespace, _> = serde_json::from_str("\"not valid\"");
            assert!(result.is_err());
        }
    }

    mod call_id {
        use super::*;

        #[test]
        fn unique() {
            let a = CallId::new();
            let b = CallId::new();
            assert_ne!(a, b);
        }

        #[test]
        fn from_string_preserves_value() {
            let id = CallId::from_string("fixed-id");
            assert_eq!(id.as_str(), "fixed-id");
        }

        #[test]
        fn default_generates_fresh_id() {
            let a = CallId::default();
            let b = CallId::default();
            assert_ne!(a, b);
        }

        #[test]
        fn display_matches_as_str() {
            let id = CallId::new();
            assert_eq!(id.to_string(), id.as_str());
        }
    }

    mod utc_timestamp {
        use super::*;

        #[test]
        fn now_works() {
            let ts = UtcTimestamp::now();
            assert!(ts.to_string().contains('T'));
        }

        #[test]
        fn elapsed_is_non_negative_for_past() {
            let ts = UtcTimestamp::now();
            assert!(ts.elapsed_ms() >= 0);
        }

        #[test]
        fn elapsed_is_negative_for_future() {
            let future = chrono::Utc::now() + chrono::Duration::seconds(60);
            let ts = UtcTimestamp::from_datetime(future);
            assert!(ts.elapsed_ms() < 0);
        }

        #[test]
        fn serde_roundtrip() {
            let ts = UtcTimestamp::now();
            let json = serde_json::to_string(&ts).unwrap();
            let parsed: UtcTimestamp = serde_json::from_str(&json).unwrap();
            assert_eq!(ts, parsed);
        }
    }
}
