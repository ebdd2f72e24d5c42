//! core::path
//!
//! Path addressing for the store tree.
//!
//! # Types
//!
//! - [`KeyPath`] - Validated, normalized sequence of key segments
//! - [`Segment`] - A single validated key segment
//!
//! # Normalization
//!
//! A raw path string is normalized before lookup:
//!
//! - every `[token]` group whose token is made of word characters
//!   (letters, digits, `_`) becomes `.token`, so `a.b[0].c` and `a.b.0.c`
//!   address the same location
//! - a single leading dot is stripped
//! - the remainder splits on `.`
//! - segments are lower-cased, making keys case-insensitive
//!
//! Empty paths and empty segments are rejected at construction time, so a
//! `KeyPath` always holds at least one non-empty segment.
//!
//! # Examples
//!
//! ```
//! use readyroom::core::path::KeyPath;
//!
//! let bracketed = KeyPath::parse("user.roles[0].name").unwrap();
//! let dotted = KeyPath::parse("user.roles.0.name").unwrap();
//! assert_eq!(bracketed, dotted);
//!
//! // Keys are case-insensitive
//! let upper = KeyPath::parse("User.Name").unwrap();
//! let lower = KeyPath::parse("user.name").unwrap();
//! assert_eq!(upper, lower);
//!
//! // Invalid paths fail at creation time
//! assert!(KeyPath::parse("").is_err());
//! assert!(KeyPath::parse("a..b").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from path validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("path cannot be empty")]
    Empty,

    #[error("path '{path}' has an empty segment")]
    EmptySegment { path: String },

    #[error("segment '{segment}' cannot contain '.'")]
    DottedSegment { segment: String },
}

/// A single validated key segment.
///
/// Segments are lower-cased at construction and can never be empty or
/// contain a `.` (which would change the meaning of the joined path).
///
/// # Example
///
/// ```
/// use readyroom::core::path::Segment;
///
/// let seg = Segment::new("Name").unwrap();
/// assert_eq!(seg.as_str(), "name");
///
/// assert!(Segment::new("").is_err());
/// assert!(Segment::new("a.b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Segment(String);

impl Segment {
    /// Create a new validated, lower-cased segment.
    ///
    /// # Errors
    ///
    /// Returns `PathError::EmptySegment` for an empty segment and
    /// `PathError::DottedSegment` for a segment containing `.`.
    pub fn new(segment: impl Into<String>) -> Result<Self, PathError> {
        let segment = segment.into();
        if segment.is_empty() {
            return Err(PathError::EmptySegment {
                path: segment,
            });
        }
        if segment.contains('.') {
            return Err(PathError::DottedSegment { segment });
        }
        Ok(Self(segment.to_lowercase()))
    }

    /// Get the segment as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Segment {
    type Error = PathError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Segment> for String {
    fn from(segment: Segment) -> Self {
        segment.0
    }
}

impl AsRef<str> for Segment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated, normalized path into the store tree.
///
/// Construct with [`KeyPath::parse`] from a raw string, or with
/// [`KeyPath::from_segments`] from a pre-split sequence. Both forms apply
/// the same validation and lower-casing, so equal addresses compare equal
/// no matter how they were written.
///
/// # Example
///
/// ```
/// use readyroom::core::path::KeyPath;
///
/// let path = KeyPath::parse("servers[0].host").unwrap();
/// assert_eq!(path.to_string(), "servers.0.host");
/// assert_eq!(path.len(), 3);
///
/// let built = KeyPath::from_segments(["servers", "0", "host"]).unwrap();
/// assert_eq!(path, built);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyPath {
    segments: Vec<Segment>,
}

impl KeyPath {
    /// Parse and normalize a raw path string.
    ///
    /// # Errors
    ///
    /// Returns `PathError::Empty` if the path normalizes to nothing, and
    /// `PathError::EmptySegment` if it contains a doubled or trailing dot.
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::Empty);
        }

        let normalized = Self::rewrite_brackets(raw);
        let rest = normalized.strip_prefix('.').unwrap_or(&normalized);
        if rest.is_empty() {
            return Err(PathError::Empty);
        }

        let mut segments = Vec::new();
        for part in rest.split('.') {
            if part.is_empty() {
                return Err(PathError::EmptySegment {
                    path: raw.to_string(),
                });
            }
            segments.push(Segment::new(part)?);
        }

        Ok(Self { segments })
    }

    /// Build a path from a pre-split sequence of segments.
    ///
    /// # Errors
    ///
    /// Returns `PathError::Empty` for an empty sequence, and any segment
    /// validation error.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments = segments
            .into_iter()
            .map(Segment::new)
            .collect::<Result<Vec<_>, _>>()?;
        if segments.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self { segments })
    }

    /// Rewrite `[token]` groups with word-only tokens to `.token`.
    ///
    /// Bracket groups with any other content (empty, punctuation,
    /// unclosed) are left literal within their segment.
    fn rewrite_brackets(raw: &str) -> String {
        let chars: Vec<char> = raw.chars().collect();
        let mut out = String::with_capacity(raw.len());
        let mut i = 0;
        while i < chars.len() {
            if chars[i] == '[' {
                let mut j = i + 1;
                while j < chars.len() && Self::is_word_char(chars[j]) {
                    j += 1;
                }
                if j > i + 1 && j < chars.len() && chars[j] == ']' {
                    out.push('.');
                    out.extend(&chars[i + 1..j]);
                    i = j + 1;
                    continue;
                }
            }
            out.push(chars[i]);
            i += 1;
        }
        out
    }

    fn is_word_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }

    /// The segments of this path, in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments. Always at least 1.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Split into the parent segments and the final segment.
    pub fn split_last(&self) -> (&[Segment], &Segment) {
        let n = self.segments.len();
        (&self.segments[..n - 1], &self.segments[n - 1])
    }
}

impl TryFrom<String> for KeyPath {
    type Error = PathError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<KeyPath> for String {
    fn from(path: KeyPath) -> Self {
        path.to_string()
    }
}

impl std::fmt::Display for KeyPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .segments
            .iter()
            .map(Segment::as_str)
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{joined}")
    }
}
