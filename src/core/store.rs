//! core::store
//!
//! In-memory tree store addressed by key paths.
//!
//! # Architecture
//!
//! The store is a single tree of string-keyed nodes. Every node is either
//! a [`Node::Leaf`] holding an opaque JSON value or a [`Node::Branch`]
//! holding a map of child nodes. JSON objects written into the store are
//! spliced into branch structure recursively, so their members remain
//! addressable by deeper paths; every other value (including arrays and
//! null) is stored as a single leaf.
//!
//! # Read/Write Semantics
//!
//! Reads never fail and never modify the tree: a missing path is a miss,
//! answered with `None` or the caller's default. Writes create missing
//! intermediate branches on demand, but refuse to descend through an
//! existing leaf ([`StoreError::LeafObstruction`]); a rejected write
//! leaves the tree unchanged.
//!
//! # Example
//!
//! ```
//! use readyroom::core::path::KeyPath;
//! use readyroom::core::store::Store;
//! use serde_json::json;
//!
//! let mut store = Store::new();
//! let name = KeyPath::parse("user.name").unwrap();
//! store.set(&name, json!("Ada")).unwrap();
//!
//! assert_eq!(store.get(&name), Some(json!("Ada")));
//!
//! // Misses return the default and never auto-create
//! let age = KeyPath::parse("user.age").unwrap();
//! assert_eq!(store.get_or(&age, json!(0)), json!(0));
//! assert!(!store.contains(&age));
//! ```

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::core::path::{KeyPath, Segment};

/// Errors from store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A write had to descend through an existing leaf value.
    #[error("cannot descend through leaf value at '{at}'")]
    LeafObstruction {
        /// The path prefix where the obstructing leaf sits.
        at: String,
    },
}

/// A node in the store tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A terminal value, stored as written.
    Leaf(Value),

    /// An inner map of child nodes.
    Branch(BTreeMap<String, Node>),
}

impl Node {
    /// Build a node from a JSON value.
    ///
    /// Objects are spliced into branch structure recursively, with their
    /// keys lower-cased; every other value becomes a leaf.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                let children = map
                    .into_iter()
                    .map(|(key, child)| (key.to_lowercase(), Node::from_value(child)))
                    .collect();
                Node::Branch(children)
            }
            other => Node::Leaf(other),
        }
    }

    /// Rebuild the JSON value this node represents.
    pub fn to_value(&self) -> Value {
        match self {
            Node::Leaf(value) => value.clone(),
            Node::Branch(children) => {
                let map: serde_json::Map<String, Value> = children
                    .iter()
                    .map(|(key, child)| (key.clone(), child.to_value()))
                    .collect();
                Value::Object(map)
            }
        }
    }

    /// Check if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Check if this node is a branch.
    pub fn is_branch(&self) -> bool {
        matches!(self, Node::Branch(_))
    }
}

/// In-memory tree store.
///
/// Created empty, mutated in place by [`Store::set`], dropped with its
/// owner. Keys are always lower-case: [`KeyPath`] lower-cases its
/// segments at construction and [`Node::from_value`] lower-cases object
/// keys on splice, so lookups are case-insensitive end to end.
///
/// # Example
///
/// ```
/// use readyroom::core::path::KeyPath;
/// use readyroom::core::store::Store;
/// use serde_json::json;
///
/// let mut store = Store::new();
/// store.set(&KeyPath::parse("a.b").unwrap(), json!(1)).unwrap();
///
/// // The branch above the leaf reads back as an object
/// assert_eq!(store.get(&KeyPath::parse("a").unwrap()), Some(json!({"b": 1})));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    root: BTreeMap<String, Node>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the value at `path`.
    ///
    /// Returns `None` if any segment is absent or the walk meets a leaf
    /// before the final segment. Reads never fail and never create.
    pub fn get(&self, path: &KeyPath) -> Option<Value> {
        self.lookup(path).map(Node::to_value)
    }

    /// Read the value at `path`, or `default` on a miss.
    pub fn get_or(&self, path: &KeyPath, default: Value) -> Value {
        self.get(path).unwrap_or(default)
    }

    /// Check whether a node (leaf or branch) exists at `path`.
    pub fn contains(&self, path: &KeyPath) -> bool {
        self.lookup(path).is_some()
    }

    /// Check whether the store holds no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Write `value` at `path`, creating intermediate branches as needed.
    ///
    /// The node at the exact target key is replaced, whatever it was
    /// (leaf over branch or branch over leaf are both fine at the target
    /// itself). Object values are spliced into branch structure.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::LeafObstruction` if an intermediate key holds
    /// a leaf. The store is unchanged on error: branches are only created
    /// below missing keys, and nothing is missing above an obstruction.
    pub fn set(&mut self, path: &KeyPath, value: Value) -> Result<(), StoreError> {
        let (parents, last) = path.split_last();
        let target = Self::descend(&mut self.root, parents, path)?;
        target.insert(last.as_str().to_string(), Node::from_value(value));
        Ok(())
    }

    /// Create (if needed) and return the branch map at `path`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::LeafObstruction` if any key along `path`
    /// holds a leaf.
    pub fn ensure_branch(
        &mut self,
        path: &KeyPath,
    ) -> Result<&mut BTreeMap<String, Node>, StoreError> {
        Self::descend(&mut self.root, path.segments(), path)
    }

    /// Rebuild the whole tree as a JSON object.
    ///
    /// Branch children are emitted in key order, so the output is
    /// deterministic.
    pub fn snapshot(&self) -> Value {
        let map: serde_json::Map<String, Value> = self
            .root
            .iter()
            .map(|(key, node)| (key.clone(), node.to_value()))
            .collect();
        Value::Object(map)
    }

    fn lookup(&self, path: &KeyPath) -> Option<&Node> {
        let (parents, last) = path.split_last();
        let mut current = &self.root;
        for segment in parents {
            match current.get(segment.as_str()) {
                Some(Node::Branch(children)) => current = children,
                _ => return None,
            }
        }
        current.get(last.as_str())
    }

    fn descend<'a>(
        root: &'a mut BTreeMap<String, Node>,
        segments: &[Segment],
        full_path: &KeyPath,
    ) -> Result<&'a mut BTreeMap<String, Node>, StoreError> {
        let mut current = root;
        for (depth, segment) in segments.iter().enumerate() {
            let node = current
                .entry(segment.as_str().to_string())
                .or_insert_with(|| Node::Branch(BTreeMap::new()));
            match node {
                Node::Branch(children) => current = children,
                Node::Leaf(_) => {
                    return Err(StoreError::LeafObstruction {
                        at: prefix_of(full_path, depth + 1),
                    })
                }
            }
        }
        Ok(current)
    }
}

/// Join the first `len` segments of `path` with dots.
fn prefix_of(path: &KeyPath, len: usize) -> String {
    path.segments()[..len]
        .iter()
        .map(Segment::as_str)
        .collect::<Vec<_>>()
        .join(".")
}
