//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a node within a scenario tree.
///
/// Ids are hierarchical: the root is always `"root"` and each child appends
/// its ordinal position to its parent's id (`root-0`, `root-0-2`, ...).
/// Derivation is deterministic, so ids are globally unique within a tree
/// without any counter, and stable for the node's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Creates the id every tree root carries.
    pub fn root() -> Self {
        Self("root".to_string())
    }

    /// Wraps an id received from outside (e.g. an HTTP request).
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derives the id of the child at `ordinal`.
    pub fn child(&self, ordinal: usize) -> Self {
        Self(format!("{}-{}", self.0, ordinal))
    }

    /// Returns true for the root id.
    pub fn is_root(&self) -> bool {
        self.0 == "root"
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_id_is_root() {
        let id = NodeId::root();
        assert_eq!(id.as_str(), "root");
        assert!(id.is_root());
    }

    #[test]
    fn child_ids_append_ordinal() {
        let root = NodeId::root();
        assert_eq!(root.child(0).as_str(), "root-0");
        assert_eq!(root.child(2).as_str(), "root-2");
    }

    #[test]
    fn child_derivation_nests() {
        let grandchild = NodeId::root().child(1).child(0);
        assert_eq!(grandchild.as_str(), "root-1-0");
        assert!(!grandchild.is_root());
    }

    #[test]
    fn same_derivation_yields_equal_ids() {
        assert_eq!(NodeId::root().child(1), NodeId::new("root-1"));
    }

    #[test]
    fn node_id_serializes_transparently() {
        let json = serde_json::to_string(&NodeId::root().child(0)).unwrap();
        assert_eq!(json, "\"root-0\"");

        let id: NodeId = serde_json::from_str("\"root-0-1\"").unwrap();
        assert_eq!(id, NodeId::new("root-0-1"));
    }
}
