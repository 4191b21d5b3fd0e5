//! Decision tree node.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{NodeId, Timestamp};
use crate::domain::scenario::ScenarioType;

/// One node of the explorable decision tree: the user's original input at the
/// root, a generated scenario everywhere else.
///
/// The same nested structure is handed to the render layer, which walks it
/// recursively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Hierarchical id, stable for the node's lifetime.
    pub id: NodeId,
    /// Raw scenario or initial-input text; may contain formatting markers.
    pub text: String,
    /// `Unclassified` only for the root and for unlabelled fallback parses.
    pub scenario_type: ScenarioType,
    /// Set once at creation; ordering and display only.
    pub created_at: Timestamp,
    /// Empty, or exactly three children once expanded. Never partially
    /// populated: expansion is all-or-nothing.
    pub children: Vec<TreeNode>,
    /// True for every node on the currently active path from the root.
    pub is_selected: bool,
}

impl TreeNode {
    /// Builds a fresh singleton root for the user's original input.
    pub fn root(text: impl Into<String>) -> Self {
        Self {
            id: NodeId::root(),
            text: text.into(),
            scenario_type: ScenarioType::Unclassified,
            created_at: Timestamp::now(),
            children: Vec::new(),
            is_selected: true,
        }
    }

    /// True once children have been attached; expansion is terminal per node.
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_starts_selected_and_unexpanded() {
        let root = TreeNode::root("I might quit my job");

        assert_eq!(root.id, NodeId::root());
        assert_eq!(root.text, "I might quit my job");
        assert_eq!(root.scenario_type, ScenarioType::Unclassified);
        assert!(root.is_selected);
        assert!(!root.is_expanded());
    }

    #[test]
    fn tree_node_serializes_with_nested_children() {
        let mut root = TreeNode::root("input");
        root.children.push(TreeNode {
            id: NodeId::root().child(0),
            text: "**Positive**\ngood".to_string(),
            scenario_type: ScenarioType::Positive,
            created_at: Timestamp::now(),
            children: Vec::new(),
            is_selected: false,
        });

        let json = serde_json::to_string(&root).unwrap();
        assert!(json.contains("\"id\":\"root\""));
        assert!(json.contains("\"id\":\"root-0\""));
        assert!(json.contains("\"scenario_type\":\"positive\""));
    }
}
