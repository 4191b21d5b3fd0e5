//! Pure update and traversal operations over the decision tree.
//!
//! Every update takes the current tree by reference and returns a new tree
//! value; the input is never mutated. Lookup is depth-first over the nested
//! structure. Cost is O(depth x breadth) per update, with breadth fixed at
//! three and depth bounded by how far the user has drilled in one session.

use crate::domain::foundation::{NodeId, Timestamp};
use crate::domain::scenario::Scenario;

use super::TreeNode;

/// Builds a fresh singleton root, selected, with no children.
pub fn create_root(text: impl Into<String>) -> TreeNode {
    TreeNode::root(text)
}

/// Returns a new tree in which the node with `target` id carries three newly
/// constructed children, ids `target-0..2`, unselected and childless.
///
/// Children are replaced wholesale; an unknown target id yields a tree
/// structurally equal to the input.
pub fn attach_children(tree: &TreeNode, target: &NodeId, scenarios: &[Scenario; 3]) -> TreeNode {
    let mut rebuilt = tree.clone();
    if let Some(node) = find_node_mut(&mut rebuilt, target) {
        node.children = scenarios
            .iter()
            .enumerate()
            .map(|(ordinal, scenario)| TreeNode {
                id: target.child(ordinal),
                text: scenario.text.clone(),
                scenario_type: scenario.scenario_type,
                created_at: Timestamp::now(),
                children: Vec::new(),
                is_selected: false,
            })
            .collect();
    }
    rebuilt
}

/// Returns a new tree in which the node with `target` id is selected.
///
/// Additive and idempotent: selection elsewhere in the tree is never cleared.
/// The caller keeps the active path contiguous by only selecting in
/// root-to-leaf order as the user drills down. An unknown target id yields a
/// tree structurally equal to the input.
pub fn select_node(tree: &TreeNode, target: &NodeId) -> TreeNode {
    let mut rebuilt = tree.clone();
    if let Some(node) = find_node_mut(&mut rebuilt, target) {
        node.is_selected = true;
    }
    rebuilt
}

/// Depth-first lookup of the node with `target` id.
pub fn find_node<'a>(tree: &'a TreeNode, target: &NodeId) -> Option<&'a TreeNode> {
    if &tree.id == target {
        return Some(tree);
    }
    tree.children
        .iter()
        .find_map(|child| find_node(child, target))
}

fn find_node_mut<'a>(tree: &'a mut TreeNode, target: &NodeId) -> Option<&'a mut TreeNode> {
    if &tree.id == target {
        return Some(tree);
    }
    tree.children
        .iter_mut()
        .find_map(|child| find_node_mut(child, target))
}
