//! Immutable-update decision tree model.

mod node;
mod ops;

pub use node::TreeNode;
pub use ops::{attach_children, create_root, find_node, select_node};
