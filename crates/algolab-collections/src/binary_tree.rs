use algolab_core::{Rgb, TreeNodeId};
use uuid::Uuid;

/// Fill color a node is born with ("skyblue").
pub const DEFAULT_NODE_COLOR: Rgb = Rgb::new(0x87, 0xCE, 0xEB);

/// Binary tree node carrying a display color and a stable id.
///
/// The id survives layout and rendering passes, so per-node styling (e.g.
/// traversal-order gradients) can be keyed to it.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub id: TreeNodeId,
    pub value: i64,
    pub color: Rgb,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    pub fn new(value: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            value,
            color: DEFAULT_NODE_COLOR,
            left: None,
            right: None,
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn with_left(mut self, child: TreeNode) -> Self {
        self.left = Some(Box::new(child));
        self
    }

    pub fn with_right(mut self, child: TreeNode) -> Self {
        self.right = Some(Box::new(child));
        self
    }

    /// Number of nodes in this subtree.
    pub fn count(&self) -> usize {
        let left = self.left.as_deref().map_or(0, TreeNode::count);
        let right = self.right.as_deref().map_or(0, TreeNode::count);
        1 + left + right
    }

    /// Height of this subtree in levels; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        let left = self.left.as_deref().map_or(0, TreeNode::depth);
        let right = self.right.as_deref().map_or(0, TreeNode::depth);
        1 + left.max(right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_links_children() {
        let root = TreeNode::new(0)
            .with_left(TreeNode::new(4).with_left(TreeNode::new(5)))
            .with_right(TreeNode::new(1));
        assert_eq!(root.count(), 4);
        assert_eq!(root.depth(), 3);
        assert_eq!(root.left.as_ref().unwrap().value, 4);
        assert_eq!(root.color, DEFAULT_NODE_COLOR);
    }

    #[test]
    fn ids_are_unique_per_node() {
        let a = TreeNode::new(1);
        let b = TreeNode::new(1);
        assert_ne!(a.id, b.id);
    }
}
