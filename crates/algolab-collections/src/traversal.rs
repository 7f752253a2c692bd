use crate::TreeNode;
use algolab_core::TraversalOrder;
use std::collections::VecDeque;

/// Preorder depth-first visit order, iterative with an explicit stack.
///
/// The right child is pushed before the left so the left subtree is taken
/// off the stack first.
pub fn dfs_order(root: &TreeNode) -> Vec<&TreeNode> {
    let mut stack = vec![root];
    let mut visited = Vec::new();

    while let Some(node) = stack.pop() {
        visited.push(node);
        if let Some(right) = node.right.as_deref() {
            stack.push(right);
        }
        if let Some(left) = node.left.as_deref() {
            stack.push(left);
        }
    }

    visited
}

/// Breadth-first visit order, level by level, left to right.
pub fn bfs_order(root: &TreeNode) -> Vec<&TreeNode> {
    let mut queue = VecDeque::from([root]);
    let mut visited = Vec::new();

    while let Some(node) = queue.pop_front() {
        visited.push(node);
        if let Some(left) = node.left.as_deref() {
            queue.push_back(left);
        }
        if let Some(right) = node.right.as_deref() {
            queue.push_back(right);
        }
    }

    visited
}

pub fn traverse(root: &TreeNode, order: TraversalOrder) -> Vec<&TreeNode> {
    match order {
        TraversalOrder::Dfs => dfs_order(root),
        TraversalOrder::Bfs => bfs_order(root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //       0
    //      / \
    //     4   1
    //    / \  /
    //   5  10 3
    fn sample_tree() -> TreeNode {
        TreeNode::new(0)
            .with_left(
                TreeNode::new(4)
                    .with_left(TreeNode::new(5))
                    .with_right(TreeNode::new(10)),
            )
            .with_right(TreeNode::new(1).with_left(TreeNode::new(3)))
    }

    fn values(nodes: &[&TreeNode]) -> Vec<i64> {
        nodes.iter().map(|n| n.value).collect()
    }

    #[test]
    fn dfs_goes_deep_left_first() {
        let tree = sample_tree();
        assert_eq!(values(&dfs_order(&tree)), vec![0, 4, 5, 10, 1, 3]);
    }

    #[test]
    fn bfs_goes_level_by_level() {
        let tree = sample_tree();
        assert_eq!(values(&bfs_order(&tree)), vec![0, 4, 1, 5, 10, 3]);
    }

    #[test]
    fn single_node_visits_once() {
        let leaf = TreeNode::new(42);
        assert_eq!(values(&dfs_order(&leaf)), vec![42]);
        assert_eq!(values(&bfs_order(&leaf)), vec![42]);
    }

    #[test]
    fn traverse_dispatches_on_order() {
        let tree = sample_tree();
        assert_eq!(
            values(&traverse(&tree, TraversalOrder::Dfs)),
            values(&dfs_order(&tree))
        );
        assert_eq!(
            values(&traverse(&tree, TraversalOrder::Bfs)),
            values(&bfs_order(&tree))
        );
    }
}
