use algolab_collections::TreeNode;
use algolab_core::{Rgb, TreeNodeId};
use std::collections::HashMap;

/// A tree node pinned to chart coordinates.
#[derive(Debug, Clone)]
pub struct PlacedNode {
    pub id: TreeNodeId,
    pub label: String,
    pub color: Rgb,
    pub x: f64,
    pub y: f64,
}

/// Placement of a whole tree: positioned nodes plus parent-to-child edges
/// as index pairs into `nodes`.
#[derive(Debug, Clone, Default)]
pub struct TreeLayout {
    pub nodes: Vec<PlacedNode>,
    pub edges: Vec<(usize, usize)>,
}

impl TreeLayout {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn x_bounds(&self) -> (f64, f64) {
        bounds(self.nodes.iter().map(|n| n.x))
    }

    pub fn y_bounds(&self) -> (f64, f64) {
        bounds(self.nodes.iter().map(|n| n.y))
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Positions a tree for drawing: the root at the origin, each child one
/// unit below its parent and `1 / 2^layer` sideways, which keeps sibling
/// subtrees from overlapping at any depth.
pub fn layout(root: &TreeNode) -> TreeLayout {
    layout_with_colors(root, &HashMap::new())
}

/// Like [`layout`], with per-node color overrides keyed by node id (visit
/// orders, highlights).
pub fn layout_with_colors(root: &TreeNode, overrides: &HashMap<TreeNodeId, Rgb>) -> TreeLayout {
    let mut out = TreeLayout::default();
    place(root, 0.0, 0.0, 1, overrides, &mut out);
    out
}

fn place(
    node: &TreeNode,
    x: f64,
    y: f64,
    layer: u32,
    overrides: &HashMap<TreeNodeId, Rgb>,
    out: &mut TreeLayout,
) -> usize {
    let index = out.nodes.len();
    out.nodes.push(PlacedNode {
        id: node.id,
        label: node.value.to_string(),
        color: overrides.get(&node.id).copied().unwrap_or(node.color),
        x,
        y,
    });

    let offset = 0.5f64.powi(layer as i32);
    if let Some(left) = node.left.as_deref() {
        let child = place(left, x - offset, y - 1.0, layer + 1, overrides, out);
        out.edges.push((index, child));
    }
    if let Some(right) = node.right.as_deref() {
        let child = place(right, x + offset, y - 1.0, layer + 1, overrides, out);
        out.edges.push((index, child));
    }

    index
}
