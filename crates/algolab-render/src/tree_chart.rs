use crate::{render_err, TreeLayout};
use algolab_core::{AlgoLabError, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use tracing::info;

/// Draws a positioned tree as an SVG diagram: edges first, then filled
/// node circles with centered value labels.
pub fn render_tree(layout: &TreeLayout, title: &str, path: &Path, size: (u32, u32)) -> Result<()> {
    if layout.is_empty() {
        return Err(AlgoLabError::InvalidOperation(
            "cannot render an empty tree".to_string(),
        ));
    }

    let (x_lo, x_hi) = layout.x_bounds();
    let (y_lo, y_hi) = layout.y_bounds();
    let x_margin = ((x_hi - x_lo) * 0.2).max(0.3);
    let y_margin = 0.6;

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(20)
        .build_cartesian_2d(
            (x_lo - x_margin)..(x_hi + x_margin),
            (y_lo - y_margin)..(y_hi + y_margin),
        )
        .map_err(render_err)?;

    for &(parent, child) in &layout.edges {
        let a = &layout.nodes[parent];
        let b = &layout.nodes[child];
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(a.x, a.y), (b.x, b.y)],
                BLACK.mix(0.6).stroke_width(2),
            )))
            .map_err(render_err)?;
    }

    let label_style = ("sans-serif", 16)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    for node in &layout.nodes {
        let fill = RGBColor(node.color.r, node.color.g, node.color.b);
        chart
            .draw_series(std::iter::once(Circle::new((node.x, node.y), 20, fill.filled())))
            .map_err(render_err)?;
        chart
            .draw_series(std::iter::once(Circle::new(
                (node.x, node.y),
                20,
                BLACK.stroke_width(1),
            )))
            .map_err(render_err)?;
        chart
            .draw_series(std::iter::once(Text::new(
                node.label.clone(),
                (node.x, node.y),
                label_style.clone(),
            )))
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    info!(path = %path.display(), nodes = layout.nodes.len(), "tree chart written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout;
    use algolab_collections::TreeNode;

    #[test]
    fn writes_an_svg_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.svg");
        let tree = TreeNode::new(0)
            .with_left(TreeNode::new(4))
            .with_right(TreeNode::new(1));
        render_tree(&layout(&tree), "Binary tree", &path, (640, 480)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("<svg"));
        assert!(contents.contains("circle"));
    }

    #[test]
    fn empty_layout_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("none.svg");
        let err = render_tree(&TreeLayout::default(), "x", &path, (100, 100)).unwrap_err();
        assert!(matches!(err, AlgoLabError::InvalidOperation(_)));
    }
}
