use crate::{render_err, Segment};
use algolab_core::{AlgoLabError, Result, Rgb};
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

/// Default stroke color for fractal strokes ("darkred").
pub const FRACTAL_STROKE: Rgb = Rgb::new(139, 0, 0);

/// Renders a turtle segment cloud to an SVG file.
pub fn render_fractal(
    segments: &[Segment],
    title: &str,
    path: &Path,
    size: (u32, u32),
    stroke: Rgb,
) -> Result<()> {
    if segments.is_empty() {
        return Err(AlgoLabError::InvalidOperation(
            "no segments to render".to_string(),
        ));
    }

    let points = segments.iter().flat_map(|s| [s.start, s.end]);
    let (mut x_lo, mut x_hi, mut y_lo, mut y_hi) = (f64::MAX, f64::MIN, f64::MAX, f64::MIN);
    for p in points {
        x_lo = x_lo.min(p.x);
        x_hi = x_hi.max(p.x);
        y_lo = y_lo.min(p.y);
        y_hi = y_hi.max(p.y);
    }
    let x_margin = ((x_hi - x_lo) * 0.05).max(1.0);
    let y_margin = ((y_hi - y_lo) * 0.05).max(1.0);

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .build_cartesian_2d(
            (x_lo - x_margin)..(x_hi + x_margin),
            (y_lo - y_margin)..(y_hi + y_margin),
        )
        .map_err(render_err)?;

    let color = RGBColor(stroke.r, stroke.g, stroke.b);
    chart
        .draw_series(
            segments.iter().map(|s| {
                PathElement::new(vec![(s.start.x, s.start.y), (s.end.x, s.end.y)], color)
            }),
        )
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    info!(path = %path.display(), segments = segments.len(), "fractal chart written");
    Ok(())
}
