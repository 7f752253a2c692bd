use crate::render_err;
use algolab_analysis::DiceReport;
use algolab_core::{AlgoLabError, Result};
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

const SIMULATED_FILL: RGBColor = RGBColor(70, 130, 180); // steelblue
const THEORETICAL_FILL: RGBColor = RGBColor(255, 127, 80); // coral
const DEVIATION_FILL: RGBColor = RGBColor(220, 20, 60); // crimson

/// Two stacked panels: grouped simulated-vs-theoretical probability bars on
/// top, absolute deviation per sum below.
pub fn render_dice_comparison(report: &DiceReport, path: &Path, size: (u32, u32)) -> Result<()> {
    if report.rows.is_empty() {
        return Err(AlgoLabError::InvalidOperation(
            "dice report has no rows".to_string(),
        ));
    }

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let panels = root.split_evenly((2, 1));

    let prob_max = report
        .rows
        .iter()
        .map(|r| r.simulated.max(r.theoretical))
        .fold(0.0_f64, f64::max)
        * 100.0;
    let y_max = (prob_max * 1.2).max(1.0);

    let mut chart = ChartBuilder::on(&panels[0])
        .caption(
            format!(
                "Two-die sums: simulated vs theoretical ({} trials)",
                report.trials
            ),
            ("sans-serif", 20),
        )
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(1.0f64..13.0f64, 0.0f64..y_max)
        .map_err(render_err)?;
    chart
        .configure_mesh()
        .x_desc("sum of two dice")
        .y_desc("probability (%)")
        .x_labels(13)
        .disable_x_mesh()
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(report.rows.iter().map(|row| {
            let x = f64::from(row.sum);
            Rectangle::new(
                [(x - 0.35, 0.0), (x, row.simulated * 100.0)],
                SIMULATED_FILL.mix(0.85).filled(),
            )
        }))
        .map_err(render_err)?
        .label("simulated")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], SIMULATED_FILL.filled()));
    chart
        .draw_series(report.rows.iter().map(|row| {
            let x = f64::from(row.sum);
            Rectangle::new(
                [(x, 0.0), (x + 0.35, row.theoretical * 100.0)],
                THEORETICAL_FILL.mix(0.85).filled(),
            )
        }))
        .map_err(render_err)?
        .label("theoretical")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], THEORETICAL_FILL.filled()));
    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(render_err)?;

    let deviation_max = report
        .rows
        .iter()
        .map(|r| r.abs_error)
        .fold(0.0_f64, f64::max)
        * 100.0;
    let dev_y_max = (deviation_max * 1.3).max(1e-3);

    let mut deviation_chart = ChartBuilder::on(&panels[1])
        .caption("Deviation from the analytic distribution", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(1.0f64..13.0f64, 0.0f64..dev_y_max)
        .map_err(render_err)?;
    deviation_chart
        .configure_mesh()
        .x_desc("sum of two dice")
        .y_desc("absolute deviation (%)")
        .x_labels(13)
        .disable_x_mesh()
        .draw()
        .map_err(render_err)?;

    deviation_chart
        .draw_series(report.rows.iter().map(|row| {
            let x = f64::from(row.sum);
            Rectangle::new(
                [(x - 0.3, 0.0), (x + 0.3, row.abs_error * 100.0)],
                DEVIATION_FILL.mix(0.7).filled(),
            )
        }))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    info!(path = %path.display(), trials = report.trials, "dice chart written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use algolab_analysis::{compare, simulate};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn writes_an_svg_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dice.svg");
        let tally = simulate(5_000, &mut StdRng::seed_from_u64(11));
        render_dice_comparison(&compare(&tally), &path, (1024, 768)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("<svg"));
        assert!(contents.contains("rect"));
    }
}
