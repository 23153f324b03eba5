use std::path::Path;

use plotters::{coord::types::RangedCoordf64, prelude::*};
use seidel::SolveOutcome;

use crate::Cli;

const ERROR_COLOR: RGBColor = RGBColor(0x58, 0x50, 0x8d);
const TOLERANCE_COLOR: RGBColor = RGBColor(0xff, 0x63, 0x61);

const LABEL_STYLE: (&str, i32) = ("sans-serif", 30);

/// Plot log10 of the largest relative error in each iteration,
/// with the tolerance drawn across as a horizontal line.
pub fn save_png(
    cli: &Cli,
    soln: &SolveOutcome,
    tolerance_percent: f64,
    output_path: &Path,
) -> anyhow::Result<()> {
    let chart_name = format!("Convergence of {}", cli.chart_name());
    let points = points_from_soln(soln);
    let tolerance = libm::log10(tolerance_percent);
    let bounds = Bounds::new(&points, soln.history().len(), tolerance);

    let width = 800;
    let height = 600;
    let dpi_scale = 2;
    let root = BitMapBackend::new(output_path, (width * dpi_scale, height * dpi_scale))
        .into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .caption(chart_name, ("sans-serif", 50))
        .build_cartesian_2d(bounds.min_x..bounds.max_x, bounds.min_y..bounds.max_y)?;

    draw_axes(&mut chart)?;

    // Tolerance line. Once every point is below it, the run converged.
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(bounds.min_x, tolerance), (bounds.max_x, tolerance)],
        TOLERANCE_COLOR.stroke_width(3),
    )))?;

    chart.draw_series(LineSeries::new(
        points.iter().copied(),
        ERROR_COLOR.stroke_width(3),
    ))?;
    chart.draw_series(
        points
            .iter()
            .map(|&p| plotters::prelude::Circle::new(p, 6, ERROR_COLOR.filled())),
    )?;

    // Finished.
    root.present()?;
    println!("Plot saved to {}", output_path.display());
    Ok(())
}

/// (1-based iteration number, log10 of its largest relative error).
/// The first iteration and iterations with no defined, non-zero error are skipped.
fn points_from_soln(soln: &SolveOutcome) -> Vec<(f64, f64)> {
    soln.history()
        .iter()
        .filter_map(|record| {
            let max_error = record.max_relative_error()?;
            if max_error > 0.0 && max_error.is_finite() {
                Some(((record.iteration() + 1) as f64, libm::log10(max_error)))
            } else {
                None
            }
        })
        .collect()
}

/// Span of the chart area
struct Bounds {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Bounds {
    fn new(points: &[(f64, f64)], iterations: usize, tolerance: f64) -> Self {
        let ys = points.iter().map(|(_, y)| *y).chain(std::iter::once(tolerance));
        let padding = 0.5;
        let min_y = ys.clone().reduce(f64::min).unwrap_or(0.0) - padding;
        let max_y = ys.reduce(f64::max).unwrap_or(0.0) + padding;
        Self {
            min_x: 0.0,
            max_x: iterations as f64 + 1.0,
            min_y,
            max_y,
        }
    }
}

fn draw_axes<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
) -> anyhow::Result<()>
where
    <DB as DrawingBackend>::ErrorType: 'static,
{
    chart
        .configure_mesh()
        .x_desc("Iteration")
        .y_desc("log10(max |relative error| %)")
        .label_style(LABEL_STYLE) // axis labels
        .axis_desc_style(LABEL_STYLE) // x/y axis captions
        .draw()?;
    Ok(())
}
