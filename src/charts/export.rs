//! Static Chart Export Module
//! Renders the current scatter chart to a PNG file with plotters.

use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

const IMAGE_SIZE: (u32, u32) = (1000, 700);

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("No points to plot")]
    Empty,
    #[error("Failed to render chart: {0}")]
    Render(String),
}

/// Renders static chart images for export.
pub struct ChartExporter;

impl ChartExporter {
    /// Write a scatter chart of `points` (with an optional `y = a + b x`
    /// trend line) to a PNG at `path`.
    pub fn export_scatter(
        path: &Path,
        x_label: &str,
        y_label: &str,
        points: &[(f64, f64)],
        trend: Option<(f64, f64)>,
    ) -> Result<(), ChartError> {
        let finite: Vec<(f64, f64)> = points
            .iter()
            .copied()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect();
        if finite.is_empty() {
            return Err(ChartError::Empty);
        }

        let (x_min, x_max) = padded_range(finite.iter().map(|p| p.0));
        let (y_min, y_max) = padded_range(finite.iter().map(|p| p.1));

        let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| ChartError::Render(e.to_string()))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("{y_label} vs {x_label}"),
                ("sans-serif", 28).into_font(),
            )
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| ChartError::Render(e.to_string()))?;

        chart
            .configure_mesh()
            .x_desc(x_label)
            .y_desc(y_label)
            .draw()
            .map_err(|e| ChartError::Render(e.to_string()))?;

        chart
            .draw_series(
                finite
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, BLUE.mix(0.6).filled())),
            )
            .map_err(|e| ChartError::Render(e.to_string()))?;

        if let Some((a, b)) = trend {
            chart
                .draw_series(LineSeries::new(
                    [(x_min, a + b * x_min), (x_max, a + b * x_max)],
                    RED.stroke_width(2),
                ))
                .map_err(|e| ChartError::Render(e.to_string()))?;
        }

        root.present().map_err(|e| ChartError::Render(e.to_string()))
    }
}

/// Axis range with 5% padding on each side; degenerate ranges get a unit pad.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min > max {
        return (0.0, 1.0);
    }
    let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_rejected() {
        let path = std::env::temp_dir().join("carprice_empty_chart.png");
        let result = ChartExporter::export_scatter(&path, "x", "y", &[], None);
        assert!(matches!(result, Err(ChartError::Empty)));
    }

    #[test]
    fn padded_range_handles_degenerate_spans() {
        let (lo, hi) = padded_range([5.0, 5.0].into_iter());
        assert!(lo < 5.0 && hi > 5.0);
        let (lo, hi) = padded_range(std::iter::empty());
        assert_eq!((lo, hi), (0.0, 1.0));
    }
}
