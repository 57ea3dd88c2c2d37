//! Chart rendering with plotters.
//!
//! `CurvePlot` is an explicitly owned chart object: each pipeline invocation
//! creates a fresh one and accumulates its labeled line series into it, so
//! repeated or interleaved invocations cannot cross-contaminate plots (there
//! is no process-wide "current figure" anywhere). Rendering happens only
//! when the caller asks for a PNG.

use crate::errors::GrapherError;
use log::info;
use plotters::prelude::*;

/// Default raster size of the rendered chart (the 10x6 inch figure of the
/// usual plotting setups at 100 dpi).
pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 600;

/// One labeled curve: shared x grid plus its sampled y values. NaN y values
/// mark undefined points and are drawn as gaps.
#[derive(Debug, Clone)]
pub struct Curve {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// A mutable rendering surface accumulating labeled line series plus title
/// and axis labels; the terminal artifact of the pipeline.
#[derive(Debug, Clone)]
pub struct CurvePlot {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub curves: Vec<Curve>,
}

impl CurvePlot {
    /// Fresh empty chart with "x"/"y" axis labels.
    pub fn new(title: &str) -> Self {
        CurvePlot {
            title: title.to_string(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            curves: Vec::new(),
        }
    }

    /// Adds a labeled line series sharing the chart's x grid.
    ///
    /// A series whose length differs from its domain is a caller error and
    /// is rejected, not truncated.
    pub fn add_curve(&mut self, label: &str, x: Vec<f64>, y: Vec<f64>) -> Result<(), GrapherError> {
        if x.len() != y.len() {
            return Err(GrapherError::LengthMismatch {
                series: y.len(),
                domain: x.len(),
            });
        }
        self.curves.push(Curve {
            label: label.to_string(),
            x,
            y,
        });
        Ok(())
    }

    /// Renders all curves on shared axes into a PNG file: background grid,
    /// axis descriptions, caption and a legend keyed by the curve labels.
    pub fn save_to_png(&self, filename: &str, width: u32, height: u32) -> Result<(), GrapherError> {
        let (x_range, y_range) = self.axis_ranges();

        let root_area = BitMapBackend::new(filename, (width, height)).into_drawing_area();
        root_area
            .fill(&WHITE)
            .map_err(|e| GrapherError::Render(e.to_string()))?;

        let mut chart = ChartBuilder::on(&root_area)
            .caption(&self.title, ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_range)
            .map_err(|e| GrapherError::Render(e.to_string()))?;

        chart
            .configure_mesh()
            .x_desc(&self.x_label)
            .y_desc(&self.y_label)
            .draw()
            .map_err(|e| GrapherError::Render(e.to_string()))?;

        for (col, curve) in self.curves.iter().enumerate() {
            let color = Palette99::pick(col);
            // NaN markers split the curve into finite segments so the
            // renderer leaves a gap at undefined points
            let mut first_segment = true;
            for segment in finite_segments(&curve.x, &curve.y) {
                let series = chart
                    .draw_series(LineSeries::new(segment, color.stroke_width(2)))
                    .map_err(|e| GrapherError::Render(e.to_string()))?;
                if first_segment {
                    let legend_color = color.to_rgba();
                    series.label(curve.label.clone()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], legend_color)
                    });
                    first_segment = false;
                }
            }
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| GrapherError::Render(e.to_string()))?;

        root_area
            .present()
            .map_err(|e| GrapherError::Render(e.to_string()))?;
        info!("chart with {} curves saved to {}", self.curves.len(), filename);
        Ok(())
    }

    /// Axis ranges spanning all finite samples of all curves, with a small
    /// margin. A constant curve gets a unit pad around its value; a chart
    /// with no finite samples falls back to a unit box.
    fn axis_ranges(&self) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for curve in &self.curves {
            for (&x, &y) in curve.x.iter().zip(curve.y.iter()) {
                if x.is_finite() {
                    x_min = x_min.min(x);
                    x_max = x_max.max(x);
                }
                if y.is_finite() {
                    y_min = y_min.min(y);
                    y_max = y_max.max(y);
                }
            }
        }
        // a degenerate span (constant curve) is padded around its value;
        // only a chart with no finite samples at all falls back to a unit box
        if !x_min.is_finite() {
            x_min = 0.0;
            x_max = 1.0;
        } else if x_min == x_max {
            x_min -= 1.0;
            x_max += 1.0;
        }
        if !y_min.is_finite() {
            y_min = 0.0;
            y_max = 1.0;
        } else if y_min == y_max {
            y_min -= 1.0;
            y_max += 1.0;
        }
        let x_pad = 0.05 * (x_max - x_min);
        let y_pad = 0.05 * (y_max - y_min);
        (
            (x_min - x_pad)..(x_max + x_pad),
            (y_min - y_pad)..(y_max + y_pad),
        )
    }
}

/// Splits a sampled curve at NaN markers into runs of consecutive finite
/// points; runs of fewer than two points draw nothing and are skipped.
pub(crate) fn finite_segments(x: &[f64], y: &[f64]) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        if yi.is_nan() {
            if current.len() >= 2 {
                segments.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
        } else {
            current.push((xi, yi));
        }
    }
    if current.len() >= 2 {
        segments.push(current);
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_curve_length_mismatch() {
        let mut plot = CurvePlot::new("test");
        let result = plot.add_curve("f", vec![0.0, 1.0, 2.0], vec![0.0, 1.0]);
        assert_eq!(
            result,
            Err(GrapherError::LengthMismatch {
                series: 2,
                domain: 3
            })
        );
        assert!(plot.curves.is_empty());
    }

    #[test]
    fn test_add_curve_accumulates_in_order() {
        let mut plot = CurvePlot::new("test");
        plot.add_curve("f", vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
        plot.add_curve("g", vec![0.0, 1.0], vec![1.0, 2.0]).unwrap();
        assert_eq!(plot.curves.len(), 2);
        assert_eq!(plot.curves[0].label, "f");
        assert_eq!(plot.curves[1].label, "g");
    }

    #[test]
    fn test_finite_segments_no_nan() {
        let segments = finite_segments(&[0.0, 1.0, 2.0], &[5.0, 6.0, 7.0]);
        assert_eq!(segments, vec![vec![(0.0, 5.0), (1.0, 6.0), (2.0, 7.0)]]);
    }

    #[test]
    fn test_finite_segments_split_at_nan() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y = [1.0, 2.0, f64::NAN, 3.0, 4.0];
        let segments = finite_segments(&x, &y);
        assert_eq!(
            segments,
            vec![
                vec![(0.0, 1.0), (1.0, 2.0)],
                vec![(3.0, 3.0), (4.0, 4.0)]
            ]
        );
    }

    #[test]
    fn test_finite_segments_drop_isolated_points() {
        let x = [0.0, 1.0, 2.0];
        let y = [f64::NAN, 5.0, f64::NAN];
        assert!(finite_segments(&x, &y).is_empty());
    }

    #[test]
    fn test_axis_ranges_ignore_nan() {
        let mut plot = CurvePlot::new("test");
        plot.add_curve("f", vec![0.0, 1.0, 2.0], vec![1.0, f64::NAN, 3.0])
            .unwrap();
        let (x_range, y_range) = plot.axis_ranges();
        assert!(x_range.start < 0.0 && x_range.end > 2.0);
        assert!(y_range.start < 1.0 && y_range.end > 3.0);
    }

    #[test]
    fn test_axis_ranges_keep_constant_curve_visible() {
        // y = 5 everywhere must stay inside the rendered y-range
        let mut plot = CurvePlot::new("test");
        plot.add_curve("f", vec![0.0, 1.0, 2.0], vec![5.0, 5.0, 5.0])
            .unwrap();
        let (_, y_range) = plot.axis_ranges();
        assert!(y_range.start < 5.0 && y_range.end > 5.0);
    }

    #[test]
    fn test_save_to_png_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curves.png");
        let path_str = path.to_str().unwrap();

        let mut plot = CurvePlot::new("smoke");
        let x: Vec<f64> = (0..50).map(|i| i as f64 / 10.0).collect();
        let y: Vec<f64> = x.iter().map(|v| v.sin()).collect();
        plot.add_curve("sin", x, y).unwrap();
        plot.save_to_png(path_str, 320, 240).unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
