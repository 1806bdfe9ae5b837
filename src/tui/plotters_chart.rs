//! Plotters-powered fit chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call.
pub struct FitPlottersChart<'a> {
    /// Pieces of the fitted curve that lie inside `y_bounds`.
    pub curve_segments: &'a [Vec<(f64, f64)>],
    /// Unselected observations.
    pub points: &'a [(f64, f64)],
    /// Selected observations.
    pub selected: &'a [(f64, f64)],
    /// Observation under the keyboard cursor.
    pub cursor: Option<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for FitPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc("x")
                .y_desc("y")
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let curve_color = RGBColor(0, 255, 255); // cyan
            let points_color = WHITE;
            let selected_color = RGBColor(255, 165, 0); // orange
            let cursor_color = RGBColor(255, 255, 0); // yellow

            for segment in self.curve_segments {
                chart.draw_series(LineSeries::new(segment.iter().copied(), &curve_color))?;
            }

            // `Circle` radii are mapped incorrectly by the ratatui backend (pixel
            // radius -> normalized canvas units), so points are drawn as pixels.
            chart.draw_series(
                self.points
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), points_color)),
            )?;
            chart.draw_series(
                self.selected
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), selected_color)),
            )?;
            chart.draw_series(self.cursor.iter().map(|&(x, y)| Pixel::new((x, y), cursor_color)))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Split a sampled curve into runs that stay inside `y_bounds`.
pub fn visible_segments(curve: &[(f64, f64)], y_bounds: [f64; 2]) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for &(x, y) in curve {
        if y.is_finite() && y >= y_bounds[0] && y <= y_bounds[1] {
            current.push((x, y));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}
