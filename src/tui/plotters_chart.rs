//! Plotters-powered price chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//! - easy to extend later (annotations, exportable PNG/SVG backends, etc.)
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use chrono::{Days, NaiveDate};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::chart::{Dataset, fmt_month, fmt_usd_tick};

/// A lightweight, render-only chart description.
///
/// The widget is intentionally data-driven: all datasets and bounds are
/// computed outside the render call. This keeps `render()` focused on drawing
/// and makes it easy to test the data prep separately.
pub struct PriceChart<'a> {
    /// One line per `(country, product_form)` series.
    pub datasets: &'a [Dataset],
    /// X bounds (observed dates).
    pub x_bounds: [NaiveDate; 2],
    /// Y bounds (USD per kg).
    pub y_bounds: [f64; 2],
    /// Axis labels (kept simple for terminal rendering).
    pub x_label: &'a str,
    pub y_label: &'a str,
    /// Inspect cursor drawn as a vertical line, when active.
    pub cursor: Option<NaiveDate>,
}

impl Widget for PriceChart<'_> {
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

        let x0 = self.x_bounds[0];
        // A single observed date degenerates the x range; widen it by a day.
        let x1 = if self.x_bounds[1] > x0 {
            self.x_bounds[1]
        } else {
            x0 + Days::new(1)
        };
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(y0.is_finite() && y1.is_finite()) || y1 <= y0 {
            return;
        }

        let datasets = self.datasets;
        let cursor = self.cursor;
        let x_label = self.x_label;
        let y_label = self.y_label;

        // `plotters-ratatui-backend` draws Plotters primitives via Ratatui's
        // `Canvas` widget, which ultimately writes to the terminal buffer.
        //
        // We delegate rendering to the crate-provided widget helper to avoid
        // coupling our code to its internal backend types.
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                // Small margins keep the chart readable without wasting space.
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 7)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Axes + tick labels.
            //
            // We disable the mesh lines to reduce visual clutter in
            // low-resolution terminal rendering; month ticks plus the USD
            // labels are enough. The INR axis is drawn by the caller in the
            // right margin, since Plotters' secondary axes assume more
            // resolution than a terminal has.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(x_label)
                .y_desc(y_label)
                .x_labels(4)
                .y_labels(5)
                .x_label_formatter(&|d| fmt_month(*d))
                .y_label_formatter(&|v| fmt_usd_tick(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            // Inspect cursor behind the data lines.
            if let Some(cursor) = cursor {
                let cursor_color = RGBColor(148, 163, 184); // slate
                chart.draw_series(LineSeries::new(
                    [(cursor, y0), (cursor, y1)],
                    &cursor_color,
                ))?;
            }

            // One line per dataset; the dash pattern selects the series type.
            for ds in datasets {
                let color = RGBColor(ds.border_color.r, ds.border_color.g, ds.border_color.b);
                let points = ds.points.iter().map(|p| (p.date, p.usd_per_kg));
                if ds.border_dash.is_empty() {
                    chart.draw_series(LineSeries::new(points, &color))?;
                } else {
                    let (size, spacing) = (
                        ds.border_dash[0],
                        ds.border_dash.get(1).copied().unwrap_or(ds.border_dash[0]),
                    );
                    chart.draw_series(DashedLineSeries::new(points, size, spacing, color.into()))?;
                }
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
