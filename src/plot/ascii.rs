//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - line segments: `-` for solid series, `.` for dashed series
//! - observed points: the series' index marker (`1`-`9`, then `*`)
//! - a trailing legend mapping markers to series labels

use chrono::NaiveDate;

use crate::chart::{date_bounds, usd_bounds};
use crate::domain::PriceSeries;

/// Render every series of one build onto a character grid.
pub fn render_ascii_chart(series: &[PriceSeries], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (Some([d_min, d_max]), Some([y_min, y_max])) = (date_bounds(series), usd_bounds(series))
    else {
        return "No points to plot.\n".to_string();
    };

    let mut grid = vec![vec![' '; width]; height];

    // Draw lines first (so point markers can overlay).
    for s in series {
        let glyph = if s.is_dashed() { '.' } else { '-' };
        let mut prev = None;
        for p in &s.points {
            let x = map_x(p.date, d_min, d_max, width);
            let y = map_y(p.usd_per_kg, y_min, y_max, height);
            if let Some((x0, y0)) = prev {
                draw_line(&mut grid, x0, y0, x, y, glyph);
            } else {
                grid[y][x] = glyph;
            }
            prev = Some((x, y));
        }
    }

    for (idx, s) in series.iter().enumerate() {
        let marker = series_marker(idx);
        for p in &s.points {
            let x = map_x(p.date, d_min, d_max, width);
            let y = map_y(p.usd_per_kg, y_min, y_max, height);
            grid[y][x] = marker;
        }
    }

    // Build final string. We include a small header with ranges.
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: date=[{d_min}, {d_max}] | usd/kg=[{y_min:.2}, {y_max:.2}]\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    for (idx, s) in series.iter().enumerate() {
        let style_note = if s.is_dashed() { " (dashed)" } else { "" };
        out.push_str(&format!("  {} {}{style_note}\n", series_marker(idx), s.label()));
    }

    out
}

fn series_marker(idx: usize) -> char {
    match idx {
        0..=8 => (b'1' + idx as u8) as char,
        _ => '*',
    }
}

fn map_x(date: NaiveDate, d_min: NaiveDate, d_max: NaiveDate, width: usize) -> usize {
    let width = width.max(2);
    let span = (d_max - d_min).num_days().max(1) as f64;
    let t = (date - d_min).num_days() as f64;
    let u = (t / span).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::build_series;
    use crate::domain::PriceRecord;

    fn record(date: &str, usd: f64) -> PriceRecord {
        PriceRecord {
            commodity: "chicken".to_string(),
            country: "Thailand".to_string(),
            product_form: Some("Thigh".to_string()),
            date: Some(date.to_string()),
            usd_per_kg: Some(usd),
            inr_per_kg: None,
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let records = vec![record("2022-12-01", 2.3), record("2023-01-01", 2.5)];
        let series = build_series(&records, "chicken");

        let txt = render_ascii_chart(&series, 10, 5);
        let expected = concat!(
            "Plot: date=[2022-12-01, 2023-01-01] | usd/kg=[2.29, 2.51]\n",
            "         1\n",
            "       .. \n",
            "    ...   \n",
            "  ..      \n",
            "1.        \n",
            "  1 Thailand • Thigh (dashed)\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_series_render_a_hint() {
        assert_eq!(render_ascii_chart(&[], 40, 10), "No points to plot.\n");
    }

    #[test]
    fn single_date_does_not_panic() {
        let records = vec![record("2022-12-01", 2.3)];
        let series = build_series(&records, "chicken");
        let txt = render_ascii_chart(&series, 20, 6);
        assert!(txt.contains('1'));
    }
}
