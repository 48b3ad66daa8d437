//! Chart configuration for the rendering collaborator.
//!
//! Everything the renderer needs is assembled here as plain data: one
//! dataset per series (label, ordered points, stroke attributes), the
//! month-grouped time axis, the dual currency axes, and the tooltip/legend
//! presentation rules. The TUI widget and the JSON export both consume this
//! object; neither reaches back into raw records.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{PricePoint, PriceSeries, Rgb};

/// USD→INR factor used for secondary-axis ticks.
///
/// Axis ticks convert with this fixed rate while tooltips carry each
/// record's own `inr_per_kg`, so the axis is approximate where the tooltip
/// is exact; the two can disagree.
pub const INR_PER_USD: f64 = 87.82;

/// Stroke width shared by every dataset.
pub const STROKE_WIDTH: f64 = 2.5;

/// Dash pattern applied to dashed series.
pub const DASH_PATTERN: [u32; 2] = [5, 5];

/// One renderable line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    /// Ordered ascending by date (inherited from the series build).
    pub points: Vec<PricePoint>,
    pub border_color: Rgb,
    pub border_width: f64,
    /// Empty for solid strokes.
    pub border_dash: Vec<u32>,
    pub point_radius: f64,
    pub point_hover_radius: f64,
}

/// Horizontal axis: time, grouped by month.
#[derive(Debug, Clone, Serialize)]
pub struct TimeAxisSpec {
    pub unit: &'static str,
    pub label_format: &'static str,
}

/// Left axis: USD per kg, linear ticks with a currency prefix.
#[derive(Debug, Clone, Serialize)]
pub struct PriceAxisSpec {
    pub title: &'static str,
    pub prefix: &'static str,
    pub decimals: u8,
}

/// Right axis: INR per kg, derived from the USD tick by a fixed factor.
#[derive(Debug, Clone, Serialize)]
pub struct SecondaryAxisSpec {
    pub title: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
    pub per_primary: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendSpec {
    pub position: &'static str,
    pub point_style: bool,
}

/// The full configuration object handed to the renderer.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub datasets: Vec<Dataset>,
    pub time_axis: TimeAxisSpec,
    pub price_axis: PriceAxisSpec,
    pub secondary_axis: SecondaryAxisSpec,
    pub legend: LegendSpec,
}

/// Map built series to the renderer configuration.
pub fn build_chart_spec(series: &[PriceSeries]) -> ChartSpec {
    let datasets = series
        .iter()
        .map(|s| Dataset {
            label: s.label(),
            points: s.points.clone(),
            border_color: s.color,
            border_width: STROKE_WIDTH,
            border_dash: if s.is_dashed() {
                DASH_PATTERN.to_vec()
            } else {
                Vec::new()
            },
            point_radius: 0.0,
            point_hover_radius: 5.0,
        })
        .collect();

    ChartSpec {
        datasets,
        time_axis: TimeAxisSpec {
            unit: "month",
            label_format: "%b %Y",
        },
        price_axis: PriceAxisSpec {
            title: "Price (USD/kg)",
            prefix: "$",
            decimals: 2,
        },
        secondary_axis: SecondaryAxisSpec {
            title: "Price (INR/kg)",
            symbol: "₹",
            decimals: 0,
            per_primary: INR_PER_USD,
        },
        legend: LegendSpec {
            position: "bottom",
            point_style: true,
        },
    }
}

/// Format a primary-axis tick, e.g. `$2.50`.
pub fn fmt_usd_tick(value: f64) -> String {
    format!("${value:.2}")
}

/// Format a secondary-axis tick from the primary value, e.g. `₹220`.
pub fn fmt_inr_tick(usd_value: f64) -> String {
    format!("₹{:.0}", usd_value * INR_PER_USD)
}

/// Format a time-axis label / tooltip title, e.g. `Jan 2023`.
pub fn fmt_month(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// One tooltip body entry (one series at one date).
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipEntry {
    pub label: String,
    pub usd: String,
    pub inr: String,
}

/// Tooltip body for a date: label and both currency values per series that
/// has an observation there.
pub fn tooltip_at(series: &[PriceSeries], date: NaiveDate) -> Vec<TooltipEntry> {
    series
        .iter()
        .filter_map(|s| {
            let point = s.points.iter().find(|p| p.date == date)?;
            Some(TooltipEntry {
                label: s.label(),
                usd: format!("USD: ${:.2}/kg", point.usd_per_kg),
                inr: match point.inr_per_kg {
                    Some(inr) => format!("INR: ₹{inr:.2}/kg"),
                    None => "INR: n/a".to_string(),
                },
            })
        })
        .collect()
}

/// Distinct observed dates across all series, ascending.
pub fn observed_dates(series: &[PriceSeries]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.date))
        .collect();
    dates.sort();
    dates.dedup();
    dates
}

/// Date span across all series, or `None` when there are no points.
pub fn date_bounds(series: &[PriceSeries]) -> Option<[NaiveDate; 2]> {
    let dates = observed_dates(series);
    Some([*dates.first()?, *dates.last()?])
}

/// USD range across all series with 5% padding, or `None` without points.
pub fn usd_bounds(series: &[PriceSeries]) -> Option<[f64; 2]> {
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for s in series {
        for p in &s.points {
            y_min = y_min.min(p.usd_per_kg);
            y_max = y_max.max(p.usd_per_kg);
        }
    }

    if !y_min.is_finite() || !y_max.is_finite() {
        return None;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    Some([y_min - pad, y_max + pad])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::series::build_series;
    use crate::domain::PriceRecord;

    fn records() -> Vec<PriceRecord> {
        let raw = r#"[
            {"commodity": "chicken", "country": "Thailand", "product_form": "Thigh",
             "date": "2022-12-01", "usd_per_kg": 2.3, "inr_per_kg": 202.0},
            {"commodity": "chicken", "country": "Thailand", "product_form": "Thigh",
             "date": "2023-01-01", "usd_per_kg": 2.5},
            {"commodity": "chicken", "country": "United States", "product_form": "breast",
             "date": "2023-01-01", "usd_per_kg": 3.0, "inr_per_kg": 263.5}
        ]"#;
        serde_json::from_str(raw).unwrap()
    }

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn datasets_carry_style_and_dash_pattern() {
        let series = build_series(&records(), "chicken");
        let spec = build_chart_spec(&series);
        assert_eq!(spec.datasets.len(), 2);

        let thigh = spec
            .datasets
            .iter()
            .find(|d| d.label == "Thailand • Thigh")
            .unwrap();
        assert_eq!(thigh.border_dash, vec![5, 5]);
        assert_eq!(thigh.border_width, STROKE_WIDTH);
        assert_eq!(thigh.point_radius, 0.0);

        let breast = spec
            .datasets
            .iter()
            .find(|d| d.label == "United States • breast")
            .unwrap();
        assert!(breast.border_dash.is_empty());
    }

    #[test]
    fn tick_formatting() {
        assert_eq!(fmt_usd_tick(2.5), "$2.50");
        // 2.5 * 87.82 = 219.55, rounded with no decimals.
        assert_eq!(fmt_inr_tick(2.5), "₹220");
        assert_eq!(fmt_month(date("2023-01-15")), "Jan 2023");
    }

    #[test]
    fn tooltip_lists_both_currencies_per_series() {
        let series = build_series(&records(), "chicken");
        let entries = tooltip_at(&series, date("2023-01-01"));
        assert_eq!(entries.len(), 2);

        let thigh = entries
            .iter()
            .find(|e| e.label == "Thailand • Thigh")
            .unwrap();
        assert_eq!(thigh.usd, "USD: $2.50/kg");
        assert_eq!(thigh.inr, "INR: n/a");

        let breast = entries
            .iter()
            .find(|e| e.label == "United States • breast")
            .unwrap();
        assert_eq!(breast.inr, "INR: ₹263.50/kg");
    }

    #[test]
    fn bounds_cover_all_series_with_padding() {
        let series = build_series(&records(), "chicken");
        assert_eq!(
            date_bounds(&series),
            Some([date("2022-12-01"), date("2023-01-01")])
        );

        let [y0, y1] = usd_bounds(&series).unwrap();
        assert!(y0 < 2.3 && y0 > 2.2);
        assert!(y1 > 3.0 && y1 < 3.1);

        assert!(usd_bounds(&[]).is_none());
        assert!(date_bounds(&[]).is_none());
    }

    #[test]
    fn observed_dates_are_distinct_and_ascending() {
        let series = build_series(&records(), "chicken");
        assert_eq!(
            observed_dates(&series),
            vec![date("2022-12-01"), date("2023-01-01")]
        );
    }
}
