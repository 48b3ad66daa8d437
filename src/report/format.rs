//! Run summary and series table formatting.

use crate::app::pipeline::RunOutput;
use crate::chart::date_bounds;
use crate::domain::PriceSeries;

/// Format the full run summary (source, counts, per-series table).
pub fn format_run_summary(run: &RunOutput) -> String {
    let mut out = String::new();

    out.push_str("=== pw - Commodity Price Lines ===\n");
    out.push_str(&format!("Source: {}\n", run.source));
    if run.commodities.is_empty() {
        out.push_str(&format!("Commodity: {}\n", run.commodity));
    } else {
        out.push_str(&format!(
            "Commodity: {} (available: {})\n",
            run.commodity,
            run.commodities.join(", ")
        ));
    }
    out.push_str(&format!(
        "Records: {} loaded | {} matching | {} plotted | {} dropped (missing date/price)\n",
        run.stats.records_total,
        run.stats.records_matching,
        run.stats.points_used,
        run.stats.points_dropped,
    ));
    if let Some([d0, d1]) = date_bounds(&run.series) {
        out.push_str(&format!("Span: {d0} to {d1}\n"));
    }
    out.push('\n');

    out.push_str(&format_series_table(&run.series));
    out
}

/// Format one row per series: label, point count, date span, USD range, style.
pub fn format_series_table(series: &[PriceSeries]) -> String {
    if series.is_empty() {
        return "No series to plot for this commodity.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:>3} {:<32} {:>4}  {:<10}  {:<10}  {:<13}  {}\n",
        "#", "series", "pts", "first", "last", "usd/kg", "style"
    ));

    for (idx, s) in series.iter().enumerate() {
        let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in &s.points {
            lo = lo.min(p.usd_per_kg);
            hi = hi.max(p.usd_per_kg);
        }
        let first = s.points.first().map(|p| p.date.to_string()).unwrap_or_default();
        let last = s.points.last().map(|p| p.date.to_string()).unwrap_or_default();
        let style = if s.is_dashed() { "dashed" } else { "solid" };

        out.push_str(&format!(
            "{:>3} {:<32} {:>4}  {:<10}  {:<10}  {:<13}  {}\n",
            idx + 1,
            s.label(),
            s.points.len(),
            first,
            last,
            format!("{lo:.2} - {hi:.2}"),
            style,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::build_run;
    use crate::domain::PriceRecord;

    fn record(commodity: &str, form: &str, date: &str, usd: f64) -> PriceRecord {
        PriceRecord {
            commodity: commodity.to_string(),
            country: "Thailand".to_string(),
            product_form: Some(form.to_string()),
            date: Some(date.to_string()),
            usd_per_kg: Some(usd),
            inr_per_kg: None,
        }
    }

    #[test]
    fn summary_lists_counts_and_series() {
        let records = vec![
            record("chicken", "Thigh", "2022-12-01", 2.3),
            record("chicken", "Thigh", "2023-01-01", 2.5),
            record("beef", "brisket", "2023-01-01", 5.0),
        ];
        let run = build_run(&records, None, "latest.json");
        let summary = format_run_summary(&run);

        assert!(summary.contains("Source: latest.json"));
        assert!(summary.contains("Commodity: chicken (available: beef, chicken)"));
        assert!(summary.contains("3 loaded | 2 matching | 2 plotted | 0 dropped"));
        assert!(summary.contains("Thailand • Thigh"));
        assert!(summary.contains("dashed"));
    }

    #[test]
    fn empty_build_says_so() {
        let run = build_run(&[], None, "latest.json");
        let summary = format_run_summary(&run);
        assert!(summary.contains("No series to plot"));
    }
}
