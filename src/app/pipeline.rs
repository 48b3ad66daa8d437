//! Shared "chart pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load records -> pick commodity -> build series -> build chart spec -> stats
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::chart::{ChartSpec, build_chart_spec, build_series};
use crate::data::DataSource;
use crate::domain::{ChartConfig, DEFAULT_COMMODITY, PriceRecord, PriceSeries, commodities_in};
use crate::error::AppError;

/// Counts describing one build, for reports and diagnostics.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct BuildStats {
    /// Records loaded from the source.
    pub records_total: usize,
    /// Records whose commodity matched the selection.
    pub records_matching: usize,
    /// Points that made it into a series.
    pub points_used: usize,
    /// Matching records dropped for a missing date or USD price.
    pub points_dropped: usize,
    pub n_series: usize,
}

/// All computed outputs of a single chart build.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Human-readable source label, for headers and the debug bundle.
    pub source: String,
    pub commodity: String,
    /// Distinct commodities present in the loaded data, sorted.
    pub commodities: Vec<String>,
    pub series: Vec<PriceSeries>,
    pub chart: ChartSpec,
    pub stats: BuildStats,
}

/// Execute the full pipeline: resolve the source, load once, build.
pub fn run_chart(config: &ChartConfig) -> Result<RunOutput, AppError> {
    let source = DataSource::resolve(config.data.as_deref());
    let records = source.load()?;
    Ok(build_run(&records, config.commodity.as_deref(), &source.label()))
}

/// Build chart outputs from already-loaded records.
///
/// This is what the TUI calls on every selection change; it never fails,
/// since an unknown commodity or an empty result set is normal data
/// variation and simply yields zero series.
pub fn build_run(records: &[PriceRecord], requested: Option<&str>, source: &str) -> RunOutput {
    let commodities = commodities_in(records);
    let commodity = resolve_commodity(&commodities, requested);

    let series = build_series(records, &commodity);
    let chart = build_chart_spec(&series);

    let records_matching = records.iter().filter(|r| r.commodity == commodity).count();
    let points_used: usize = series.iter().map(|s| s.points.len()).sum();
    let stats = BuildStats {
        records_total: records.len(),
        records_matching,
        points_used,
        points_dropped: records_matching - points_used,
        n_series: series.len(),
    };

    RunOutput {
        source: source.to_string(),
        commodity,
        commodities,
        series,
        chart,
        stats,
    }
}

/// Pick the commodity to chart: the request wins (even when absent from the
/// data, which just charts empty), then "chicken" when present, then the
/// first commodity in the data.
fn resolve_commodity(commodities: &[String], requested: Option<&str>) -> String {
    if let Some(requested) = requested {
        return requested.to_string();
    }
    if commodities.iter().any(|c| c == DEFAULT_COMMODITY) {
        return DEFAULT_COMMODITY.to_string();
    }
    commodities
        .first()
        .cloned()
        .unwrap_or_else(|| DEFAULT_COMMODITY.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(commodity: &str, date: Option<&str>, usd: Option<f64>) -> PriceRecord {
        PriceRecord {
            commodity: commodity.to_string(),
            country: "Thailand".to_string(),
            date: date.map(str::to_string),
            usd_per_kg: usd,
            ..Default::default()
        }
    }

    #[test]
    fn defaults_to_chicken_when_present() {
        let records = vec![
            record("beef", Some("2023-01-01"), Some(5.0)),
            record("chicken", Some("2023-01-01"), Some(2.5)),
        ];
        let run = build_run(&records, None, "test");
        assert_eq!(run.commodity, "chicken");
        assert_eq!(run.commodities, vec!["beef", "chicken"]);
    }

    #[test]
    fn falls_back_to_first_commodity() {
        let records = vec![record("pork", Some("2023-01-01"), Some(4.0))];
        let run = build_run(&records, None, "test");
        assert_eq!(run.commodity, "pork");
    }

    #[test]
    fn unknown_request_charts_empty() {
        let records = vec![record("chicken", Some("2023-01-01"), Some(2.5))];
        let run = build_run(&records, Some("lamb"), "test");
        assert_eq!(run.commodity, "lamb");
        assert!(run.series.is_empty());
        assert_eq!(run.stats.records_matching, 0);
    }

    #[test]
    fn stats_count_dropped_records() {
        let records = vec![
            record("chicken", Some("2023-01-01"), Some(2.5)),
            record("chicken", None, Some(2.4)),
            record("chicken", Some("2023-02-01"), None),
            record("beef", Some("2023-01-01"), Some(5.0)),
        ];
        let run = build_run(&records, None, "test");
        assert_eq!(run.stats.records_total, 4);
        assert_eq!(run.stats.records_matching, 3);
        assert_eq!(run.stats.points_used, 1);
        assert_eq!(run.stats.points_dropped, 2);
        assert_eq!(run.stats.n_series, 1);
    }
}
