//! Debug bundle: a single JSON file capturing one build for offline diagnosis.
//!
//! Triggered by `d` in the TUI. Contains load/build counts and per-series
//! summaries, not the raw records.

use std::fs::File;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::app::pipeline::{BuildStats, RunOutput};
use crate::domain::{LineStyle, Rgb};
use crate::error::AppError;

#[derive(Serialize)]
struct DebugBundle<'a> {
    generated_at: String,
    source: &'a str,
    commodity: &'a str,
    commodities: &'a [String],
    stats: BuildStats,
    series: Vec<SeriesSummary>,
}

#[derive(Serialize)]
struct SeriesSummary {
    label: String,
    country: String,
    product_form: String,
    style: LineStyle,
    color: Rgb,
    points: usize,
    first: Option<NaiveDate>,
    last: Option<NaiveDate>,
}

/// Write a `pw-debug-<timestamp>.json` bundle into the working directory.
pub fn write_debug_bundle(run: &RunOutput) -> Result<PathBuf, AppError> {
    let series = run
        .series
        .iter()
        .map(|s| SeriesSummary {
            label: s.label(),
            country: s.key.country.clone(),
            product_form: s.key.product_form.clone(),
            style: s.style,
            color: s.color,
            points: s.points.len(),
            first: s.points.first().map(|p| p.date),
            last: s.points.last().map(|p| p.date),
        })
        .collect();

    let bundle = DebugBundle {
        generated_at: Local::now().to_rfc3339(),
        source: &run.source,
        commodity: &run.commodity,
        commodities: &run.commodities,
        stats: run.stats,
        series,
    };

    let path = PathBuf::from(format!(
        "pw-debug-{}.json",
        Local::now().format("%Y%m%d-%H%M%S")
    ));
    let file = File::create(&path).map_err(|e| {
        AppError::new(2, format!("Failed to create debug bundle '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(file, &bundle)
        .map_err(|e| AppError::new(2, format!("Failed to write debug bundle: {e}")))?;

    Ok(path)
}
