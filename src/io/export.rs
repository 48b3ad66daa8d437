//! Export built series to CSV and chart configuration to JSON.
//!
//! The CSV is meant to be easy to consume in spreadsheets or downstream
//! scripts; the JSON is the same configuration object the renderer consumes.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::app::pipeline::RunOutput;
use crate::chart::ChartSpec;
use crate::error::AppError;

/// Write one CSV row per plotted point.
pub fn write_points_csv(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    // Header
    writeln!(file, "commodity,country,product_form,date,usd_per_kg,inr_per_kg")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for s in &run.series {
        for p in &s.points {
            writeln!(
                file,
                "{},{},{},{},{:.4},{}",
                run.commodity,
                s.key.country,
                s.key.product_form,
                p.date,
                p.usd_per_kg,
                p.inr_per_kg.map(|v| format!("{v:.4}")).unwrap_or_default(),
            )
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
        }
    }

    Ok(())
}

/// Write the renderer configuration object as pretty JSON.
pub fn write_chart_json(path: &Path, chart: &ChartSpec) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create chart JSON '{}': {e}", path.display()))
    })?;

    serde_json::to_writer_pretty(file, chart)
        .map_err(|e| AppError::new(2, format!("Failed to write chart JSON: {e}")))?;

    Ok(())
}
