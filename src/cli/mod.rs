//! Command-line parsing for the commodity price charter.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the data/chart code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pw", version, about = "Commodity price line charts (JSON-fed)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load price records, print a summary, and draw a terminal chart.
    Chart(ChartArgs),
    /// Write per-point CSV and/or chart configuration JSON.
    Export(ExportArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying chart pipeline as `pw chart`, but
    /// renders results in a terminal UI using Ratatui.
    Tui(ChartArgs),
}

/// Common options for charting.
#[derive(Debug, Parser, Clone)]
pub struct ChartArgs {
    /// Price records JSON: a file path or an http(s) URL.
    ///
    /// Falls back to the PW_DATA environment variable, then `latest.json`.
    #[arg(short = 'f', long = "data", value_name = "PATH|URL")]
    pub data: Option<String>,

    /// Commodity to chart (default: "chicken" when present in the data).
    #[arg(short = 'c', long)]
    pub commodity: Option<String>,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for exporting chart data.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Price records JSON: a file path or an http(s) URL.
    #[arg(short = 'f', long = "data", value_name = "PATH|URL")]
    pub data: Option<String>,

    /// Commodity to export (default: "chicken" when present in the data).
    #[arg(short = 'c', long)]
    pub commodity: Option<String>,

    /// Write per-point results to CSV.
    #[arg(long, value_name = "CSV")]
    pub points: Option<PathBuf>,

    /// Write the chart configuration (datasets + axes + legend) to JSON.
    #[arg(long, value_name = "JSON")]
    pub chart: Option<PathBuf>,
}
