//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads price records
//! - builds chart series and the renderer configuration
//! - prints reports/plots or launches the TUI
//! - writes optional exports

use clap::Parser;

use crate::cli::{ChartArgs, Command, ExportArgs};
use crate::domain::ChartConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `pw` binary.
pub fn run() -> Result<(), AppError> {
    // We want `pw` and `pw -c beef` to behave like `pw tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Chart(args) => handle_chart(args),
        Command::Export(args) => handle_export(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_chart(args: ChartArgs) -> Result<(), AppError> {
    let config = chart_config_from_args(&args);
    let run = pipeline::run_chart(&config)?;

    print!("{}", crate::report::format_run_summary(&run));

    if config.plot {
        let plot = crate::plot::render_ascii_chart(&run.series, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    if args.points.is_none() && args.chart.is_none() {
        return Err(AppError::new(
            2,
            "Nothing to export. Pass --points <csv> and/or --chart <json>.",
        ));
    }

    let config = ChartConfig {
        data: args.data,
        commodity: args.commodity,
        plot: false,
        plot_width: 0,
        plot_height: 0,
    };
    let run = pipeline::run_chart(&config)?;

    if let Some(path) = &args.points {
        crate::io::export::write_points_csv(path, &run)?;
        println!("Wrote {} points to {}", run.stats.points_used, path.display());
    }
    if let Some(path) = &args.chart {
        crate::io::export::write_chart_json(path, &run.chart)?;
        println!(
            "Wrote chart config ({} datasets) to {}",
            run.chart.datasets.len(),
            path.display()
        );
    }

    Ok(())
}

fn handle_tui(args: ChartArgs) -> Result<(), AppError> {
    crate::tui::run(chart_config_from_args(&args))
}

pub fn chart_config_from_args(args: &ChartArgs) -> ChartConfig {
    ChartConfig {
        data: args.data.clone(),
        commodity: args.commodity.clone(),
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
    }
}

/// Rewrite argv so `pw` defaults to `pw tui`.
///
/// Rules:
/// - `pw`                      -> `pw tui`
/// - `pw -c beef ...`          -> `pw tui -c beef ...`
/// - `pw --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "chart" | "export" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::rewrite_args;

    fn rewrite(args: &[&str]) -> Vec<String> {
        rewrite_args(args.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn bare_invocation_becomes_tui() {
        assert_eq!(rewrite(&["pw"]), vec!["pw", "tui"]);
    }

    #[test]
    fn leading_flags_become_tui_flags() {
        assert_eq!(
            rewrite(&["pw", "-c", "beef"]),
            vec!["pw", "tui", "-c", "beef"]
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(rewrite(&["pw", "chart"]), vec!["pw", "chart"]);
        assert_eq!(rewrite(&["pw", "export"]), vec!["pw", "export"]);
        assert_eq!(rewrite(&["pw", "--help"]), vec!["pw", "--help"]);
    }
}
